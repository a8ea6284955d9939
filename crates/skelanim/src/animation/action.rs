//! Skeletal animation clips

use super::interpolation::SamplingOptions;
use super::keyframe::KeyFrame;
use super::track::BoneTrack;
use super::types::TimedFrame;

/// A named animation clip made of per-bone tracks
///
/// The duration is authored and independent of the keyframe timestamps;
/// keeping playback time inside `[0, duration]` is up to the player.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkeletalAction {
    name: String,
    duration: f32,
    tracks: Vec<BoneTrack>,
}

impl SkeletalAction {
    /// Create a clip without tracks
    ///
    /// Negative durations are clamped to zero.
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration: duration.max(0.0),
            tracks: Vec::new(),
        }
    }

    /// Build a clip from whole authored poses
    ///
    /// Every bone found in the keyframes gets a track, and each channel
    /// present in a pose becomes a keyframe on that track. Keyframes are
    /// processed in time order.
    pub fn from_keyframes(name: impl Into<String>, duration: f32, keyframes: &[KeyFrame]) -> Self {
        let mut ordered: Vec<&KeyFrame> = keyframes.iter().collect();
        ordered.sort_by(|a, b| a.time.total_cmp(&b.time));

        let mut action = Self::new(name, duration);
        for keyframe in ordered {
            // HashMap order is arbitrary; sort so track order is reproducible
            let mut bones: Vec<_> = keyframe.iter().collect();
            bones.sort_by(|a, b| a.0.cmp(b.0));

            for (bone_id, transform) in bones {
                let index = match action.tracks.iter().position(|t| t.bone_id() == bone_id) {
                    Some(index) => index,
                    None => {
                        action.tracks.push(BoneTrack::new(bone_id.clone(), bone_id.clone()));
                        action.tracks.len() - 1
                    }
                };
                let track = &mut action.tracks[index];
                if let Some(position) = transform.position {
                    track.add_position_frame(TimedFrame::new(keyframe.time, position));
                }
                if let Some(rotation) = transform.rotation {
                    track.add_rotation_frame(TimedFrame::new(keyframe.time, rotation));
                }
                if let Some(scale) = transform.scale {
                    track.add_scale_frame(TimedFrame::new(keyframe.time, scale));
                }
            }
        }

        log::debug!(
            "Built clip '{}' with {} tracks from {} keyframes",
            action.name,
            action.tracks.len(),
            keyframes.len()
        );
        action
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Duration in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn tracks(&self) -> &[BoneTrack] {
        &self.tracks
    }

    pub fn add_track(&mut self, track: BoneTrack) {
        self.tracks.push(track);
    }

    /// Builder-style variant of [`SkeletalAction::add_track`]
    pub fn with_track(mut self, track: BoneTrack) -> Self {
        self.add_track(track);
        self
    }

    pub fn track_for_bone(&self, bone_id: &str) -> Option<&BoneTrack> {
        self.tracks.iter().find(|t| t.bone_id() == bone_id)
    }

    pub fn bone_ids(&self) -> impl Iterator<Item = &str> {
        self.tracks.iter().map(BoneTrack::bone_id)
    }

    /// All distinct keyframe timestamps across every track, ascending
    pub fn keyframe_times(&self) -> Vec<f32> {
        let mut times: Vec<f32> = self
            .tracks
            .iter()
            .flat_map(|track| {
                track
                    .position_track()
                    .iter()
                    .map(|f| f.time)
                    .chain(track.rotation_track().iter().map(|f| f.time))
                    .chain(track.scale_track().iter().map(|f| f.time))
            })
            .collect();
        times.sort_by(f32::total_cmp);
        times.dedup();
        times
    }

    /// Sample every track at the given time with default options
    pub fn sample_at(&self, time: f32) -> KeyFrame {
        self.sample_at_with(time, &SamplingOptions::default())
    }

    /// Sample every track at the given time
    ///
    /// Bones whose channels all come back empty are left out of the pose.
    pub fn sample_at_with(&self, time: f32, options: &SamplingOptions) -> KeyFrame {
        let mut keyframe = KeyFrame::new(time);
        for track in &self.tracks {
            let transform = track.sample(time, options);
            if !transform.is_empty() {
                keyframe.set_bone_transform(track.bone_id(), transform);
            }
        }
        keyframe
    }
}
