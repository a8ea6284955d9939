//! Per-bone keyframe tracks

use glam::{Quat, Vec3};

use super::frame::BoneFrameTransform;
use super::interpolation::{SamplingOptions, find_nearest_transform};
use super::types::{PositionFrame, RotationFrame, ScaleFrame, TimedFrame};

/// Animation data for a single bone
///
/// Position, rotation and scale are keyed independently, each with its own
/// timestamps. Tracks are append-only while a clip is being built.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoneTrack {
    bone_name: String,
    bone_id: String,
    position_track: Vec<PositionFrame>,
    rotation_track: Vec<RotationFrame>,
    scale_track: Vec<ScaleFrame>,
}

impl BoneTrack {
    /// Create an empty track for a bone
    pub fn new(bone_name: impl Into<String>, bone_id: impl Into<String>) -> Self {
        Self {
            bone_name: bone_name.into(),
            bone_id: bone_id.into(),
            ..Self::default()
        }
    }

    pub fn bone_name(&self) -> &str {
        &self.bone_name
    }

    pub fn bone_id(&self) -> &str {
        &self.bone_id
    }

    pub fn position_track(&self) -> &[PositionFrame] {
        &self.position_track
    }

    pub fn rotation_track(&self) -> &[RotationFrame] {
        &self.rotation_track
    }

    pub fn scale_track(&self) -> &[ScaleFrame] {
        &self.scale_track
    }

    pub fn add_position_frame(&mut self, frame: PositionFrame) {
        push_ordered(&mut self.position_track, frame);
    }

    pub fn add_rotation_frame(&mut self, frame: RotationFrame) {
        push_ordered(&mut self.rotation_track, frame);
    }

    pub fn add_scale_frame(&mut self, frame: ScaleFrame) {
        push_ordered(&mut self.scale_track, frame);
    }

    /// Builder-style variant of [`BoneTrack::add_position_frame`]
    pub fn with_position(mut self, time: f32, position: Vec3) -> Self {
        self.add_position_frame(TimedFrame::new(time, position));
        self
    }

    /// Builder-style variant of [`BoneTrack::add_rotation_frame`]
    pub fn with_rotation(mut self, time: f32, rotation: Quat) -> Self {
        self.add_rotation_frame(TimedFrame::new(time, rotation));
        self
    }

    /// Builder-style variant of [`BoneTrack::add_scale_frame`]
    pub fn with_scale(mut self, time: f32, scale: Vec3) -> Self {
        self.add_scale_frame(TimedFrame::new(time, scale));
        self
    }

    /// Check if no channel has any keyframe
    pub fn is_empty(&self) -> bool {
        self.position_track.is_empty() && self.rotation_track.is_empty() && self.scale_track.is_empty()
    }

    /// Timestamp of the last keyframe across all channels
    pub fn end_time(&self) -> Option<f32> {
        [
            self.position_track.last().map(|f| f.time),
            self.rotation_track.last().map(|f| f.time),
            self.scale_track.last().map(|f| f.time),
        ]
        .into_iter()
        .flatten()
        .reduce(f32::max)
    }

    /// Sample all three channels at the given time
    pub fn sample(&self, time: f32, options: &SamplingOptions) -> BoneFrameTransform {
        BoneFrameTransform {
            position: find_nearest_transform(time, &self.position_track, options).map(|f| f.value),
            rotation: find_nearest_transform(time, &self.rotation_track, options).map(|f| f.value),
            scale: find_nearest_transform(time, &self.scale_track, options).map(|f| f.value),
        }
    }
}

fn push_ordered<T>(frames: &mut Vec<TimedFrame<T>>, frame: TimedFrame<T>) {
    debug_assert!(
        frames.last().is_none_or(|last| last.time <= frame.time),
        "keyframe at {} appended after a later keyframe",
        frame.time
    );
    frames.push(frame);
}
