//! Playback state machine for skeletal clips
//!
//! An [`ActionPlayer`] binds one clip to one model, advances playback time
//! from wall-clock deltas (or explicit deltas via [`ActionPlayer::advance`])
//! and writes the sampled pose into the model's skeleton.

use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use glam::Mat4;

use super::action::SkeletalAction;
use super::clock::{Clock, SystemClock};
use super::interpolation::SamplingOptions;
use super::keyframe::KeyFrame;
use crate::error::{AnimError, Result};
use crate::model::ModelRef;

/// Coarse playback state derived from the player flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Not playing, time at the start of the clip
    Stopped,
    /// Not playing, time preserved
    Paused,
    Playing,
}

/// Initial playback settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaybackOptions {
    /// Time multiplier, negative values play backwards
    pub speed: f32,
    pub looping: bool,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            speed: 1.0,
            looping: false,
        }
    }
}

/// Drives a [`SkeletalAction`] on a single model
///
/// Every operation that changes playback is a silent no-op while no clip is
/// bound.
#[derive(Debug)]
pub struct ActionPlayer<C: Clock = SystemClock> {
    action: Option<Arc<SkeletalAction>>,
    target: Option<ModelRef>,
    current_time: f32,
    is_playing: bool,
    is_looping: bool,
    playback_speed: f32,
    sampling: SamplingOptions,
    last_update: Instant,
    clock: C,
}

impl ActionPlayer<SystemClock> {
    /// Create a player driven by the system clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for ActionPlayer<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ActionPlayer<C> {
    /// Create a player driven by the given clock
    pub fn with_clock(clock: C) -> Self {
        let last_update = clock.now();
        Self {
            action: None,
            target: None,
            current_time: 0.0,
            is_playing: false,
            is_looping: false,
            playback_speed: 1.0,
            sampling: SamplingOptions::default(),
            last_update,
            clock,
        }
    }

    /// Apply initial playback settings
    ///
    /// The looping flag is kept for [`resume`](Self::resume). Fails on a
    /// non-finite speed.
    pub fn with_options(mut self, options: PlaybackOptions) -> Result<Self> {
        self.set_playback_speed(options.speed)?;
        self.is_looping = options.looping;
        Ok(self)
    }

    pub fn with_sampling_options(mut self, sampling: SamplingOptions) -> Self {
        self.sampling = sampling;
        self
    }

    /// Bind a clip and the model it animates
    ///
    /// Resets playback time to zero and records the clip on the model.
    pub fn set_action(&mut self, model: &ModelRef, action: Arc<SkeletalAction>) {
        match model.try_borrow_mut() {
            Ok(mut target) => {
                log::debug!("Binding clip '{}' to model '{}'", action.name(), target.name);
                target.action = Some(Arc::clone(&action));
            }
            Err(_) => log::warn!("Model is borrowed, clip '{}' not recorded on it", action.name()),
        }

        self.action = Some(action);
        self.target = Some(Rc::clone(model));
        self.current_time = 0.0;
        self.last_update = self.clock.now();
    }

    /// Start or resume playback with an explicit looping flag
    pub fn play(&mut self, looping: bool) {
        if self.action.is_none() {
            return;
        }
        self.is_looping = looping;
        self.resume();
    }

    /// Start or resume playback with the configured looping flag
    pub fn resume(&mut self) {
        let Some(action) = &self.action else {
            return;
        };
        if !self.is_playing {
            self.last_update = self.clock.now();
            log::debug!(
                "Playing '{}' from {:.3}s (looping: {})",
                action.name(),
                self.current_time,
                self.is_looping
            );
        }
        self.is_playing = true;
    }

    /// Halt playback, keeping the current time
    pub fn pause(&mut self) {
        if self.is_playing {
            log::debug!("Paused at {:.3}s", self.current_time);
        }
        self.is_playing = false;
    }

    /// Halt playback and rewind to the start
    pub fn stop(&mut self) {
        if self.action.is_none() {
            return;
        }
        log::debug!("Stopped");
        self.is_playing = false;
        self.current_time = 0.0;
        self.last_update = self.clock.now();
    }

    /// Advance playback by the wall-clock time elapsed since the last update
    pub fn update(&mut self) {
        let now = self.clock.now();
        let delta = now.saturating_duration_since(self.last_update).as_secs_f32();
        self.last_update = now;
        self.advance(delta);
    }

    /// Advance playback by an explicit delta in seconds
    ///
    /// Looping playback wraps in both directions. Otherwise playback stops
    /// at the end of the clip, or at its start when playing backwards.
    pub fn advance(&mut self, delta_seconds: f32) {
        if !self.is_playing {
            return;
        }
        let Some(action) = self.action.clone() else {
            return;
        };
        if !delta_seconds.is_finite() {
            log::warn!("Ignoring non-finite time step {delta_seconds}");
            return;
        }

        let duration = action.duration();
        let mut time = self.current_time + delta_seconds * self.playback_speed;

        if duration <= 0.0 {
            time = 0.0;
            if !self.is_looping {
                self.finish(&action);
            }
        } else if self.is_looping {
            if !(0.0..=duration).contains(&time) {
                time = time.rem_euclid(duration);
            }
        } else if time > duration {
            time = duration;
            self.finish(&action);
        } else if time < 0.0 {
            time = 0.0;
            self.finish(&action);
        }

        log::trace!("Advanced '{}' by {delta_seconds:.4}s to {time:.4}s", action.name());
        self.current_time = time;
        self.apply_pose(&action);
    }

    fn finish(&mut self, action: &SkeletalAction) {
        log::debug!("Clip '{}' finished", action.name());
        self.is_playing = false;
    }

    /// Jump to a time, clamped to the clip
    pub fn seek(&mut self, time: f32) {
        let Some(action) = &self.action else {
            return;
        };
        self.current_time = if time.is_nan() {
            0.0
        } else {
            time.clamp(0.0, action.duration())
        };
    }

    /// Set the playback speed multiplier
    ///
    /// Negative speeds play backwards and zero freezes time.
    pub fn set_playback_speed(&mut self, speed: f32) -> Result<()> {
        if !speed.is_finite() {
            log::warn!("Rejected playback speed {speed}");
            return Err(AnimError::InvalidPlaybackSpeed(speed));
        }
        self.playback_speed = speed;
        Ok(())
    }

    /// Sample the clip at the current time and apply the pose to the model
    ///
    /// Returns None while no clip is bound.
    pub fn current_key_frame(&mut self) -> Option<KeyFrame> {
        let action = self.action.clone()?;
        Some(self.apply_pose(&action))
    }

    fn apply_pose(&self, action: &SkeletalAction) -> KeyFrame {
        let keyframe = action.sample_at_with(self.current_time, &self.sampling);
        if let Some(target) = &self.target {
            match target.try_borrow_mut() {
                Ok(mut model) => {
                    if let Some(skeleton) = model.skeleton.as_mut() {
                        skeleton.compute_pose_from_keyframe(&keyframe, Mat4::IDENTITY);
                    }
                }
                Err(_) => log::warn!("Model is borrowed, pose at {:.3}s not applied", keyframe.time),
            }
        }
        keyframe
    }

    /// Rebase the wall-clock reference to now, discarding elapsed time
    pub fn reset_timer(&mut self) {
        self.last_update = self.clock.now();
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    /// Playback time in seconds
    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Duration of the bound clip, 0 when unbound
    pub fn duration(&self) -> f32 {
        self.action.as_ref().map_or(0.0, |action| action.duration())
    }

    /// Fraction of the clip played, in `[0, 1]`
    pub fn progress(&self) -> f32 {
        let duration = self.duration();
        if duration > 0.0 {
            (self.current_time / duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn playback_speed(&self) -> f32 {
        self.playback_speed
    }

    pub fn state(&self) -> PlaybackState {
        if self.is_playing {
            PlaybackState::Playing
        } else if self.current_time > 0.0 {
            PlaybackState::Paused
        } else {
            PlaybackState::Stopped
        }
    }

    pub fn action(&self) -> Option<&Arc<SkeletalAction>> {
        self.action.as_ref()
    }

    pub fn target(&self) -> Option<&ModelRef> {
        self.target.as_ref()
    }

    pub fn sampling_options(&self) -> &SamplingOptions {
        &self.sampling
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
