//! Skeletal animation clips and playback
//!
//! This module covers everything between authored keyframes and a posed
//! skeleton:
//! - Per-channel keyframe sampling with clamping and exact-hit snapping
//! - Bone tracks with independently timed position, rotation and scale curves
//! - Clips that sample every track into a [`KeyFrame`] pose
//! - A playback controller with looping, pausing and variable speed
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use skelanim::animation::{ActionPlayer, BoneTrack, ManualClock, SkeletalAction};
//! use skelanim::Model;
//! use glam::Vec3;
//!
//! let walk = SkeletalAction::new("Walk", 2.0).with_track(
//!     BoneTrack::new("Hips", "hips")
//!         .with_position(0.0, Vec3::ZERO)
//!         .with_position(2.0, Vec3::new(10.0, 0.0, 0.0)),
//! );
//!
//! let model = Model::new("Hero").into_ref();
//! let mut player = ActionPlayer::with_clock(ManualClock::new());
//! player.set_action(&model, Arc::new(walk));
//! player.play(true);
//! player.advance(0.5);
//!
//! let pose = player.current_key_frame().unwrap();
//! let hips = pose.bone_transform("hips").unwrap();
//! assert_eq!(hips.position, Some(Vec3::new(2.5, 0.0, 0.0)));
//! ```

mod action;
mod clock;
mod frame;
mod interpolation;
mod keyframe;
mod player;
mod track;
mod types;

pub use action::SkeletalAction;
pub use clock::{Clock, ManualClock, SystemClock};
pub use frame::BoneFrameTransform;
pub use interpolation::{
    EXACT_HIT_EPSILON, SamplingOptions, TimestampMode, find_frame_index, find_nearest_transform,
};
pub use keyframe::KeyFrame;
pub use player::{ActionPlayer, PlaybackOptions, PlaybackState};
pub use track::BoneTrack;
pub use types::{Interpolate, PositionFrame, RotationFrame, ScaleFrame, TimedFrame};
