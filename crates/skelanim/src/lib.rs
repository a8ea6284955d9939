//! Skeletal animation evaluation
//!
//! `skelanim` turns animation clips into skeleton poses and GPU skinning
//! matrices. A host loop drives an [`ActionPlayer`], which samples the bound
//! [`SkeletalAction`] and poses the model's [`Skeleton`]; the
//! [`UniformGenerator`] implementations then pack the posed skeleton into
//! matrix buffers for upload.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use skelanim::{
//!     ActionPlayer, Bone, BoneMatrixGenerator, BoneTrack, ManualClock, Model,
//!     SkeletalAction, Skeleton, Skinning, UniformGenerator,
//! };
//! use glam::{Quat, Vec3};
//!
//! let skeleton = Skeleton::new(vec![
//!     Bone::new(0, "hips", "Hips"),
//!     Bone::new(1, "spine", "Spine")
//!         .with_parent("hips")
//!         .with_rest(Vec3::Y, Quat::IDENTITY, Vec3::ONE),
//! ])?;
//! let model = Model::new("Hero")
//!     .with_skeleton(skeleton)
//!     .with_skinning(Skinning::new(["hips", "spine"]))
//!     .into_ref();
//!
//! let sway = SkeletalAction::new("Sway", 1.0).with_track(
//!     BoneTrack::new("Spine", "spine")
//!         .with_rotation(0.0, Quat::IDENTITY)
//!         .with_rotation(1.0, Quat::from_rotation_z(0.5)),
//! );
//!
//! let mut player = ActionPlayer::with_clock(ManualClock::new());
//! player.set_action(&model, Arc::new(sway));
//! player.play(true);
//! player.advance(0.25);
//!
//! let matrices = BoneMatrixGenerator.compute(&model.borrow())?;
//! assert_eq!(matrices.len(), 2);
//! # Ok::<(), skelanim::AnimError>(())
//! ```

pub mod animation;
pub mod error;
pub mod model;
pub mod skeleton;
pub mod skinning;

// Re-export common types
pub use animation::{
    ActionPlayer, BoneFrameTransform, BoneTrack, Clock, KeyFrame, ManualClock, PlaybackOptions,
    PlaybackState, SamplingOptions, SkeletalAction, SystemClock, TimestampMode,
};
pub use error::{AnimError, Result};
pub use model::{Model, ModelRef, Skinning};
pub use skeleton::{Bone, Skeleton};
pub use skinning::{BoneMatrixGenerator, InverseBindMatrixGenerator, MatrixBuffer, UniformGenerator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
