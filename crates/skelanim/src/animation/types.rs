//! Common types for the skeletal animation system

use glam::{Quat, Vec3};

/// Trait for channel values that can be blended between two keyframes
pub trait Interpolate: Copy {
    /// Blend from `self` towards `other` by factor `t` (expected in `[0, 1]`)
    fn interpolate(&self, other: &Self, t: f32) -> Self;

    /// Check that every component is a finite number
    fn all_finite(&self) -> bool;
}

impl Interpolate for Vec3 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self.lerp(*other, t)
    }

    fn all_finite(&self) -> bool {
        Vec3::is_finite(*self)
    }
}

impl Interpolate for Quat {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        // Use slerp for quaternion interpolation
        self.slerp(*other, t).normalize()
    }

    fn all_finite(&self) -> bool {
        Quat::is_finite(*self)
    }
}

/// A single keyframe value with its timestamp (seconds)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedFrame<T> {
    pub time: f32,
    pub value: T,
}

impl<T> TimedFrame<T> {
    /// Create a new keyframe
    pub const fn new(time: f32, value: T) -> Self {
        Self { time, value }
    }
}

/// Position keyframe
pub type PositionFrame = TimedFrame<Vec3>;
/// Rotation keyframe
pub type RotationFrame = TimedFrame<Quat>;
/// Scale keyframe
pub type ScaleFrame = TimedFrame<Vec3>;
