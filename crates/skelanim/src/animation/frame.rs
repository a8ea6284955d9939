//! Per-bone partial transforms

use glam::{Mat4, Quat, Vec3};

use super::types::Interpolate;

/// A partial bone transform produced by sampling a track
///
/// Each channel is independent: a clip may animate only the rotation of a
/// bone and leave its position and scale to the rest pose.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoneFrameTransform {
    pub position: Option<Vec3>,
    pub rotation: Option<Quat>,
    pub scale: Option<Vec3>,
}

impl BoneFrameTransform {
    /// Create a transform with the given channels
    pub const fn new(position: Option<Vec3>, rotation: Option<Quat>, scale: Option<Vec3>) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Create a transform carrying only a position
    pub const fn from_position(position: Vec3) -> Self {
        Self::new(Some(position), None, None)
    }

    /// Create a transform carrying only a rotation
    pub const fn from_rotation(rotation: Quat) -> Self {
        Self::new(None, Some(rotation), None)
    }

    /// Create a transform carrying only a scale
    pub const fn from_scale(scale: Vec3) -> Self {
        Self::new(None, None, Some(scale))
    }

    pub fn has_position(&self) -> bool {
        self.position.is_some()
    }

    pub fn has_rotation(&self) -> bool {
        self.rotation.is_some()
    }

    pub fn has_scale(&self) -> bool {
        self.scale.is_some()
    }

    /// Check if no channel is present
    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.rotation.is_none() && self.scale.is_none()
    }

    /// Local matrix with missing channels taken from the identity transform
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale.unwrap_or(Vec3::ONE),
            self.rotation.unwrap_or(Quat::IDENTITY),
            self.position.unwrap_or(Vec3::ZERO),
        )
    }

    /// Local matrix with missing channels taken from `rest`
    pub fn to_matrix_over(&self, rest: &BoneFrameTransform) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale.or(rest.scale).unwrap_or(Vec3::ONE),
            self.rotation.or(rest.rotation).unwrap_or(Quat::IDENTITY),
            self.position.or(rest.position).unwrap_or(Vec3::ZERO),
        )
    }

    /// Blend two partial transforms channel by channel
    ///
    /// A channel present on both sides is interpolated by `t`; a channel
    /// present on only one side is copied from that side.
    pub fn interpolate(t: f32, prev: &Self, next: &Self) -> Self {
        Self {
            position: blend_channel(prev.position, next.position, t),
            rotation: blend_channel(prev.rotation, next.rotation, t),
            scale: blend_channel(prev.scale, next.scale, t),
        }
    }
}

fn blend_channel<T: Interpolate>(prev: Option<T>, next: Option<T>, t: f32) -> Option<T> {
    match (prev, next) {
        (Some(a), Some(b)) => {
            let value = a.interpolate(&b, t);
            if value.all_finite() { Some(value) } else { Some(a) }
        }
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}
