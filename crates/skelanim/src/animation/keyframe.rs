//! Time-stamped skeleton poses

use std::collections::HashMap;
use std::collections::hash_map;

use super::frame::BoneFrameTransform;

/// A skeleton pose at a point in time
///
/// Maps bone ids to partial transforms. Bones that are not present keep
/// whatever transform they already have when the pose is applied.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyFrame {
    pub time: f32,
    pose: HashMap<String, BoneFrameTransform>,
}

impl KeyFrame {
    /// Create an empty pose at the given time
    pub fn new(time: f32) -> Self {
        Self {
            time,
            pose: HashMap::new(),
        }
    }

    pub fn pose(&self) -> &HashMap<String, BoneFrameTransform> {
        &self.pose
    }

    pub fn has_bone(&self, bone_id: &str) -> bool {
        self.pose.contains_key(bone_id)
    }

    pub fn bone_transform(&self, bone_id: &str) -> Option<&BoneFrameTransform> {
        self.pose.get(bone_id)
    }

    /// Set the transform of a bone, replacing any previous one
    pub fn set_bone_transform(&mut self, bone_id: impl Into<String>, transform: BoneFrameTransform) {
        self.pose.insert(bone_id.into(), transform);
    }

    /// Builder-style variant of [`KeyFrame::set_bone_transform`]
    pub fn with_bone(mut self, bone_id: impl Into<String>, transform: BoneFrameTransform) -> Self {
        self.set_bone_transform(bone_id, transform);
        self
    }

    pub fn bone_ids(&self) -> impl Iterator<Item = &str> {
        self.pose.keys().map(String::as_str)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, BoneFrameTransform> {
        self.pose.iter()
    }

    pub fn len(&self) -> usize {
        self.pose.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pose.is_empty()
    }

    /// Interpolate between two poses
    ///
    /// The result contains the union of both bone sets. Bones present on
    /// both sides are blended by the position of `time` between `prev.time`
    /// and `next.time`; bones present on one side are copied unchanged.
    pub fn interpolate(time: f32, prev: &KeyFrame, next: &KeyFrame) -> KeyFrame {
        let span = next.time - prev.time;
        let t = if span.abs() > f32::EPSILON {
            ((time - prev.time) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let mut result = KeyFrame::new(time);
        for (bone_id, prev_transform) in &prev.pose {
            let transform = match next.pose.get(bone_id) {
                Some(next_transform) => {
                    BoneFrameTransform::interpolate(t, prev_transform, next_transform)
                }
                None => *prev_transform,
            };
            result.pose.insert(bone_id.clone(), transform);
        }
        for (bone_id, next_transform) in &next.pose {
            result
                .pose
                .entry(bone_id.clone())
                .or_insert(*next_transform);
        }

        result
    }
}

impl<'a> IntoIterator for &'a KeyFrame {
    type Item = (&'a String, &'a BoneFrameTransform);
    type IntoIter = hash_map::Iter<'a, String, BoneFrameTransform>;

    fn into_iter(self) -> Self::IntoIter {
        self.pose.iter()
    }
}
