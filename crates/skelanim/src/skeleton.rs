//! Bone hierarchy with bind and pose matrices
//!
//! A [`Skeleton`] owns a flat list of bones linked by parent ids. Bind
//! matrices are derived from each bone's local rest transform when the
//! skeleton is built; pose matrices are recomputed whenever a [`KeyFrame`]
//! is applied.

use std::collections::{HashMap, HashSet};

use glam::{Mat4, Quat, Vec3};

use crate::animation::{BoneFrameTransform, KeyFrame};
use crate::error::{AnimError, Result};

/// A single bone of a skeleton
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    /// Index of this bone in the GPU bone matrix array
    pub idx: usize,
    pub id: String,
    pub name: String,
    /// Local rest transform relative to the parent bone
    pub rest: BoneFrameTransform,
    /// Extra rotation applied on top of the pose matrix when generating
    /// skinning matrices, for assets that need a per-bone fix-up
    pub pose_correction: Option<Quat>,
    parent_id: Option<String>,
    parent: Option<usize>,
    children: Vec<usize>,
    bind_matrix: Mat4,
    inverse_bind_matrix: Mat4,
    pose_matrix: Mat4,
}

impl Bone {
    /// Create a root bone with an identity rest transform
    pub fn new(idx: usize, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            idx,
            id: id.into(),
            name: name.into(),
            rest: BoneFrameTransform::default(),
            pose_correction: None,
            parent_id: None,
            parent: None,
            children: Vec::new(),
            bind_matrix: Mat4::IDENTITY,
            inverse_bind_matrix: Mat4::IDENTITY,
            pose_matrix: Mat4::IDENTITY,
        }
    }

    /// Attach this bone to the bone with the given id
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Set the local rest transform
    pub fn with_rest(mut self, position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        self.rest = BoneFrameTransform::new(Some(position), Some(rotation), Some(scale));
        self
    }

    pub fn with_pose_correction(mut self, correction: Quat) -> Self {
        self.pose_correction = Some(correction);
        self
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    /// Position of the parent bone in [`Skeleton::bones`]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// Model-space rest matrix
    pub fn bind_matrix(&self) -> Mat4 {
        self.bind_matrix
    }

    pub fn inverse_bind_matrix(&self) -> Mat4 {
        self.inverse_bind_matrix
    }

    /// Model-space matrix of the last applied pose (the bind matrix until posed)
    pub fn pose_matrix(&self) -> Mat4 {
        self.pose_matrix
    }

    /// Local rest matrix relative to the parent bone
    pub fn rest_matrix(&self) -> Mat4 {
        self.rest.to_matrix()
    }
}

/// A bone hierarchy
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    bones: Vec<Bone>,
    roots: Vec<usize>,
}

impl Skeleton {
    /// Build a skeleton, linking bones by parent id and computing bind matrices
    pub fn new(mut bones: Vec<Bone>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(bones.len());
        let mut indices = HashSet::with_capacity(bones.len());
        for (index, bone) in bones.iter().enumerate() {
            if by_id.insert(bone.id.clone(), index).is_some() {
                return Err(AnimError::DuplicateBoneId(bone.id.clone()));
            }
            if !indices.insert(bone.idx) {
                return Err(AnimError::DuplicateBoneIndex(bone.idx));
            }
        }

        for bone in &mut bones {
            bone.children.clear();
            bone.parent = None;
        }

        let mut roots = Vec::new();
        for index in 0..bones.len() {
            let Some(parent_id) = bones[index].parent_id.clone() else {
                roots.push(index);
                continue;
            };
            let Some(&parent) = by_id.get(&parent_id) else {
                return Err(AnimError::UnknownParent {
                    bone: bones[index].id.clone(),
                    parent: parent_id,
                });
            };
            bones[index].parent = Some(parent);
            bones[parent].children.push(index);
        }

        let mut skeleton = Self { bones, roots };
        let visited = skeleton.compute_bind_matrices();
        if let Some(index) = visited.iter().position(|seen| !seen) {
            return Err(AnimError::CyclicHierarchy(skeleton.bones[index].id.clone()));
        }

        log::debug!(
            "Built skeleton with {} bones and {} roots",
            skeleton.bones.len(),
            skeleton.roots.len()
        );
        Ok(skeleton)
    }

    /// Walk the hierarchy from the roots, returning which bones were reached
    fn compute_bind_matrices(&mut self) -> Vec<bool> {
        let mut visited = vec![false; self.bones.len()];
        let mut stack: Vec<(usize, Mat4)> = self.roots.iter().map(|&i| (i, Mat4::IDENTITY)).collect();

        while let Some((index, parent_bind)) = stack.pop() {
            visited[index] = true;
            let bone = &mut self.bones[index];
            bone.bind_matrix = parent_bind * bone.rest.to_matrix();
            bone.inverse_bind_matrix = bone.bind_matrix.inverse();
            bone.pose_matrix = bone.bind_matrix;

            let bind = bone.bind_matrix;
            for &child in &self.bones[index].children {
                stack.push((child, bind));
            }
        }

        visited
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    pub fn bone(&self, index: usize) -> Option<&Bone> {
        self.bones.get(index)
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn find_bone_by_name(&self, name: &str) -> Option<&Bone> {
        self.bones.iter().find(|b| b.name == name)
    }

    pub fn find_bone_by_id(&self, id: &str) -> Option<&Bone> {
        self.bones.iter().find(|b| b.id == id)
    }

    /// Apply a pose to the whole hierarchy
    ///
    /// Each bone's local matrix is its keyframe transform layered over its
    /// rest transform; bones missing from the keyframe keep their rest
    /// transform. `base` is the parent matrix of every root bone.
    pub fn compute_pose_from_keyframe(&mut self, keyframe: &KeyFrame, base: Mat4) {
        let mut stack: Vec<(usize, Mat4)> = self.roots.iter().map(|&i| (i, base)).collect();

        while let Some((index, parent_pose)) = stack.pop() {
            let bone = &mut self.bones[index];
            let local = match keyframe.bone_transform(&bone.id) {
                Some(transform) => transform.to_matrix_over(&bone.rest),
                None => bone.rest.to_matrix(),
            };
            bone.pose_matrix = parent_pose * local;

            let pose = bone.pose_matrix;
            for &child in &self.bones[index].children {
                stack.push((child, pose));
            }
        }
    }

    /// Put every bone back into its bind pose
    pub fn reset_pose(&mut self) {
        for bone in &mut self.bones {
            bone.pose_matrix = bone.bind_matrix;
        }
    }
}
