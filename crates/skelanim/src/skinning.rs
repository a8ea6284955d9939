//! GPU skinning matrix generation
//!
//! Generators turn a model's skeleton into dense `f32` buffers ready for
//! upload as shader uniforms. Every buffer holds one column-major 4x4 matrix
//! per bone, 16 floats each.
//!
//! The two generators use different bone orders:
//!
//! - [`BoneMatrixGenerator`] orders bones by their [`Bone::idx`](crate::Bone::idx)
//! - [`InverseBindMatrixGenerator`] orders bones by their position in
//!   [`Skinning::bone_ids`](crate::Skinning::bone_ids)
//!
//! Each order must match what the consuming shader expects, so they are kept
//! independent.
//!
//! # Example
//!
//! ```rust
//! use skelanim::{Bone, BoneMatrixGenerator, Model, Skeleton, UniformGenerator};
//!
//! let skeleton = Skeleton::new(vec![Bone::new(0, "root", "Root")])?;
//! let model = Model::new("Box").with_skeleton(skeleton);
//!
//! let buffer = BoneMatrixGenerator.compute(&model)?;
//! assert_eq!(buffer.len(), 1);
//! assert_eq!(buffer.as_slice().len(), 16);
//! # Ok::<(), skelanim::AnimError>(())
//! ```

use std::collections::HashSet;

use glam::Mat4;

use crate::error::{AnimError, Result};
use crate::model::Model;
use crate::skeleton::{Bone, Skeleton};

/// Number of floats in one packed matrix
pub const MATRIX_STRIDE: usize = 16;

/// Produces uniform data for a model
pub trait UniformGenerator {
    fn compute(&self, model: &Model) -> Result<MatrixBuffer>;
}

/// Dense buffer of column-major 4x4 matrices
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatrixBuffer {
    data: Vec<f32>,
}

impl MatrixBuffer {
    pub fn with_capacity(matrices: usize) -> Self {
        Self {
            data: Vec::with_capacity(matrices * MATRIX_STRIDE),
        }
    }

    pub fn push(&mut self, matrix: Mat4) {
        self.data.extend_from_slice(&matrix.to_cols_array());
    }

    /// Number of matrices in the buffer
    pub fn len(&self) -> usize {
        self.data.len() / MATRIX_STRIDE
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Unpack the matrix at the given position
    pub fn matrix(&self, index: usize) -> Option<Mat4> {
        let start = index.checked_mul(MATRIX_STRIDE)?;
        let cols = self.data.get(start..start.checked_add(MATRIX_STRIDE)?)?;
        Some(Mat4::from_cols_slice(cols))
    }

    pub fn matrices(&self) -> impl Iterator<Item = Mat4> + '_ {
        self.data.chunks_exact(MATRIX_STRIDE).map(Mat4::from_cols_slice)
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

fn skeleton_of(model: &Model) -> Result<&Skeleton> {
    model.skeleton.as_ref().ok_or_else(|| AnimError::MissingSkeleton {
        model: model.name.clone(),
    })
}

/// Current pose matrices, ordered by bone index
#[derive(Debug, Clone, Copy, Default)]
pub struct BoneMatrixGenerator;

impl BoneMatrixGenerator {
    fn bone_matrix(bone: &Bone) -> Mat4 {
        match bone.pose_correction {
            Some(correction) => bone.pose_matrix() * Mat4::from_quat(correction),
            None => bone.pose_matrix(),
        }
    }
}

impl UniformGenerator for BoneMatrixGenerator {
    fn compute(&self, model: &Model) -> Result<MatrixBuffer> {
        let skeleton = skeleton_of(model)?;

        let mut bones: Vec<&Bone> = skeleton.bones().iter().collect();
        bones.sort_by_key(|bone| bone.idx);

        let mut buffer = MatrixBuffer::with_capacity(bones.len());
        for bone in bones {
            buffer.push(Self::bone_matrix(bone));
        }
        Ok(buffer)
    }
}

/// Inverse bind matrices, ordered by the skinning component's bone ids
#[derive(Debug, Clone, Copy, Default)]
pub struct InverseBindMatrixGenerator;

impl UniformGenerator for InverseBindMatrixGenerator {
    fn compute(&self, model: &Model) -> Result<MatrixBuffer> {
        let skeleton = skeleton_of(model)?;
        let skinning = model.skinning.as_ref().ok_or_else(|| AnimError::MissingSkinning {
            model: model.name.clone(),
        })?;

        let mut listed = HashSet::with_capacity(skinning.bone_ids.len());
        let mut buffer = MatrixBuffer::with_capacity(skinning.bone_ids.len());
        for bone_id in &skinning.bone_ids {
            if !listed.insert(bone_id.as_str()) {
                log::warn!("Skinning of model '{}' lists bone '{bone_id}' twice", model.name);
                return Err(AnimError::DuplicateSkinningId {
                    model: model.name.clone(),
                    bone_id: bone_id.clone(),
                });
            }
            let Some(bone) = skeleton.find_bone_by_id(bone_id) else {
                log::warn!(
                    "Skinning of model '{}' lists bone '{bone_id}' missing from the skeleton",
                    model.name
                );
                return Err(AnimError::UnboundSkinningId {
                    model: model.name.clone(),
                    bone_id: bone_id.clone(),
                });
            };
            buffer.push(bone.inverse_bind_matrix());
        }

        if let Some(bone) = skeleton.bones().iter().find(|bone| !listed.contains(bone.id.as_str())) {
            log::warn!(
                "Bone '{}' of model '{}' has no slot in the skinning bone ids",
                bone.id,
                model.name
            );
            return Err(AnimError::UnknownBoneId {
                model: model.name.clone(),
                bone_id: bone.id.clone(),
            });
        }

        Ok(buffer)
    }
}
