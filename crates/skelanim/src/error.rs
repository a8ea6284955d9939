use thiserror::Error;

/// Error types for skeleton construction and skinning data generation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimError {
    /// Skinning matrices were requested for a model without a skeleton
    #[error("Unable to compute bone matrices without a skeleton attached to model '{model}'")]
    MissingSkeleton { model: String },

    /// Inverse bind matrices were requested for a model without a skinning component
    #[error("Model '{model}' has a skeleton but no skinning component")]
    MissingSkinning { model: String },

    /// A skeleton bone is not listed in the skinning component's bone ids
    #[error("Bone '{bone_id}' of model '{model}' is not listed in the skinning bone ids")]
    UnknownBoneId { model: String, bone_id: String },

    /// The skinning component lists an id that matches no skeleton bone
    #[error("Skinning of model '{model}' lists bone '{bone_id}' which is not in the skeleton")]
    UnboundSkinningId { model: String, bone_id: String },

    /// The skinning component lists the same bone id twice
    #[error("Skinning of model '{model}' lists bone '{bone_id}' more than once")]
    DuplicateSkinningId { model: String, bone_id: String },

    /// Two bones in a skeleton share the same id
    #[error("Duplicate bone id: {0}")]
    DuplicateBoneId(String),

    /// Two bones in a skeleton share the same matrix index
    #[error("Duplicate bone index: {0}")]
    DuplicateBoneIndex(usize),

    /// A bone references a parent that is not part of the skeleton
    #[error("Bone '{bone}' references unknown parent '{parent}'")]
    UnknownParent { bone: String, parent: String },

    /// The parent links of a skeleton do not form a forest
    #[error("Bone hierarchy contains a cycle through bone '{0}'")]
    CyclicHierarchy(String),

    /// Playback speed must be a finite number
    #[error("Invalid playback speed: {0}")]
    InvalidPlaybackSpeed(f32),
}

/// Result type using AnimError
pub type Result<T> = std::result::Result<T, AnimError>;
