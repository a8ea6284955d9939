//! Animated model: a skeleton, its skinning component and the active clip

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::animation::SkeletalAction;
use crate::skeleton::Skeleton;

/// Skinning component of a model
///
/// `bone_ids` is the bone order the skinning shader indexes into.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Skinning {
    pub bone_ids: Vec<String>,
}

impl Skinning {
    pub fn new<I, S>(bone_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            bone_ids: bone_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Position of a bone id in the shader bone order
    pub fn position_of(&self, bone_id: &str) -> Option<usize> {
        self.bone_ids.iter().position(|id| id == bone_id)
    }
}

/// A renderable model that can be driven by an [`ActionPlayer`](crate::ActionPlayer)
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub name: String,
    pub skeleton: Option<Skeleton>,
    pub skinning: Option<Skinning>,
    /// Clip currently bound by a player
    pub action: Option<Arc<SkeletalAction>>,
}

/// Shared handle to a model, as held by a player
pub type ModelRef = Rc<RefCell<Model>>;

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_skeleton(mut self, skeleton: Skeleton) -> Self {
        self.skeleton = Some(skeleton);
        self
    }

    pub fn with_skinning(mut self, skinning: Skinning) -> Self {
        self.skinning = Some(skinning);
        self
    }

    pub fn has_skeleton(&self) -> bool {
        self.skeleton.is_some()
    }

    /// Wrap the model in a shared handle
    pub fn into_ref(self) -> ModelRef {
        Rc::new(RefCell::new(self))
    }
}
