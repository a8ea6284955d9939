//! Common test fixtures

#![allow(dead_code)]

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use glam::{Quat, Vec3};
use skelanim::{Bone, BoneTrack, Model, ModelRef, SkeletalAction, Skeleton, Skinning};

/// Two second walk clip moving the hips along X and turning the spine
pub fn walk_action() -> Arc<SkeletalAction> {
    Arc::new(
        SkeletalAction::new("Walk", 2.0)
            .with_track(
                BoneTrack::new("Hips", "hips")
                    .with_position(0.0, Vec3::ZERO)
                    .with_position(2.0, Vec3::new(10.0, 0.0, 0.0)),
            )
            .with_track(
                BoneTrack::new("Spine", "spine")
                    .with_rotation(0.0, Quat::IDENTITY)
                    .with_rotation(1.0, Quat::from_rotation_y(FRAC_PI_2)),
            ),
    )
}

/// Hips, spine and head stacked along Y, one unit apart
pub fn biped_bones() -> Vec<Bone> {
    vec![
        Bone::new(0, "hips", "Hips").with_rest(Vec3::new(0.0, 1.0, 0.0), Quat::IDENTITY, Vec3::ONE),
        Bone::new(1, "spine", "Spine")
            .with_parent("hips")
            .with_rest(Vec3::Y, Quat::IDENTITY, Vec3::ONE),
        Bone::new(2, "head", "Head")
            .with_parent("spine")
            .with_rest(Vec3::Y, Quat::IDENTITY, Vec3::ONE),
    ]
}

pub fn biped_model() -> ModelRef {
    let skeleton = Skeleton::new(biped_bones()).expect("valid biped skeleton");
    Model::new("Biped")
        .with_skeleton(skeleton)
        .with_skinning(Skinning::new(["head", "hips", "spine"]))
        .into_ref()
}

pub fn assert_vec3_near(actual: Vec3, expected: Vec3) {
    assert!(
        actual.abs_diff_eq(expected, 1e-5),
        "expected {expected:?}, got {actual:?}"
    );
}

pub fn assert_quat_near(actual: Quat, expected: Quat) {
    // q and -q encode the same rotation
    assert!(
        actual.abs_diff_eq(expected, 1e-5) || actual.abs_diff_eq(-expected, 1e-5),
        "expected {expected:?}, got {actual:?}"
    );
}
