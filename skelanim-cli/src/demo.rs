//! Built-in demo rig and walk clip, used when no clip file is given

use std::f32::consts::FRAC_PI_4;

use glam::{Quat, Vec3};
use skelanim::{Bone, BoneTrack, Model, SkeletalAction, Skeleton, Skinning};

/// One second walk cycle for [`demo_model`]
pub fn walk_action() -> SkeletalAction {
    let swing = Quat::from_rotation_x(FRAC_PI_4);
    SkeletalAction::new("Walk", 1.0)
        .with_track(
            BoneTrack::new("Hips", "hips")
                .with_position(0.0, Vec3::new(0.0, 1.0, 0.0))
                .with_position(0.5, Vec3::new(0.0, 1.05, 0.5))
                .with_position(1.0, Vec3::new(0.0, 1.0, 1.0)),
        )
        .with_track(
            BoneTrack::new("Spine", "spine")
                .with_rotation(0.0, Quat::IDENTITY)
                .with_rotation(1.0, Quat::from_rotation_y(0.2)),
        )
        .with_track(
            BoneTrack::new("LeftLeg", "leg_l")
                .with_rotation(0.0, swing)
                .with_rotation(0.5, swing.inverse())
                .with_rotation(1.0, swing),
        )
        .with_track(
            BoneTrack::new("RightLeg", "leg_r")
                .with_rotation(0.0, swing.inverse())
                .with_rotation(0.5, swing)
                .with_rotation(1.0, swing.inverse()),
        )
}

fn bones() -> Vec<Bone> {
    vec![
        Bone::new(0, "hips", "Hips").with_rest(Vec3::new(0.0, 1.0, 0.0), Quat::IDENTITY, Vec3::ONE),
        Bone::new(1, "spine", "Spine")
            .with_parent("hips")
            .with_rest(Vec3::new(0.0, 0.3, 0.0), Quat::IDENTITY, Vec3::ONE),
        Bone::new(2, "head", "Head")
            .with_parent("spine")
            .with_rest(Vec3::new(0.0, 0.4, 0.0), Quat::IDENTITY, Vec3::ONE),
        Bone::new(3, "leg_l", "LeftLeg")
            .with_parent("hips")
            .with_rest(Vec3::new(0.15, -0.1, 0.0), Quat::IDENTITY, Vec3::ONE),
        Bone::new(4, "leg_r", "RightLeg")
            .with_parent("hips")
            .with_rest(Vec3::new(-0.15, -0.1, 0.0), Quat::IDENTITY, Vec3::ONE),
    ]
}

/// Five bone biped whose skinning order differs from its bone indices
pub fn demo_model() -> skelanim::Result<Model> {
    Ok(Model::new("DemoBiped")
        .with_skeleton(Skeleton::new(bones())?)
        .with_skinning(Skinning::new(["hips", "leg_l", "leg_r", "spine", "head"])))
}
