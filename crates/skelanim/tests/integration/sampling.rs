//! Clip and channel sampling through the public API

use glam::{Quat, Vec3};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use skelanim::animation::{
    BoneTrack, KeyFrame, PositionFrame, RotationFrame, SamplingOptions, SkeletalAction, TimedFrame,
    TimestampMode, find_nearest_transform,
};
use skelanim::BoneFrameTransform;
use test_case::test_case;

use crate::common::{assert_quat_near, walk_action};

fn slide_frames() -> Vec<PositionFrame> {
    vec![
        TimedFrame::new(0.0, Vec3::ZERO),
        TimedFrame::new(2.0, Vec3::new(10.0, 0.0, 0.0)),
    ]
}

#[test_case(1.0, 5.0 ; "midpoint")]
#[test_case(0.5, 2.5 ; "quarter")]
#[test_case(-3.0, 0.0 ; "clamped before")]
#[test_case(9.0, 10.0 ; "clamped after")]
#[test_case(2.0 - 1e-7, 10.0 ; "snaps to next keyframe")]
fn test_position_sampling(time: f32, expected_x: f32) {
    let frame = find_nearest_transform(time, &slide_frames(), &SamplingOptions::default()).unwrap();
    assert!(
        (frame.value.x - expected_x).abs() < 1e-5,
        "at {time}: expected {expected_x}, got {}",
        frame.value.x
    );
}

#[test]
fn test_exact_hit_returns_keyframe_verbatim() {
    let frames = vec![
        TimedFrame::new(0.0, Vec3::ZERO),
        TimedFrame::new(1.0, Vec3::new(1.0, 2.0, 3.0)),
        TimedFrame::new(2.0, Vec3::ZERO),
    ];
    let options = SamplingOptions::default();

    for time in [1.0 - 1e-7, 1.0, 1.0 + 1e-7] {
        let frame = find_nearest_transform(time, &frames, &options).unwrap();
        assert_eq!(frame.value, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(frame.time, 1.0);
    }
}

#[test]
fn test_timestamp_modes() {
    let frames = slide_frames();
    let query = find_nearest_transform(0.5, &frames, &SamplingOptions::default()).unwrap();
    assert_eq!(query.time, 0.5);

    let options = SamplingOptions {
        timestamp: TimestampMode::Recomputed,
        ..SamplingOptions::default()
    };
    let recomputed = find_nearest_transform(0.5, &frames, &options).unwrap();
    assert!((recomputed.time - 0.5).abs() < 1e-6);
}

#[test]
fn test_clip_sampling_merges_channels() {
    let action = SkeletalAction::new("Wave", 1.0).with_track(
        BoneTrack::new("Arm", "arm")
            .with_position(0.0, Vec3::ZERO)
            .with_rotation(0.25, Quat::IDENTITY)
            .with_rotation(0.75, Quat::from_rotation_z(1.0))
            .with_scale(1.0, Vec3::splat(2.0)),
    );

    let pose = action.sample_at(0.5);
    let arm = pose.bone_transform("arm").unwrap();
    assert_eq!(arm.position, Some(Vec3::ZERO));
    assert_quat_near(arm.rotation.unwrap(), Quat::from_rotation_z(0.5));
    assert_eq!(arm.scale, Some(Vec3::splat(2.0)));
}

#[test]
fn test_walk_clip_pose() {
    let pose = walk_action().sample_at(0.5);
    assert_eq!(pose.len(), 2);
    assert_eq!(
        pose.bone_transform("hips").unwrap().position,
        Some(Vec3::new(2.5, 0.0, 0.0))
    );
    assert!(pose.bone_transform("spine").unwrap().position.is_none());
}

#[test]
fn test_authored_keyframes_match_track_sampling() {
    let authored = [
        KeyFrame::new(0.0).with_bone("hips", BoneFrameTransform::from_position(Vec3::ZERO)),
        KeyFrame::new(2.0)
            .with_bone("hips", BoneFrameTransform::from_position(Vec3::new(10.0, 0.0, 0.0))),
    ];
    let from_keyframes = SkeletalAction::from_keyframes("Walk", 2.0, &authored);

    for time in [0.0, 0.3, 1.0, 1.7, 2.0] {
        let expected = walk_action().sample_at(time);
        let actual = from_keyframes.sample_at(time);
        assert_eq!(
            actual.bone_transform("hips"),
            expected.bone_transform("hips"),
            "mismatch at {time}"
        );
    }
}

#[test]
fn test_pose_interpolation_matches_clip_sampling() {
    let action = walk_action();
    let prev = action.sample_at(0.0);
    let next = action.sample_at(1.0);

    let blended = KeyFrame::interpolate(0.5, &prev, &next);
    let sampled = action.sample_at(0.5);

    let hips = blended.bone_transform("hips").unwrap().position.unwrap();
    assert!(hips.abs_diff_eq(sampled.bone_transform("hips").unwrap().position.unwrap(), 1e-5));
    assert_quat_near(
        blended.bone_transform("spine").unwrap().rotation.unwrap(),
        sampled.bone_transform("spine").unwrap().rotation.unwrap(),
    );
}

fn rotation_frames() -> Vec<RotationFrame> {
    vec![
        TimedFrame::new(0.0, Quat::from_rotation_x(0.3)),
        TimedFrame::new(1.0, Quat::from_rotation_y(2.5)),
        TimedFrame::new(3.0, Quat::from_rotation_z(-1.2)),
    ]
}

proptest! {
    #[test]
    fn test_slerp_output_is_normalized(time in -1.0f32..4.0) {
        let frame = find_nearest_transform(time, &rotation_frames(), &SamplingOptions::default()).unwrap();
        prop_assert!((frame.value.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_clamping_is_idempotent(offset in 0.0f32..1000.0) {
        let frames = slide_frames();
        let options = SamplingOptions::default();

        let before = find_nearest_transform(-offset, &frames, &options).unwrap();
        prop_assert_eq!(before.value, Vec3::ZERO);

        let after = find_nearest_transform(2.0 + offset, &frames, &options).unwrap();
        prop_assert_eq!(after.value, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_linear_channel_stays_within_bounds(time in 0.0f32..2.0) {
        let frame = find_nearest_transform(time, &slide_frames(), &SamplingOptions::default()).unwrap();
        prop_assert!((0.0..=10.0).contains(&frame.value.x));
        prop_assert!((frame.value.x - time * 5.0).abs() < 1e-4);
    }
}
