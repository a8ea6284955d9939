//! Playback control driving a posed model

use std::time::Duration;

use glam::Vec3;
use pretty_assertions::assert_eq;
use skelanim::{ActionPlayer, ManualClock, Model, PlaybackState};
use test_case::test_case;

use crate::common::{assert_vec3_near, biped_model, walk_action};

fn walk_player() -> (ActionPlayer<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let mut player = ActionPlayer::with_clock(clock.clone());
    player.set_action(&biped_model(), walk_action());
    (player, clock)
}

#[test_case(true, 2.5, 0.5, true ; "looping wraps")]
#[test_case(false, 3.0, 2.0, false ; "one shot clamps and stops")]
#[test_case(true, 2.0, 2.0, true ; "looping lands on end")]
#[test_case(true, 4.5, 0.5, true ; "looping wraps twice")]
fn test_advance(looping: bool, delta: f32, expected_time: f32, still_playing: bool) {
    let (mut player, _clock) = walk_player();
    player.play(looping);
    player.advance(delta);

    assert!((player.current_time() - expected_time).abs() < 1e-5);
    assert_eq!(player.is_playing(), still_playing);
}

#[test]
fn test_progress_stays_in_bounds() {
    let (mut player, _clock) = walk_player();
    player.play(true);

    for _ in 0..50 {
        player.advance(0.37);
        let progress = player.progress();
        assert!((0.0..=1.0).contains(&progress), "progress {progress} out of bounds");
    }
}

#[test]
fn test_state_transitions() {
    let (mut player, clock) = walk_player();
    assert_eq!(player.state(), PlaybackState::Stopped);

    player.play(false);
    assert_eq!(player.state(), PlaybackState::Playing);

    clock.advance(Duration::from_millis(500));
    player.update();
    player.pause();
    assert_eq!(player.state(), PlaybackState::Paused);

    player.stop();
    assert_eq!(player.state(), PlaybackState::Stopped);
    assert_eq!(player.current_time(), 0.0);
}

#[test]
fn test_update_poses_the_skeleton() {
    let clock = ManualClock::new();
    let model = biped_model();
    let mut player = ActionPlayer::with_clock(clock.clone());
    player.set_action(&model, walk_action());
    player.play(false);

    clock.advance_secs(1.0);
    player.update();

    let model = model.borrow();
    let skeleton = model.skeleton.as_ref().unwrap();
    let hips = skeleton.find_bone_by_id("hips").unwrap();
    assert_vec3_near(hips.pose_matrix().w_axis.truncate(), Vec3::new(5.0, 0.0, 0.0));

    // The spine keeps its rest offset and is carried by the hips
    let spine = skeleton.find_bone_by_id("spine").unwrap();
    assert_vec3_near(spine.pose_matrix().w_axis.truncate(), Vec3::new(5.0, 1.0, 0.0));
}

#[test]
fn test_reset_timer_discards_elapsed_time() {
    let (mut player, clock) = walk_player();
    player.play(false);

    clock.advance_secs(1.0);
    player.reset_timer();
    player.update();
    assert_eq!(player.current_time(), 0.0);
}

#[test]
fn test_rebinding_resets_time() {
    let (mut player, _clock) = walk_player();
    player.play(true);
    player.advance(1.2);

    let other = Model::new("Other").into_ref();
    player.set_action(&other, walk_action());
    assert_eq!(player.current_time(), 0.0);
    assert!(other.borrow().action.is_some());
}

#[test]
fn test_model_without_skeleton_still_plays() {
    let model = Model::new("Prop").into_ref();
    let mut player = ActionPlayer::with_clock(ManualClock::new());
    player.set_action(&model, walk_action());
    player.play(false);
    player.advance(1.0);

    let keyframe = player.current_key_frame().unwrap();
    assert_eq!(keyframe.time, 1.0);
    assert!(keyframe.has_bone("hips"));
}
