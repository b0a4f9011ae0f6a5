//! Input controller integration tests

use tetros::core::{GameConfig, GameEvent, GameState, RecordingListener, Tetromino};
use tetros::input::{InputController, InputSource, ScriptedInput};
use tetros::types::{InputAction, PieceKind};

const FRAME: f32 = 1.0 / 60.0;

fn playing() -> (GameState, RecordingListener) {
    let recorder = RecordingListener::new();
    let mut game = GameState::with_seed(21).with_listener(recorder.clone());
    game.start_game();
    game.set_player(Some(Tetromino::new(PieceKind::T, 5, 8)));
    recorder.clear();
    (game, recorder)
}

#[test]
fn test_hold_beats_movement() {
    let (mut game, _) = playing();
    let mut controller = InputController::new();
    let mut input = ScriptedInput::new();

    input.tap(InputAction::Hold);
    input.tap(InputAction::MoveRight);
    input.tap(InputAction::RotateRight);
    let applied = controller.poll(&mut game, &mut input, FRAME);

    assert_eq!(applied.as_slice(), &[InputAction::Hold]);
    assert_eq!(game.hold_piece(), Some(PieceKind::T));
}

#[test]
fn test_rotations_on_press() {
    let (mut game, _) = playing();
    let mut controller = InputController::new();
    let mut input = ScriptedInput::new();

    input.tap(InputAction::RotateRight);
    controller.poll(&mut game, &mut input, FRAME);
    assert_eq!(game.active().unwrap().rotation.index(), 1);

    input.tap(InputAction::RotateLeft);
    input.tap(InputAction::RotateLeft);
    controller.poll(&mut game, &mut input, FRAME);
    assert_eq!(game.active().unwrap().rotation.index(), 0);
}

#[test]
fn test_both_directions_in_one_frame() {
    let (mut game, recorder) = playing();
    let mut controller = InputController::new();
    let mut input = ScriptedInput::new();

    input.tap(InputAction::MoveLeft);
    input.tap(InputAction::MoveRight);
    let applied = controller.poll(&mut game, &mut input, FRAME);

    assert_eq!(
        applied.as_slice(),
        &[InputAction::MoveLeft, InputAction::MoveRight]
    );
    assert_eq!(game.active().unwrap().x, 5);
    assert_eq!(
        recorder.count(|e| matches!(e, GameEvent::PlayerStateChanged(_))),
        2
    );
}

#[test]
fn test_held_key_repeats_at_config_rate() {
    let (mut game, _) = playing();
    let config = GameConfig {
        move_repeat_delay_secs: 0.1,
        move_repeat_reset_secs: 0.05,
        ..GameConfig::default()
    };
    let mut controller = InputController::from_config(&config);
    let mut input = ScriptedInput::new();

    input.press(InputAction::MoveLeft);
    controller.poll(&mut game, &mut input, FRAME);
    assert_eq!(game.active().unwrap().x, 4);

    controller.poll(&mut game, &mut input, 0.11);
    assert_eq!(game.active().unwrap().x, 3);

    // timer restarted at 0.05: 0.06 more passes the delay
    controller.poll(&mut game, &mut input, 0.06);
    assert_eq!(game.active().unwrap().x, 2);

    input.release(InputAction::MoveLeft);
    controller.poll(&mut game, &mut input, 1.0);
    assert_eq!(game.active().unwrap().x, 2);
}

#[test]
fn test_frame_applies_soft_drop_to_gravity() {
    let (mut game, _) = playing();
    let mut controller = InputController::new();
    let mut input = ScriptedInput::new();

    input.press(InputAction::SoftDrop);
    // soft drop interval at level 1 is 0.04 s
    for _ in 0..3 {
        controller.frame(&mut game, &mut input, FRAME);
    }
    assert_eq!(game.active().unwrap().y, 9);
    assert_eq!(game.score(), 1);
}

#[test]
fn test_soft_drop_state_kept_through_hard_drop_frame() {
    let (mut game, _) = playing();
    let mut controller = InputController::new();
    let mut input = ScriptedInput::new();

    input.press(InputAction::SoftDrop);
    controller.poll(&mut game, &mut input, FRAME);
    assert!(controller.fast_drop());

    input.release(InputAction::SoftDrop);
    input.tap(InputAction::HardDrop);
    controller.poll(&mut game, &mut input, FRAME);
    // only the regular group updates the soft drop level
    assert!(controller.fast_drop());
}

#[test]
fn test_poll_ends_the_frame() {
    let (mut game, _) = playing();
    let mut controller = InputController::new();
    let mut input = ScriptedInput::new();

    input.press(InputAction::RotateRight);
    controller.poll(&mut game, &mut input, FRAME);
    assert!(!input.was_pressed(InputAction::RotateRight));
    assert!(input.is_down(InputAction::RotateRight));
}
