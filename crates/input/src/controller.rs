//! Frame input handler with horizontal auto-repeat.
//!
//! Per frame, at most one of these happens: a hard drop, a hold, or the
//! regular group (left, right, rotations and the soft drop level). A move
//! fires on press and, while the key stays down, again each time its timer
//! passes the repeat delay; the timer then restarts part-way, which makes the
//! repeat period `delay - reset`.

use arrayvec::ArrayVec;
use tracing::trace;

use tetros_core::{GameConfig, GameState};

use crate::source::InputSource;
use crate::types::{InputAction, MOVE_REPEAT_DELAY_SECS, MOVE_REPEAT_RESET_SECS};

/// Actions applied during one poll
pub type AppliedActions = ArrayVec<InputAction, 8>;

/// Turns polled input into engine operations.
#[derive(Debug, Clone)]
pub struct InputController {
    left_timer: f32,
    right_timer: f32,
    fast_drop: bool,
    repeat_delay: f32,
    repeat_reset: f32,
}

impl Default for InputController {
    fn default() -> Self {
        Self::new()
    }
}

impl InputController {
    pub fn new() -> Self {
        Self::with_repeat(MOVE_REPEAT_DELAY_SECS, MOVE_REPEAT_RESET_SECS)
    }

    /// Use the repeat timings of `config`
    pub fn from_config(config: &GameConfig) -> Self {
        Self::with_repeat(config.move_repeat_delay_secs, config.move_repeat_reset_secs)
    }

    pub fn with_repeat(repeat_delay: f32, repeat_reset: f32) -> Self {
        Self {
            left_timer: 0.0,
            right_timer: 0.0,
            fast_drop: false,
            repeat_delay,
            repeat_reset,
        }
    }

    /// Soft drop state to pass to the next gravity tick
    pub fn fast_drop(&self) -> bool {
        self.fast_drop
    }

    /// Read `input` and apply it to `game`. Returns the actions applied.
    pub fn poll<S>(&mut self, game: &mut GameState, input: &mut S, elapsed: f32) -> AppliedActions
    where
        S: InputSource + ?Sized,
    {
        let mut applied = AppliedActions::new();
        self.left_timer += elapsed;
        self.right_timer += elapsed;

        if game.is_playing() {
            self.apply(game, input, &mut applied);
        }

        input.end_frame();
        applied
    }

    /// Poll input, then advance gravity by the same `elapsed`
    pub fn frame<S>(&mut self, game: &mut GameState, input: &mut S, elapsed: f32) -> AppliedActions
    where
        S: InputSource + ?Sized,
    {
        let applied = self.poll(game, input, elapsed);
        game.tick(elapsed, self.fast_drop);
        applied
    }

    fn apply<S>(&mut self, game: &mut GameState, input: &S, applied: &mut AppliedActions)
    where
        S: InputSource + ?Sized,
    {
        if input.was_pressed(InputAction::HardDrop) {
            game.hard_drop();
            applied.push(InputAction::HardDrop);
        } else if input.was_pressed(InputAction::Hold) {
            game.hold();
            applied.push(InputAction::Hold);
        } else {
            if self.should_move(input, InputAction::MoveLeft) {
                game.move_horizontal(-1);
                applied.push(InputAction::MoveLeft);
            }
            if self.should_move(input, InputAction::MoveRight) {
                game.move_horizontal(1);
                applied.push(InputAction::MoveRight);
            }
            if input.was_pressed(InputAction::RotateRight) {
                game.rotate(1);
                applied.push(InputAction::RotateRight);
            }
            if input.was_pressed(InputAction::RotateLeft) {
                game.rotate(-1);
                applied.push(InputAction::RotateLeft);
            }
            self.fast_drop = input.is_down(InputAction::SoftDrop);
        }

        if !applied.is_empty() {
            trace!(actions = ?applied.as_slice(), fast_drop = self.fast_drop, "input applied");
        }
    }

    /// Press fires at once; a held key fires again after the repeat delay.
    fn should_move<S>(&mut self, input: &S, action: InputAction) -> bool
    where
        S: InputSource + ?Sized,
    {
        let timer = match action {
            InputAction::MoveLeft => &mut self.left_timer,
            _ => &mut self.right_timer,
        };

        if input.was_pressed(action) {
            *timer = 0.0;
            true
        } else if input.is_down(action) && *timer > self.repeat_delay {
            *timer = self.repeat_reset;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScriptedInput;
    use crate::types::PieceKind;
    use tetros_core::Tetromino;

    const FRAME: f32 = 1.0 / 60.0;

    fn playing() -> GameState {
        let mut game = GameState::with_seed(11);
        game.start_game();
        game.set_player(Some(Tetromino::new(PieceKind::O, 4, 5)));
        game
    }

    #[test]
    fn test_press_moves_once() {
        let mut game = playing();
        let mut controller = InputController::new();
        let mut input = ScriptedInput::new();

        input.tap(InputAction::MoveRight);
        let applied = controller.poll(&mut game, &mut input, FRAME);
        assert_eq!(applied.as_slice(), &[InputAction::MoveRight]);
        assert_eq!(game.active().unwrap().x, 5);

        let applied = controller.poll(&mut game, &mut input, FRAME);
        assert!(applied.is_empty());
    }

    #[test]
    fn test_held_move_repeats_after_delay() {
        let mut game = playing();
        let mut controller = InputController::new();
        let mut input = ScriptedInput::new();

        input.press(InputAction::MoveLeft);
        controller.poll(&mut game, &mut input, FRAME);
        assert_eq!(game.active().unwrap().x, 3);

        // 0.15 s held: still inside the delay
        controller.poll(&mut game, &mut input, 0.15);
        assert_eq!(game.active().unwrap().x, 3);

        controller.poll(&mut game, &mut input, 0.1);
        assert_eq!(game.active().unwrap().x, 2);

        // timer restarted at 0.1, so the next repeat needs just over 0.1 s
        controller.poll(&mut game, &mut input, 0.05);
        assert_eq!(game.active().unwrap().x, 2);
        controller.poll(&mut game, &mut input, 0.06);
        assert_eq!(game.active().unwrap().x, 1);
    }

    #[test]
    fn test_hard_drop_takes_priority() {
        let mut game = playing();
        let mut controller = InputController::new();
        let mut input = ScriptedInput::new();

        input.tap(InputAction::HardDrop);
        input.tap(InputAction::Hold);
        input.tap(InputAction::MoveLeft);
        let applied = controller.poll(&mut game, &mut input, FRAME);

        assert_eq!(applied.as_slice(), &[InputAction::HardDrop]);
        assert_eq!(game.board().filled_count(), 4);
        assert_eq!(game.hold_piece(), None);
    }

    #[test]
    fn test_soft_drop_follows_key_level() {
        let mut game = playing();
        let mut controller = InputController::new();
        let mut input = ScriptedInput::new();

        input.press(InputAction::SoftDrop);
        controller.poll(&mut game, &mut input, FRAME);
        assert!(controller.fast_drop());

        input.release(InputAction::SoftDrop);
        controller.poll(&mut game, &mut input, FRAME);
        assert!(!controller.fast_drop());
    }

    #[test]
    fn test_idle_game_ignores_input() {
        let mut game = GameState::with_seed(11);
        let mut controller = InputController::new();
        let mut input = ScriptedInput::new();

        input.tap(InputAction::HardDrop);
        let applied = controller.frame(&mut game, &mut input, FRAME);
        assert!(applied.is_empty());
        assert!(!input.was_pressed(InputAction::HardDrop));
    }
}
