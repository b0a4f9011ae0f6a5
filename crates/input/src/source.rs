//! Polled input state.

use arrayvec::ArrayVec;

use crate::types::InputAction;

const ACTION_COUNT: usize = InputAction::ALL.len();

/// Current state of the player's controls
pub trait InputSource {
    /// Whether `action` went down since the last frame
    fn was_pressed(&self, action: InputAction) -> bool;

    /// Whether `action` is currently held
    fn is_down(&self, action: InputAction) -> bool;

    /// Called once after every poll; edge-triggered state ends here.
    fn end_frame(&mut self) {}
}

/// In-memory input state driven by code: tests, replays and bots.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    pressed: ArrayVec<InputAction, ACTION_COUNT>,
    down: ArrayVec<InputAction, ACTION_COUNT>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press `action` this frame; it stays down until released
    pub fn press(&mut self, action: InputAction) {
        if !self.pressed.contains(&action) {
            self.pressed.push(action);
        }
        if !self.down.contains(&action) {
            self.down.push(action);
        }
    }

    /// Press and release within the same frame
    pub fn tap(&mut self, action: InputAction) {
        self.press(action);
        self.release(action);
    }

    pub fn release(&mut self, action: InputAction) {
        self.down.retain(|a| *a != action);
    }

    /// Release everything
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.down.clear();
    }
}

impl InputSource for ScriptedInput {
    fn was_pressed(&self, action: InputAction) -> bool {
        self.pressed.contains(&action)
    }

    fn is_down(&self, action: InputAction) -> bool {
        self.down.contains(&action)
    }

    fn end_frame(&mut self) {
        self.pressed.clear();
    }
}
