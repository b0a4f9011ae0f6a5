//! Events module - notifications the engine sends to its collaborators
//!
//! The engine never knows how it is displayed, heard or synced. Hosts register
//! a [`GameListener`] for state notifications and a [`SoundSink`] for audio
//! cues. Every payload is a copy or a shared borrow, so a listener can never
//! reach back into engine state.

use std::cell::RefCell;
use std::rc::Rc;

use crate::snapshot::PlayerSnapshot;
use crate::types::{Cell, PieceKind, BOARD_SIZE};

/// Receives state-change notifications from the engine
///
/// All methods default to doing nothing, so listeners only implement what
/// they care about.
pub trait GameListener {
    fn on_board_changed(&mut self, _cells: &[Cell; BOARD_SIZE]) {}

    fn on_player_state_changed(&mut self, _player: PlayerSnapshot) {}

    fn on_held_piece_changed(&mut self, _kind: Option<PieceKind>) {}

    fn on_queue_changed(&mut self, _kinds: &[PieceKind]) {}

    fn on_score_changed(&mut self, _score: u64) {}

    fn on_game_started(&mut self) {}

    fn on_game_ended(&mut self, _final_score: u64) {}
}

/// Named audio cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Move,
    Rotate,
    Place,
    Line,
    /// Four lines at once.
    Tetros,
    Hold,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Move => "tetros_move",
            SoundCue::Rotate => "tetros_rotate",
            SoundCue::Place => "tetros_place",
            SoundCue::Line => "tetros_line",
            SoundCue::Tetros => "tetros_tetros",
            SoundCue::Hold => "tetros_hold",
        }
    }
}

/// Plays audio cues; `pitch` is a multiplier where 1.0 is unchanged
pub trait SoundSink {
    fn play_sound(&mut self, cue: SoundCue, pitch: f32);
}

/// Listener that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullListener;

impl GameListener for NullListener {}

/// Sound sink that stays silent
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSound;

impl SoundSink for NullSound {
    fn play_sound(&mut self, _cue: SoundCue, _pitch: f32) {}
}

/// One recorded notification or sound cue
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    BoardChanged(Box<[Cell; BOARD_SIZE]>),
    PlayerStateChanged(PlayerSnapshot),
    HeldPieceChanged(Option<PieceKind>),
    QueueChanged(Vec<PieceKind>),
    ScoreChanged(u64),
    GameStarted,
    GameEnded(u64),
    Sound { cue: SoundCue, pitch: f32 },
}

/// Records every notification and sound cue it receives.
///
/// Clones share the same log, so a host (or a test) can keep one handle and
/// give another to the engine.
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: GameEvent) {
        self.events.borrow_mut().push(event);
    }

    /// Copy of everything recorded so far
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    /// Remove and return everything recorded so far
    pub fn take(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Number of recorded events matching `predicate`
    pub fn count(&self, predicate: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| predicate(e)).count()
    }

    /// Recorded sound cues, in order
    pub fn sounds(&self) -> Vec<(SoundCue, f32)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                GameEvent::Sound { cue, pitch } => Some((*cue, *pitch)),
                _ => None,
            })
            .collect()
    }
}

impl GameListener for RecordingListener {
    fn on_board_changed(&mut self, cells: &[Cell; BOARD_SIZE]) {
        self.push(GameEvent::BoardChanged(Box::new(*cells)));
    }

    fn on_player_state_changed(&mut self, player: PlayerSnapshot) {
        self.push(GameEvent::PlayerStateChanged(player));
    }

    fn on_held_piece_changed(&mut self, kind: Option<PieceKind>) {
        self.push(GameEvent::HeldPieceChanged(kind));
    }

    fn on_queue_changed(&mut self, kinds: &[PieceKind]) {
        self.push(GameEvent::QueueChanged(kinds.to_vec()));
    }

    fn on_score_changed(&mut self, score: u64) {
        self.push(GameEvent::ScoreChanged(score));
    }

    fn on_game_started(&mut self) {
        self.push(GameEvent::GameStarted);
    }

    fn on_game_ended(&mut self, final_score: u64) {
        self.push(GameEvent::GameEnded(final_score));
    }
}

impl SoundSink for RecordingListener {
    fn play_sound(&mut self, cue: SoundCue, pitch: f32) {
        self.push(GameEvent::Sound { cue, pitch });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_clones_share_log() {
        let recorder = RecordingListener::new();
        let mut handle = recorder.clone();

        handle.on_score_changed(40);
        handle.play_sound(SoundCue::Hold, 1.0);

        assert_eq!(recorder.events().len(), 2);
        assert_eq!(recorder.sounds(), vec![(SoundCue::Hold, 1.0)]);
        assert_eq!(
            recorder.count(|e| matches!(e, GameEvent::ScoreChanged(40))),
            1
        );

        let taken = recorder.take();
        assert_eq!(taken.len(), 2);
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn test_cue_names() {
        assert_eq!(SoundCue::Tetros.as_str(), "tetros_tetros");
        assert_eq!(SoundCue::Move.as_str(), "tetros_move");
    }
}
