//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds all the rules of the game and nothing about how it is
//! shown, heard or controlled. Hosts drive it with elapsed time and player
//! intents, and observe it through listener callbacks and snapshots.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision queries and line clearing
//! - [`shapes`]: fixed 4x4 shape table for every kind and rotation
//! - [`rng`]: bag randomizer and the five-piece lookahead queue
//! - [`scoring`]: line awards, combos, level progression and the gravity curve
//! - [`game_state`]: the engine (gravity, lock delay, hold, hard drop, game over)
//! - [`events`]: listener and sound collaborator traits
//! - [`highscore`]: best-score persistence
//! - [`snapshot`]: serialisable read-only views of a session
//! - [`wire`]: digit-string codec and JSON lines sync for hosts
//! - [`config`]: tunables loaded from JSON
//!
//! # Game Rules
//!
//! - **Bag Randomizer**: every run of seven pieces from a fresh batch holds each kind once
//! - **Rotation**: in place, no wall kicks; blocked turns are undone
//! - **Lock Delay**: a resting piece waits an extra quarter interval before it locks
//! - **Hold**: one swap per locked piece
//! - **Scoring**: 100/300/500/800 x level, plus `50 x combo x level` for chains
//! - **Levels**: 1 to 20, gravity from 32/60 s per row down to 1/60 s
//!
//! # Example
//!
//! ```
//! use tetros_core::{GameState, RecordingListener};
//!
//! let recorder = RecordingListener::new();
//! let mut game = GameState::with_seed(12345).with_listener(recorder.clone());
//! game.start_game();
//!
//! // The first gravity step spawns a piece at the top.
//! game.tick(1.0, false);
//! game.move_horizontal(-1);
//! game.rotate(1);
//! game.hard_drop();
//!
//! assert!(game.score() > 0); // hard drop awards points
//! assert!(!recorder.events().is_empty());
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed time in seconds and whether soft drop is held.

pub mod board;
pub mod config;
pub mod events;
pub mod game_state;
pub mod highscore;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;
pub mod wire;

pub use tetros_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::GameConfig;
pub use events::{
    GameEvent, GameListener, NullListener, NullSound, RecordingListener, SoundCue, SoundSink,
};
pub use game_state::{collides, piece_cells, GameState, Tetromino};
pub use highscore::{FileHighScores, HighScoreStore, MemoryHighScores};
pub use rng::{PieceQueue, RandomBag};
pub use scoring::{calculate_score, wait_time, ScoreResult};
pub use shapes::{get_shape, shape_of, Shape};
pub use snapshot::{GameSnapshot, PlayerSnapshot};
pub use wire::{decode_digits, encode_digits, JsonLinesSync, SyncMessage, WireError};
