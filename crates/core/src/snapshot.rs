use serde::{Deserialize, Serialize};

use crate::game_state::Tetromino;
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, QUEUE_LENGTH};

/// Position of the falling piece as seen by listeners.
///
/// `kind == None` means no piece is in play (between lock and spawn, or idle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub kind: Option<PieceKind>,
    pub x: i8,
    pub y: i8,
    pub rotation: Rotation,
}

impl From<Tetromino> for PlayerSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: Some(value.kind),
            x: value.x,
            y: value.y,
            rotation: value.rotation,
        }
    }
}

impl PlayerSnapshot {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<PlayerSnapshot>,
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub next_queue: Vec<PieceKind>,
    pub can_hold: bool,
    pub playing: bool,
    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    pub lines_needed: i32,
    pub combo: i32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            hold: None,
            next_queue: Vec::with_capacity(QUEUE_LENGTH),
            can_hold: true,
            playing: false,
            score: 0,
            high_score: 0,
            level: 1,
            lines_needed: 0,
            combo: -1,
        }
    }
}
