//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic, so they can be shared by the
//! rules engine, the input controller and any host that renders or syncs state.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn anchor**: (5, -2), two rows above the visible field
//!
//! # Timing Constants
//!
//! Timing values are in seconds, matching the per-frame elapsed time a host
//! passes to the engine:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SOFT_DROP_INTERVAL_CAP_SECS` | 0.04 | Upper bound on the gravity interval while soft dropping |
//! | `MOVE_REPEAT_DELAY_SECS` | 0.2 | Hold time before a held move key starts repeating |
//! | `MOVE_REPEAT_RESET_SECS` | 0.1 | Value the repeat timer is reset to after each repeat |
//!
//! # Examples
//!
//! ```
//! use tetros_types::{InputAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.id(), 3);
//!
//! assert_eq!(Rotation::from_turns(-1), Rotation::West);
//! assert_eq!(InputAction::from_str("hardDrop"), Some(InputAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Total number of cells on the board
pub const BOARD_SIZE: usize = BOARD_WIDTH as usize * BOARD_HEIGHT as usize;

/// Number of upcoming pieces kept visible in the next-piece queue
pub const QUEUE_LENGTH: usize = 5;

/// Spawn anchor column
pub const SPAWN_X: i8 = 5;

/// Spawn anchor row (above the visible field)
pub const SPAWN_Y: i8 = -2;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 20;

/// Lines required to leave level 1
pub const INITIAL_LINES_NEEDED: i32 = 10;

/// Soft drop never waits longer than this between forced drops
pub const SOFT_DROP_INTERVAL_CAP_SECS: f32 = 0.04;

/// Held horizontal input starts repeating once its timer passes this value
pub const MOVE_REPEAT_DELAY_SECS: f32 = 0.2;

/// Timer value after each auto-repeat (repeat period = delay - reset)
pub const MOVE_REPEAT_RESET_SECS: f32 = 0.1;

/// The seven tetromino piece kinds
///
/// Wire ids start at 1 so that 0 can stand for an empty cell:
/// I=1, O=2, T=3, S=4, Z=5, J=6, L=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All piece kinds in bag order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Small integer used on the wire (never 0).
    pub const fn id(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::id`]. Returns `None` for 0 and unknown ids.
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::J),
            7 => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use tetros_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Wire id of an optional piece kind (0 = none).
pub fn cell_id(cell: Option<PieceKind>) -> u8 {
    cell.map_or(0, PieceKind::id)
}

/// Rotation states (North = spawn orientation), indexed 0..3 clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// All rotations in index order.
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Normalise any number of quarter turns into a rotation state.
    pub fn from_turns(turns: i32) -> Self {
        Self::ALL[turns.rem_euclid(4) as usize]
    }

    /// Rotation index in 0..4
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Rotation after `direction` quarter turns (positive = clockwise).
    pub fn turned(self, direction: i32) -> Self {
        Self::from_turns(self as i32 + direction.rem_euclid(4))
    }
}

/// Player-issued actions, as polled from an input device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    RotateLeft,
    RotateRight,
    SoftDrop,
    HardDrop,
    Hold,
}

impl InputAction {
    /// Every action, in polling order.
    pub const ALL: [InputAction; 7] = [
        InputAction::MoveLeft,
        InputAction::MoveRight,
        InputAction::RotateLeft,
        InputAction::RotateRight,
        InputAction::SoftDrop,
        InputAction::HardDrop,
        InputAction::Hold,
    ];

    /// Parse action from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(InputAction::MoveLeft),
            "moveright" => Some(InputAction::MoveRight),
            "rotateleft" => Some(InputAction::RotateLeft),
            "rotateright" => Some(InputAction::RotateRight),
            "softdrop" => Some(InputAction::SoftDrop),
            "harddrop" => Some(InputAction::HardDrop),
            "hold" => Some(InputAction::Hold),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            InputAction::MoveLeft => "moveLeft",
            InputAction::MoveRight => "moveRight",
            InputAction::RotateLeft => "rotateLeft",
            InputAction::RotateRight => "rotateRight",
            InputAction::SoftDrop => "softDrop",
            InputAction::HardDrop => "hardDrop",
            InputAction::Hold => "hold",
        }
    }
}

/// Cell on the board (None = empty, Some = filled with piece kind)
pub type Cell = Option<PieceKind>;
