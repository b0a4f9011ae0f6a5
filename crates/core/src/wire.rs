//! Wire module - compact encodings of notification payloads for host sync
//!
//! Boards and queues travel as digit strings, one wire id per character
//! (`0` = empty, `1..=7` = I, O, T, S, Z, J, L). [`SyncMessage`] wraps each
//! notification in a tagged JSON object and [`JsonLinesSync`] streams them as
//! line-delimited JSON to any writer.

use std::fmt;
use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::events::GameListener;
use crate::snapshot::PlayerSnapshot;
use crate::types::{cell_id, Cell, PieceKind, Rotation, BOARD_SIZE};

/// An error that can be returned when decoding a wire payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireError {
    /// A character that is not a decimal digit.
    InvalidDigit { index: usize, found: char },
    /// A digit that does not name a piece kind.
    UnknownPiece { index: usize, id: u8 },
    /// Payload length differs from the expected cell count.
    WrongLength { expected: usize, found: usize },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::InvalidDigit { index, found } => {
                write!(f, "invalid digit {found:?} at index {index}")
            }
            WireError::UnknownPiece { index, id } => {
                write!(f, "unknown piece id {id} at index {index}")
            }
            WireError::WrongLength { expected, found } => {
                write!(f, "expected {expected} cells, found {found}")
            }
        }
    }
}

impl std::error::Error for WireError {}

/// Encode small integers (0..=9) as a digit string
pub fn encode_digits(values: &[u8]) -> String {
    values
        .iter()
        .map(|&v| char::from_digit(u32::from(v), 10).unwrap_or('0'))
        .collect()
}

/// Decode a digit string back into integers
pub fn decode_digits(text: &str) -> Result<Vec<u8>, WireError> {
    text.chars()
        .enumerate()
        .map(|(index, ch)| {
            ch.to_digit(10)
                .map(|d| d as u8)
                .ok_or(WireError::InvalidDigit { index, found: ch })
        })
        .collect()
}

/// Encode a board as 200 digits
pub fn encode_board(cells: &[Cell; BOARD_SIZE]) -> String {
    encode_digits(&cells.map(cell_id))
}

/// Decode a 200-digit board string
pub fn decode_board(text: &str) -> Result<[Cell; BOARD_SIZE], WireError> {
    let ids = decode_digits(text)?;
    if ids.len() != BOARD_SIZE {
        return Err(WireError::WrongLength {
            expected: BOARD_SIZE,
            found: ids.len(),
        });
    }

    let mut cells = [None; BOARD_SIZE];
    for (index, (&id, cell)) in ids.iter().zip(cells.iter_mut()).enumerate() {
        if id != 0 {
            *cell = Some(PieceKind::from_id(id).ok_or(WireError::UnknownPiece { index, id })?);
        }
    }
    Ok(cells)
}

/// Encode a queue of piece kinds
pub fn encode_queue(kinds: &[PieceKind]) -> String {
    let ids: Vec<u8> = kinds.iter().map(|k| k.id()).collect();
    encode_digits(&ids)
}

/// Decode a queue string; every digit must name a piece
pub fn decode_queue(text: &str) -> Result<Vec<PieceKind>, WireError> {
    decode_digits(text)?
        .into_iter()
        .enumerate()
        .map(|(index, id)| PieceKind::from_id(id).ok_or(WireError::UnknownPiece { index, id }))
        .collect()
}

/// One notification in host-sync form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncMessage {
    Board { cells: String },
    Player { kind: u8, x: i8, y: i8, rotation: u8 },
    Held { kind: u8 },
    Queue { kinds: String },
    Score { score: u64 },
    Started,
    Ended { score: u64 },
}

impl SyncMessage {
    pub fn player(player: PlayerSnapshot) -> Self {
        SyncMessage::Player {
            kind: cell_id(player.kind),
            x: player.x,
            y: player.y,
            rotation: player.rotation.index(),
        }
    }

    /// Rebuild the player snapshot carried by a `Player` message
    pub fn to_player(&self) -> Option<PlayerSnapshot> {
        match *self {
            SyncMessage::Player {
                kind,
                x,
                y,
                rotation,
            } => Some(PlayerSnapshot {
                kind: PieceKind::from_id(kind),
                x,
                y,
                rotation: Rotation::from_turns(i32::from(rotation)),
            }),
            _ => None,
        }
    }
}

/// Streams every notification as one JSON object per line.
///
/// Listener callbacks cannot fail, so write errors are logged and counted.
#[derive(Debug)]
pub struct JsonLinesSync<W: Write> {
    out: W,
    failures: u64,
}

impl<W: Write> JsonLinesSync<W> {
    pub fn new(out: W) -> Self {
        Self { out, failures: 0 }
    }

    /// Number of messages that could not be written
    pub fn failures(&self) -> u64 {
        self.failures
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn send(&mut self, message: SyncMessage) {
        let result = serde_json::to_writer(&mut self.out, &message)
            .map_err(std::io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(e) = result {
            self.failures += 1;
            warn!(error = %e, ?message, "sync write failed");
        }
    }
}

impl<W: Write> GameListener for JsonLinesSync<W> {
    fn on_board_changed(&mut self, cells: &[Cell; BOARD_SIZE]) {
        self.send(SyncMessage::Board {
            cells: encode_board(cells),
        });
    }

    fn on_player_state_changed(&mut self, player: PlayerSnapshot) {
        self.send(SyncMessage::player(player));
    }

    fn on_held_piece_changed(&mut self, kind: Option<PieceKind>) {
        self.send(SyncMessage::Held {
            kind: cell_id(kind),
        });
    }

    fn on_queue_changed(&mut self, kinds: &[PieceKind]) {
        self.send(SyncMessage::Queue {
            kinds: encode_queue(kinds),
        });
    }

    fn on_score_changed(&mut self, score: u64) {
        self.send(SyncMessage::Score { score });
    }

    fn on_game_started(&mut self) {
        self.send(SyncMessage::Started);
    }

    fn on_game_ended(&mut self, final_score: u64) {
        self.send(SyncMessage::Ended { score: final_score });
    }
}
