//! Host sync format tests

use std::io::{self, Write};

use tetros::core::wire::{
    decode_board, decode_digits, decode_queue, encode_board, encode_digits, encode_queue,
    JsonLinesSync, SyncMessage, WireError,
};
use tetros::core::{Board, GameState, PlayerSnapshot, Tetromino};
use tetros::types::{PieceKind, Rotation, BOARD_SIZE};

#[test]
fn test_board_string_layout() {
    let mut board = Board::new();
    board.set_cell(0, 0, PieceKind::T);
    board.set_cell(9, 19, PieceKind::Z);

    let text = encode_board(board.cells());
    assert_eq!(text.len(), BOARD_SIZE);
    assert!(text.starts_with("30000"));
    assert!(text.ends_with("00005"));

    let cells = decode_board(&text).unwrap();
    assert_eq!(Board::from_flat(cells), board);
}

#[test]
fn test_queue_string() {
    let kinds = [PieceKind::I, PieceKind::L, PieceKind::O];
    assert_eq!(encode_queue(&kinds), "172");
    assert_eq!(decode_queue("172").unwrap(), kinds.to_vec());
}

#[test]
fn test_decode_errors() {
    assert_eq!(
        decode_digits("12-4"),
        Err(WireError::InvalidDigit {
            index: 2,
            found: '-'
        })
    );
    let err = decode_board("8".repeat(BOARD_SIZE).as_str()).unwrap_err();
    assert_eq!(err, WireError::UnknownPiece { index: 0, id: 8 });
    assert_eq!(err.to_string(), "unknown piece id 8 at index 0");
    assert_eq!(encode_digits(&[]), "");
}

#[test]
fn test_sync_message_json_shape() {
    let msg = SyncMessage::player(PlayerSnapshot {
        kind: Some(PieceKind::S),
        x: 5,
        y: -2,
        rotation: Rotation::West,
    });
    let json = serde_json::to_string(&msg).unwrap();
    assert_eq!(json, r#"{"type":"player","kind":4,"x":5,"y":-2,"rotation":3}"#);

    let back: SyncMessage = serde_json::from_str(&json).unwrap();
    assert_eq!(back.to_player().unwrap().kind, Some(PieceKind::S));
    assert_eq!(SyncMessage::Started.to_player(), None);
}

#[derive(Clone, Default)]
struct SharedBuffer(std::rc::Rc<std::cell::RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_engine_streams_json_lines() {
    let buffer = SharedBuffer::default();
    let mut game = GameState::with_seed(30).with_listener(JsonLinesSync::new(buffer.clone()));
    game.start_game();
    game.set_player(Some(Tetromino::new(PieceKind::O, 4, 17)));
    game.lock_piece();

    let text = String::from_utf8(buffer.0.borrow().clone()).unwrap();
    let messages: Vec<SyncMessage> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(messages[0], SyncMessage::Started);
    let last_board = messages
        .iter()
        .rev()
        .find_map(|m| match m {
            SyncMessage::Board { cells } => Some(cells.clone()),
            _ => None,
        })
        .unwrap();
    let cells = decode_board(&last_board).unwrap();
    assert_eq!(cells.iter().filter(|c| c.is_some()).count(), 4);
    assert!(messages
        .iter()
        .any(|m| matches!(m, SyncMessage::Queue { kinds } if kinds.len() == 5)));
}

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_failures_are_counted_not_raised() {
    use tetros::core::GameListener;

    let mut sync = JsonLinesSync::new(BrokenPipe);
    sync.on_score_changed(10);
    sync.on_game_ended(10);
    assert_eq!(sync.failures(), 2);
}
