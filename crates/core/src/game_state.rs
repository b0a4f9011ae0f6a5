//! Game state module - the engine that runs one session
//!
//! Ties together the board, shape table, piece queue and scoring. Gravity is
//! driven by [`GameState::tick`]; player intents arrive through
//! [`GameState::move_horizontal`], [`GameState::rotate`],
//! [`GameState::hard_drop`] and [`GameState::hold`]. Every state change is
//! reported to the registered [`GameListener`] and [`SoundSink`].
//!
//! Timing uses a single accumulator in seconds. It grows with elapsed time and
//! triggers a forced drop once it exceeds the level's wait time. A resting
//! piece sets it negative (`-wait / 4`), which gives the player a short grace
//! period before the piece locks. Rotating halves it; a hard drop leaves it at
//! `3 * wait / 4`, so the next piece falls sooner.

use std::fmt;

use tracing::{debug, info, warn};

use crate::board::Board;
use crate::config::GameConfig;
use crate::events::{GameListener, NullListener, NullSound, SoundCue, SoundSink};
use crate::highscore::{HighScoreStore, MemoryHighScores};
use crate::rng::PieceQueue;
use crate::scoring::{
    advance_level, calculate_score, line_clear_pitch, soft_drop_interval, wait_time,
    HARD_DROP_POINTS, SOFT_DROP_POINTS,
};
use crate::shapes::get_shape;
use crate::snapshot::{GameSnapshot, PlayerSnapshot};
use crate::types::{PieceKind, Rotation};

/// Pitch of the movement cue played for each soft-dropped row
pub const SOFT_DROP_PITCH: f32 = 1.5;

/// Board coordinates of a shape anchored at `(x, y)`.
///
/// The anchor sits at local cell (1, 1) of the 4x4 shape box.
pub fn piece_cells(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> [(i8, i8); 4] {
    get_shape(kind, rotation)
        .cells()
        .map(|(lx, ly)| (x + lx - 1, y + ly - 1))
}

/// Whether a piece at `(x, y)` would overlap a wall, the floor or a filled cell.
///
/// Rows above the field never collide.
pub fn collides(board: &Board, kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> bool {
    piece_cells(kind, rotation, x, y)
        .iter()
        .any(|&(cx, cy)| board.is_blocked(cx, cy))
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a piece in its spawn rotation at `(x, y)`
    pub fn new(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// Board coordinates of the four cells
    pub fn cells(&self) -> [(i8, i8); 4] {
        piece_cells(self.kind, self.rotation, self.x, self.y)
    }

    pub fn collides(&self, board: &Board) -> bool {
        collides(board, self.kind, self.rotation, self.x, self.y)
    }

    /// Copy moved by `(dx, dy)`
    pub fn shifted(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Copy turned by `direction` quarter turns
    pub fn turned(self, direction: i32) -> Self {
        Self {
            rotation: self.rotation.turned(direction),
            ..self
        }
    }

    /// Check if the piece is resting on the floor or a filled cell
    pub fn is_grounded(&self, board: &Board) -> bool {
        self.shifted(0, 1).collides(board)
    }
}

/// Complete session state plus the collaborators it reports to
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    hold: Option<PieceKind>,
    just_held: bool,
    queue: PieceQueue,
    score: u64,
    high_score: u64,
    level: u32,
    lines_needed: i32,
    /// Consecutive clearing locks minus one; -1 means no chain.
    combo: i32,
    playing: bool,
    /// Gravity accumulator in seconds.
    timer: f32,
    config: GameConfig,
    listener: Box<dyn GameListener>,
    sound: Box<dyn SoundSink>,
    high_scores: Box<dyn HighScoreStore>,
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("board", &self.board)
            .field("active", &self.active)
            .field("hold", &self.hold)
            .field("just_held", &self.just_held)
            .field("queue", &self.queue.as_slice())
            .field("score", &self.score)
            .field("high_score", &self.high_score)
            .field("level", &self.level)
            .field("lines_needed", &self.lines_needed)
            .field("combo", &self.combo)
            .field("playing", &self.playing)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

fn new_queue(config: &GameConfig) -> PieceQueue {
    match config.seed {
        Some(seed) => PieceQueue::new(seed),
        None => PieceQueue::from_entropy(),
    }
}

impl GameState {
    /// Create an idle game. Call [`GameState::start_game`] to begin playing.
    pub fn new(config: GameConfig) -> Self {
        Self {
            board: Board::new(),
            active: None,
            hold: None,
            just_held: false,
            queue: new_queue(&config),
            score: 0,
            high_score: 0,
            level: 1,
            lines_needed: config.initial_lines_needed,
            combo: -1,
            playing: false,
            timer: 0.0,
            config,
            listener: Box::new(NullListener),
            sound: Box::new(NullSound),
            high_scores: Box::new(MemoryHighScores::default()),
        }
    }

    /// Idle game whose bag is seeded with `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GameConfig::seeded(seed))
    }

    pub fn with_listener(mut self, listener: impl GameListener + 'static) -> Self {
        self.set_listener(listener);
        self
    }

    pub fn with_sound(mut self, sound: impl SoundSink + 'static) -> Self {
        self.set_sound(sound);
        self
    }

    /// Use `store` for the best score and read the current best from it
    pub fn with_high_scores(mut self, store: impl HighScoreStore + 'static) -> Self {
        self.set_high_scores(store);
        self
    }

    pub fn set_listener(&mut self, listener: impl GameListener + 'static) {
        self.listener = Box::new(listener);
    }

    pub fn set_sound(&mut self, sound: impl SoundSink + 'static) {
        self.sound = Box::new(sound);
    }

    pub fn set_high_scores(&mut self, store: impl HighScoreStore + 'static) {
        self.high_scores = Box::new(store);
        self.high_score = self.load_high_score();
    }

    fn load_high_score(&self) -> u64 {
        match self.high_scores.load() {
            Ok(best) => best,
            Err(e) => {
                warn!("failed to load high score: {e:#}");
                self.high_score
            }
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    /// Whether hold was used since the last lock
    pub fn just_held(&self) -> bool {
        self.just_held
    }

    pub fn can_hold(&self) -> bool {
        !self.just_held
    }

    /// Upcoming kinds, front first
    pub fn next_queue(&self) -> &[PieceKind] {
        self.queue.as_slice()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_needed(&self) -> i32 {
        self.lines_needed
    }

    pub fn combo(&self) -> i32 {
        self.combo
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Current gravity accumulator in seconds
    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seconds between forced drops at the current level
    pub fn wait_time(&self) -> f32 {
        wait_time(self.level)
    }

    /// Check a hypothetical placement against the current board
    pub fn collides(&self, kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> bool {
        collides(&self.board, kind, rotation, x, y)
    }

    /// Reset the session and begin playing.
    ///
    /// Calling it twice in a row leaves the same state as calling it once.
    pub fn start_game(&mut self) {
        self.board.clear();
        self.active = None;
        self.hold = None;
        self.just_held = false;
        self.queue = new_queue(&self.config);
        self.queue.initialize();
        self.score = 0;
        self.level = 1;
        self.lines_needed = self.config.initial_lines_needed;
        self.combo = -1;
        self.timer = 0.0;
        self.playing = true;
        self.high_score = self.load_high_score();

        info!(high_score = self.high_score, queue = ?self.queue.as_slice(), "game started");

        self.listener.on_game_started();
        self.notify_all();
    }

    /// Persist the score, report it and return to idle. Does nothing while idle.
    pub fn end_game(&mut self) {
        if !self.playing {
            return;
        }

        let final_score = self.score;
        match self.high_scores.persist_if_greater(final_score) {
            Ok(true) => info!(score = final_score, "new high score"),
            Ok(false) => {}
            Err(e) => warn!("failed to persist high score {final_score}: {e:#}"),
        }
        self.high_score = self.high_score.max(final_score);

        info!(score = final_score, level = self.level, "game over");
        self.listener.on_game_ended(final_score);

        self.active = None;
        self.board.clear();
        self.queue.clear();
        self.hold = None;
        self.just_held = false;
        self.score = 0;
        self.level = 1;
        self.lines_needed = self.config.initial_lines_needed;
        self.combo = -1;
        self.timer = 0.0;
        self.playing = false;

        self.notify_all();
    }

    /// Advance gravity by `elapsed` seconds.
    ///
    /// With `fast_drop` the interval shrinks to the soft drop interval and each
    /// forced row scores [`SOFT_DROP_POINTS`].
    pub fn tick(&mut self, elapsed: f32, fast_drop: bool) {
        if !self.playing {
            return;
        }

        self.timer += elapsed;
        let interval = if fast_drop {
            soft_drop_interval(self.level, self.config.soft_drop_interval_cap_secs)
        } else {
            self.wait_time()
        };
        if self.timer <= interval {
            return;
        }

        match self.active {
            None => self.spawn_piece(),
            Some(piece) => {
                let moved = piece.shifted(0, 1);
                if moved.collides(&self.board) {
                    self.lock_piece();
                } else {
                    self.active = Some(moved);
                    if fast_drop {
                        self.score += SOFT_DROP_POINTS;
                        self.sound.play_sound(SoundCue::Move, SOFT_DROP_PITCH);
                        self.listener.on_score_changed(self.score);
                    }
                }
                self.notify_player();
            }
        }

        self.timer = 0.0;
        if self.active.is_some_and(|piece| piece.is_grounded(&self.board)) {
            self.timer = -self.wait_time() / 4.0;
        }
    }

    /// Shift the active piece one column in the sign of `direction`.
    ///
    /// The cue and notification are sent even when the move is blocked.
    /// Returns whether the piece moved.
    pub fn move_horizontal(&mut self, direction: i32) -> bool {
        if !self.playing {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let moved = piece.shifted(direction.signum() as i8, 0);
        let ok = !moved.collides(&self.board);
        if ok {
            self.active = Some(moved);
        }

        self.sound.play_sound(SoundCue::Move, 1.0);
        self.notify_player();
        ok
    }

    /// Turn the active piece by `direction` quarter turns in place.
    ///
    /// There are no wall kicks: a blocked rotation is simply undone. Every
    /// attempt halves the gravity accumulator. Returns whether the piece turned.
    pub fn rotate(&mut self, direction: i32) -> bool {
        if !self.playing {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let turned = piece.turned(direction);
        let ok = !turned.collides(&self.board);
        if ok {
            self.active = Some(turned);
        }
        self.timer /= 2.0;

        self.sound.play_sound(SoundCue::Rotate, 1.0);
        self.notify_player();
        ok
    }

    /// Drop the active piece as far as it goes and lock it.
    ///
    /// Every probe step scores [`HARD_DROP_POINTS`] and the final blocked
    /// probe is taken back once, so the net award is two points per row.
    /// Returns the number of rows descended.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.playing {
            return 0;
        }
        let Some(piece) = self.active else {
            return 0;
        };

        let mut landed = piece;
        let mut awarded = 0;
        while !landed.collides(&self.board) {
            landed = landed.shifted(0, 1);
            awarded += HARD_DROP_POINTS;
        }
        landed = landed.shifted(0, -1);
        self.score = (self.score + awarded).saturating_sub(HARD_DROP_POINTS);
        self.listener.on_score_changed(self.score);

        let rows = (landed.y - piece.y).max(0) as u32;
        debug!(kind = ?piece.kind, rows, "hard drop");

        self.active = Some(landed);
        self.lock_piece();
        self.timer = self.wait_time() * 3.0 / 4.0;
        rows
    }

    /// Put the active piece on hold, once per locked piece.
    ///
    /// With an empty hold slot the next queued piece spawns; otherwise the
    /// held piece swaps in. Either way the active piece restarts at the spawn
    /// anchor. Returns whether the hold happened.
    pub fn hold(&mut self) -> bool {
        if !self.playing || self.just_held {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        match self.hold.replace(piece.kind) {
            None => {
                self.active = None;
                self.spawn_piece();
            }
            Some(held) => {
                self.active = Some(self.spawn_position(held));
            }
        }
        self.just_held = true;
        debug!(held = ?piece.kind, active = ?self.active.map(|p| p.kind), "hold");

        self.sound.play_sound(SoundCue::Hold, 1.0);
        self.listener.on_held_piece_changed(self.hold);
        self.notify_player();
        true
    }

    /// Write the active piece into the board, spawn the next one and score lines.
    ///
    /// A piece with any cell above row 0 ends the game instead.
    pub fn lock_piece(&mut self) {
        let Some(piece) = self.active else {
            return;
        };

        let cells = piece.cells();
        if cells.iter().any(|&(_, y)| y < 0) {
            debug!(kind = ?piece.kind, x = piece.x, y = piece.y, "locked above the field");
            self.end_game();
            return;
        }

        for (x, y) in cells {
            self.board.set_cell(x, y, piece.kind);
        }
        debug!(kind = ?piece.kind, x = piece.x, y = piece.y, rotation = ?piece.rotation, "locked");

        self.just_held = false;
        self.sound.play_sound(SoundCue::Place, 1.0);
        self.active = None;
        self.spawn_piece();

        self.listener.on_board_changed(self.board.cells());
        self.clear_lines();
    }

    /// Take the next kind from the queue and place it at the spawn anchor
    pub fn spawn_piece(&mut self) {
        if !self.playing {
            return;
        }

        let kind = self.queue.pop_front();
        self.active = Some(self.spawn_position(kind));
        debug!(?kind, next = ?self.queue.as_slice(), "spawned");

        self.listener.on_queue_changed(self.queue.as_slice());
        self.notify_player();
    }

    fn spawn_position(&self, kind: PieceKind) -> Tetromino {
        Tetromino::new(kind, self.config.spawn_x, self.config.spawn_y)
    }

    /// Clear full rows and apply the award. Returns the number of lines cleared.
    fn clear_lines(&mut self) -> usize {
        let cleared = self.board.clear_full_rows();
        let lines = cleared.len();
        if lines == 0 {
            self.combo = -1;
            return 0;
        }

        self.sound
            .play_sound(SoundCue::Line, line_clear_pitch(self.combo));
        self.combo += 1;
        if lines == 4 {
            self.sound.play_sound(SoundCue::Tetros, 1.0);
        }

        let award = calculate_score(lines, self.level, self.combo);
        self.score += award.total;

        let (level, lines_needed) =
            advance_level(self.level, self.lines_needed, lines, self.config.max_level);
        if level != self.level {
            info!(level, lines_needed, "level up");
        }
        self.level = level;
        self.lines_needed = lines_needed;

        debug!(
            rows = ?cleared.as_slice(),
            combo = self.combo,
            award = award.total,
            score = self.score,
            "cleared lines"
        );

        self.listener.on_board_changed(self.board.cells());
        self.listener.on_score_changed(self.score);
        lines
    }

    /// Row the active piece would lock at if hard dropped now
    pub fn ghost_y(&self) -> Option<i8> {
        let piece = self.active?;
        let mut ghost = piece;
        while !ghost.is_grounded(&self.board) {
            ghost = ghost.shifted(0, 1);
        }
        Some(ghost.y)
    }

    /// Board coordinates of the ghost piece
    pub fn ghost_cells(&self) -> Option<[(i8, i8); 4]> {
        let piece = self.active?;
        let y = self.ghost_y()?;
        Some(piece_cells(piece.kind, piece.rotation, piece.x, y))
    }

    /// Board coordinates of the active piece
    pub fn active_cells(&self) -> Option<[(i8, i8); 4]> {
        self.active.map(|piece| piece.cells())
    }

    pub fn player_snapshot(&self) -> PlayerSnapshot {
        self.active.map(PlayerSnapshot::from).unwrap_or_default()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(PlayerSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.hold = self.hold;
        out.next_queue.clear();
        out.next_queue.extend_from_slice(self.queue.as_slice());
        out.can_hold = self.can_hold();
        out.playing = self.playing;
        out.score = self.score;
        out.high_score = self.high_score;
        out.level = self.level;
        out.lines_needed = self.lines_needed;
        out.combo = self.combo;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Replace the board, as a mirror of a remote game does on each update
    pub fn load_board(&mut self, board: Board) {
        self.board = board;
        self.listener.on_board_changed(self.board.cells());
    }

    /// Replace the active piece without any collision check
    pub fn set_player(&mut self, piece: Option<Tetromino>) {
        self.active = piece;
        self.notify_player();
    }

    fn notify_player(&mut self) {
        let player = self.player_snapshot();
        self.listener.on_player_state_changed(player);
    }

    fn notify_all(&mut self) {
        self.listener.on_board_changed(self.board.cells());
        self.listener.on_held_piece_changed(self.hold);
        self.listener.on_queue_changed(self.queue.as_slice());
        self.listener.on_score_changed(self.score);
        self.notify_player();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
