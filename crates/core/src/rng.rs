//! RNG module - bag randomizer and next-piece queue
//!
//! The bag hands out shuffled batches containing one of each piece kind.
//! Whenever fewer than [`QUEUE_LENGTH`] pieces remain, a fresh shuffled batch
//! is appended behind the current one, so every batch of 7 is dealt out in
//! full before the next one starts.
//!
//! Games are reproducible when built with a seed; otherwise the shuffle is
//! seeded from OS entropy.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::types::{PieceKind, QUEUE_LENGTH};

/// Shuffled supply of piece kinds
#[derive(Debug, Clone)]
pub struct RandomBag {
    pieces: VecDeque<PieceKind>,
    rng: StdRng,
}

impl RandomBag {
    /// Create an empty bag with a fixed seed
    pub fn new(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Create an empty bag seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            pieces: VecDeque::with_capacity(PieceKind::ALL.len() * 2),
            rng,
        }
    }

    /// Append one shuffled batch of all seven kinds
    fn refill(&mut self) {
        let mut batch = PieceKind::ALL;
        batch.shuffle(&mut self.rng);
        self.pieces.extend(batch);
    }

    /// Draw the next piece kind
    pub fn next_kind(&mut self) -> PieceKind {
        if self.pieces.len() < QUEUE_LENGTH {
            self.refill();
        }
        // refill guarantees at least 7 entries here
        let kind = self.pieces[0];
        self.pieces.pop_front();
        kind
    }

    /// Number of pieces left before the next refill check
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Drop every buffered piece (the RNG state is kept)
    pub fn clear(&mut self) {
        self.pieces.clear();
    }
}

/// Fixed-length lookahead of upcoming pieces backed by a [`RandomBag`]
#[derive(Debug, Clone)]
pub struct PieceQueue {
    upcoming: ArrayVec<PieceKind, QUEUE_LENGTH>,
    bag: RandomBag,
}

impl PieceQueue {
    /// Create an empty queue whose bag uses the given seed
    pub fn new(seed: u64) -> Self {
        Self::from_bag(RandomBag::new(seed))
    }

    /// Create an empty queue whose bag is seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::from_bag(RandomBag::from_entropy())
    }

    fn from_bag(bag: RandomBag) -> Self {
        Self {
            upcoming: ArrayVec::new(),
            bag,
        }
    }

    /// Fill the lookahead window with freshly drawn kinds
    pub fn initialize(&mut self) {
        self.upcoming.clear();
        while !self.upcoming.is_full() {
            self.upcoming.push(self.bag.next_kind());
        }
    }

    /// Take the first queued kind and append a new one to the back.
    ///
    /// An uninitialized queue is filled first, so the length stays at
    /// [`QUEUE_LENGTH`] afterwards in every case.
    pub fn pop_front(&mut self) -> PieceKind {
        if !self.upcoming.is_full() {
            self.initialize();
        }
        let kind = self.upcoming.remove(0);
        self.upcoming.push(self.bag.next_kind());
        kind
    }

    /// Upcoming kinds, front first
    pub fn as_slice(&self) -> &[PieceKind] {
        &self.upcoming
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> Option<PieceKind> {
        self.upcoming.first().copied()
    }

    pub fn len(&self) -> usize {
        self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty()
    }

    /// Empty the lookahead window and the bag
    pub fn clear(&mut self) {
        self.upcoming.clear();
        self.bag.clear();
    }

    /// Get the bag for testing/debugging
    pub fn bag(&self) -> &RandomBag {
        &self.bag
    }
}
