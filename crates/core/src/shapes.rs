//! Shapes module - static tetromino geometry
//!
//! Every piece kind has four rotation states. Each state is stored as the four
//! occupied cell indices of a 4x4 local grid (row-major, index = ly * 4 + lx).
//! The O piece repeats the same cells in every state, so it never visibly turns.

use crate::types::{PieceKind, Rotation};

/// Side length of the local grid a shape lives in
pub const SHAPE_GRID: i8 = 4;

/// Occupied cells of one (kind, rotation) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    blocks: [u8; 4],
}

impl Shape {
    const fn new(blocks: [u8; 4]) -> Self {
        Self { blocks }
    }

    /// Raw cell indices in 0..16
    pub fn blocks(&self) -> [u8; 4] {
        self.blocks
    }

    /// Local `(lx, ly)` coordinates of the occupied cells, each in 0..4
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.blocks
            .map(|i| ((i as i8) % SHAPE_GRID, (i as i8) / SHAPE_GRID))
    }

    /// Occupancy of the full 4x4 grid
    pub fn grid(&self) -> [bool; 16] {
        let mut grid = [false; 16];
        for &i in &self.blocks {
            grid[i as usize] = true;
        }
        grid
    }

    /// Whether the local cell at `index` is occupied
    pub fn contains(&self, index: u8) -> bool {
        self.blocks.contains(&index)
    }
}

#[rustfmt::skip]
const I_SHAPES: [Shape; 4] = [
    Shape::new([4, 5, 6, 7]),
    Shape::new([2, 6, 10, 14]),
    Shape::new([8, 9, 10, 11]),
    Shape::new([1, 5, 9, 13]),
];

const O_SHAPES: [Shape; 4] = [Shape::new([5, 6, 9, 10]); 4];

#[rustfmt::skip]
const T_SHAPES: [Shape; 4] = [
    Shape::new([1, 4, 5, 6]),
    Shape::new([1, 5, 6, 9]),
    Shape::new([4, 5, 6, 9]),
    Shape::new([1, 4, 5, 9]),
];

#[rustfmt::skip]
const S_SHAPES: [Shape; 4] = [
    Shape::new([1, 2, 4, 5]),
    Shape::new([0, 4, 5, 9]),
    Shape::new([1, 2, 4, 5]),
    Shape::new([0, 4, 5, 9]),
];

#[rustfmt::skip]
const Z_SHAPES: [Shape; 4] = [
    Shape::new([0, 1, 5, 6]),
    Shape::new([1, 4, 5, 8]),
    Shape::new([0, 1, 5, 6]),
    Shape::new([1, 4, 5, 8]),
];

#[rustfmt::skip]
const J_SHAPES: [Shape; 4] = [
    Shape::new([0, 4, 5, 6]),
    Shape::new([1, 2, 5, 9]),
    Shape::new([4, 5, 6, 10]),
    Shape::new([1, 5, 8, 9]),
];

#[rustfmt::skip]
const L_SHAPES: [Shape; 4] = [
    Shape::new([2, 4, 5, 6]),
    Shape::new([1, 5, 9, 10]),
    Shape::new([4, 5, 6, 8]),
    Shape::new([0, 1, 5, 9]),
];

/// Look up the shape for a kind and any integer rotation.
///
/// `rotation` is wrapped into 0..4 first. An absent kind (`None`) resolves to
/// the I table: hosts that forward an empty slot get a harmless shape instead
/// of a panic, and every caller inside the engine always passes `Some`.
pub fn shape_of(kind: Option<PieceKind>, rotation: i32) -> Shape {
    let table = match kind {
        Some(PieceKind::I) => &I_SHAPES,
        Some(PieceKind::O) => &O_SHAPES,
        Some(PieceKind::T) => &T_SHAPES,
        Some(PieceKind::S) => &S_SHAPES,
        Some(PieceKind::Z) => &Z_SHAPES,
        Some(PieceKind::J) => &J_SHAPES,
        Some(PieceKind::L) => &L_SHAPES,
        None => &I_SHAPES,
    };
    table[Rotation::from_turns(rotation).index() as usize]
}

/// Shape lookup keyed by wire id; unknown ids fall back to the I table.
pub fn shape_of_id(id: u8, rotation: i32) -> Shape {
    shape_of(PieceKind::from_id(id), rotation)
}

/// Shape of a piece in a typed rotation state.
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> Shape {
    shape_of(Some(kind), rotation.index() as i32)
}
