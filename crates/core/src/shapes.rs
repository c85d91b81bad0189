//! Shapes module - the fixed piece catalog
//!
//! Every piece a hand can hold is drawn from [`CATALOG`]. A shape is an
//! immutable rectangular occupancy matrix (`1` = occupied) plus a color tag.
//! Offsets are `(row, col)` relative to the matrix's top-left cell, which is
//! the anchor when the shape is laid onto the board.

use crate::types::{Rgb, ShapeId};

/// Offset of a single occupied cell relative to the shape anchor
pub type CellOffset = (u8, u8);

/// Immutable occupancy matrix with identity and color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceShape {
    id: ShapeId,
    color: Rgb,
    matrix: &'static [&'static [u8]],
}

impl PieceShape {
    /// Build a shape from a rectangular matrix of `0`/`1` rows.
    pub const fn new(id: ShapeId, color: Rgb, matrix: &'static [&'static [u8]]) -> Self {
        Self { id, color, matrix }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn matrix(&self) -> &'static [&'static [u8]] {
        self.matrix
    }

    /// Number of matrix rows
    pub fn rows(&self) -> usize {
        self.matrix.len()
    }

    /// Number of matrix columns
    pub fn cols(&self) -> usize {
        self.matrix.first().map_or(0, |row| row.len())
    }

    /// Whether the matrix cell at `(row, col)` is occupied; false outside the matrix
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.matrix
            .get(row)
            .and_then(|r| r.get(col))
            .is_some_and(|&v| v != 0)
    }

    /// Offsets of every occupied cell, row-major
    pub fn cells(&self) -> impl Iterator<Item = CellOffset> + 'static {
        let matrix = self.matrix;
        matrix.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &v)| v != 0)
                .map(move |(c, _)| (r as u8, c as u8))
        })
    }

    /// Number of occupied cells
    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }
}

/// The catalog, read-only for the lifetime of the program.
pub static CATALOG: [PieceShape; 9] = [
    PieceShape::new(ShapeId::Line3, Rgb::NEON_RED, &[&[1, 1, 1]]),
    PieceShape::new(ShapeId::Line4, Rgb::NEON_RED, &[&[1, 1, 1, 1]]),
    PieceShape::new(ShapeId::Line5, Rgb::NEON_RED, &[&[1, 1, 1, 1, 1]]),
    PieceShape::new(ShapeId::CornerLeft, Rgb::NEON_CYAN, &[&[1, 0], &[1, 0], &[1, 1]]),
    PieceShape::new(ShapeId::CornerRight, Rgb::NEON_CYAN, &[&[0, 1], &[0, 1], &[1, 1]]),
    PieceShape::new(ShapeId::Square, Rgb::NEON_LIME, &[&[1, 1], &[1, 1]]),
    PieceShape::new(ShapeId::Single, Rgb::NEON_ORANGE, &[&[1]]),
    PieceShape::new(ShapeId::Domino, Rgb::NEON_ORANGE, &[&[1, 1]]),
    PieceShape::new(ShapeId::Tee, Rgb::NEON_PURPLE, &[&[0, 1, 0], &[1, 1, 1]]),
];

pub fn catalog() -> &'static [PieceShape] {
    &CATALOG
}

/// Look up the catalog shape for an id
pub fn get_shape(id: ShapeId) -> PieceShape {
    match id {
        ShapeId::Line3 => CATALOG[0],
        ShapeId::Line4 => CATALOG[1],
        ShapeId::Line5 => CATALOG[2],
        ShapeId::CornerLeft => CATALOG[3],
        ShapeId::CornerRight => CATALOG[4],
        ShapeId::Square => CATALOG[5],
        ShapeId::Single => CATALOG[6],
        ShapeId::Domino => CATALOG[7],
        ShapeId::Tee => CATALOG[8],
    }
}
