//! Board module - manages the game grid
//!
//! The board is an 8x8 grid where each cell is either filled or empty.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (row, col) where row ranges 0..7 (top to bottom), col ranges 0..7 (left to right)
//!
//! Anchors are signed so that a presentation layer can probe positions that hang
//! off the top or left edge; those probes are simply rejected.

use arrayvec::ArrayVec;

use crate::error::PlaceError;
use crate::shapes::PieceShape;
use crate::types::{CellPos, Line, BOARD_CELLS, BOARD_SIZE, MAX_LINES};

/// Cells and lines removed by [`Board::clear_completed_lines`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClearResult {
    /// Deduplicated cleared cells, row-major
    cells: ArrayVec<CellPos, BOARD_CELLS>,
    /// Completed lines, rows first then columns
    lines: ArrayVec<Line, MAX_LINES>,
}

impl ClearResult {
    pub fn cells(&self) -> &[CellPos] {
        &self.cells
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Rows plus columns completed, each counted once
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains(&self, cell: CellPos) -> bool {
        self.cells.contains(&cell)
    }
}

/// The game board - 8 x 8 cells using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of fill flags, row-major order (row * SIZE + col)
    cells: [bool; BOARD_CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [false; BOARD_CELLS],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: i16, col: i16) -> Option<usize> {
        let size = BOARD_SIZE as i16;
        if row < 0 || row >= size || col < 0 || col >= size {
            return None;
        }
        Some((row as usize) * (BOARD_SIZE as usize) + (col as usize))
    }

    /// Edge length of the board
    pub fn size(&self) -> u8 {
        BOARD_SIZE
    }

    /// Fill state at (row, col); None if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<bool> {
        Self::index(row as i16, col as i16).map(|idx| self.cells[idx])
    }

    /// Set fill state at (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, filled: bool) -> bool {
        match Self::index(row as i16, col as i16) {
            Some(idx) => {
                self.cells[idx] = filled;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and filled
    pub fn is_filled(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(true))
    }

    /// Check if position is within bounds and empty
    pub fn is_free(&self, row: i8, col: i8) -> bool {
        self.is_free_wide(row as i16, col as i16)
    }

    #[inline(always)]
    fn is_free_wide(&self, row: i16, col: i16) -> bool {
        matches!(Self::index(row, col), Some(idx) if !self.cells[idx])
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= BOARD_SIZE as usize {
            return false;
        }
        let start = row * BOARD_SIZE as usize;
        self.cells[start..start + BOARD_SIZE as usize]
            .iter()
            .all(|&filled| filled)
    }

    /// Check if a column is completely filled
    pub fn is_col_full(&self, col: usize) -> bool {
        if col >= BOARD_SIZE as usize {
            return false;
        }
        self.cells
            .iter()
            .skip(col)
            .step_by(BOARD_SIZE as usize)
            .all(|&filled| filled)
    }

    /// Check whether every occupied cell of `shape`, anchored at (row, col),
    /// lands inside the board on an empty cell. No side effects.
    pub fn can_place(&self, shape: &PieceShape, row: i8, col: i8) -> bool {
        shape
            .cells()
            .all(|(dr, dc)| self.is_free_wide(row as i16 + dr as i16, col as i16 + dc as i16))
    }

    /// Fill every occupied cell of `shape` anchored at (row, col).
    ///
    /// Validates first and mutates nothing on failure. Returns the number of
    /// cells filled.
    pub fn place(&mut self, shape: &PieceShape, row: i8, col: i8) -> Result<usize, PlaceError> {
        // First check if all positions are valid
        for (dr, dc) in shape.cells() {
            let r = row as i16 + dr as i16;
            let c = col as i16 + dc as i16;
            match Self::index(r, c) {
                None => return Err(PlaceError::OutOfBounds { row: r, col: c }),
                Some(idx) if self.cells[idx] => {
                    return Err(PlaceError::Occupied {
                        row: r as u8,
                        col: c as u8,
                    })
                }
                Some(_) => {}
            }
        }

        // Then fill all cells
        let mut filled = 0;
        for (dr, dc) in shape.cells() {
            if let Some(idx) = Self::index(row as i16 + dr as i16, col as i16 + dc as i16) {
                self.cells[idx] = true;
                filled += 1;
            }
        }

        Ok(filled)
    }

    /// Clear every complete row and column.
    ///
    /// Rows and columns are both detected before anything is unfilled, so a
    /// cell shared by a full row and a full column is reported once and the
    /// scan order has no effect on the result.
    pub fn clear_completed_lines(&mut self) -> ClearResult {
        let size = BOARD_SIZE as usize;
        let mut marked = [false; BOARD_CELLS];
        let mut result = ClearResult::default();

        for row in 0..size {
            if self.is_row_full(row) {
                result.lines.push(Line::Row(row as u8));
                for cell in &mut marked[row * size..(row + 1) * size] {
                    *cell = true;
                }
            }
        }

        for col in 0..size {
            if self.is_col_full(col) {
                result.lines.push(Line::Col(col as u8));
                for row in 0..size {
                    marked[row * size + col] = true;
                }
            }
        }

        for (idx, _) in marked.iter().enumerate().filter(|&(_, &m)| m) {
            self.cells[idx] = false;
            result.cells.push(CellPos::from_index(idx));
        }

        result
    }

    /// True iff some anchor in [0, SIZE) x [0, SIZE) admits `shape`.
    /// Stops at the first fit.
    pub fn has_any_valid_placement(&self, shape: &PieceShape) -> bool {
        let size = BOARD_SIZE as i8;
        (0..size).any(|row| (0..size).any(|col| self.can_place(shape, row, col)))
    }

    /// Every anchor at which `shape` fits, row-major
    pub fn valid_anchors(&self, shape: &PieceShape) -> ArrayVec<CellPos, BOARD_CELLS> {
        let mut anchors = ArrayVec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if self.can_place(shape, row as i8, col as i8) {
                    anchors.push(CellPos::new(row, col));
                }
            }
        }
        anchors
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&filled| filled).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&filled| !filled)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Write the fill grid into a caller-owned buffer (no allocation)
    pub fn write_grid(&self, out: &mut [[bool; BOARD_SIZE as usize]; BOARD_SIZE as usize]) {
        let size = BOARD_SIZE as usize;
        for (row, out_row) in out.iter_mut().enumerate() {
            out_row.copy_from_slice(&self.cells[row * size..(row + 1) * size]);
        }
    }

    /// Fill grid by rows, for rendering
    pub fn rows(&self) -> [[bool; BOARD_SIZE as usize]; BOARD_SIZE as usize] {
        let mut out = [[false; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        self.write_grid(&mut out);
        out
    }

    /// Build a board from an ASCII picture: `#` is filled, anything else empty.
    /// Missing rows or columns are left empty.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let mut board = Self::new();
        for (row, line) in rows.iter().take(BOARD_SIZE as usize).enumerate() {
            for (col, ch) in line.chars().take(BOARD_SIZE as usize).enumerate() {
                board.set(row as i8, col as i8, ch == '#');
            }
        }
        board
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [false; BOARD_CELLS];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
