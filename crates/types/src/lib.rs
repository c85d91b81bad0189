//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, presentation layers, the control adapter).
//!
//! # Board Dimensions
//!
//! The playfield is a fixed square grid:
//!
//! - **Size**: 8 x 8 cells (rows and columns indexed 0-7)
//! - **Coordinates**: `(row, col)`, row 0 at the top, col 0 at the left
//!
//! # Hand
//!
//! The player holds [`HAND_SIZE`] slots of pieces. Slots are refilled only once
//! every slot has been played.
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SCORE_PER_BLOCK` | 10 | Flat award for every successful placement |
//! | `SCORE_PER_LINE_BASE` | 100 | Multiplier for the triangular line-clear bonus |
//!
//! # Examples
//!
//! ```
//! use block_puzzle_types::{CellPos, Line, ShapeId, BOARD_SIZE};
//!
//! // Parse a catalog id (case-insensitive)
//! let id = ShapeId::from_str("TEE").unwrap();
//! assert_eq!(id, ShapeId::Tee);
//! assert_eq!(id.as_str(), "tee");
//!
//! // Cells map onto a row-major index
//! let cell = CellPos::new(1, 2);
//! assert_eq!(cell.index(), BOARD_SIZE as usize + 2);
//!
//! // Lines know their orientation
//! assert!(Line::Row(3).is_row());
//! assert_eq!(Line::Col(5).index(), 5);
//! ```

/// Board edge length in cells (8 rows x 8 columns)
pub const BOARD_SIZE: u8 = 8;

/// Total number of cells on the board
pub const BOARD_CELLS: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// Upper bound on lines completed at once (every row and every column)
pub const MAX_LINES: usize = 2 * BOARD_SIZE as usize;

/// Number of slots in the hand
pub const HAND_SIZE: usize = 3;

/// Points awarded for every successful placement, independent of piece size
pub const SCORE_PER_BLOCK: u32 = 10;

/// Base multiplier for line-clear bonuses (`L * (L + 1) / 2 * base`)
pub const SCORE_PER_LINE_BASE: u32 = 100;

/// A cell coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    pub row: u8,
    pub col: u8,
}

impl CellPos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row-major flat index (`row * BOARD_SIZE + col`)
    pub const fn index(&self) -> usize {
        (self.row as usize) * (BOARD_SIZE as usize) + (self.col as usize)
    }

    /// Inverse of [`CellPos::index`]
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: (index / BOARD_SIZE as usize) as u8,
            col: (index % BOARD_SIZE as usize) as u8,
        }
    }
}

/// A completed row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    Row(u8),
    Col(u8),
}

impl Line {
    pub fn is_row(&self) -> bool {
        matches!(self, Line::Row(_))
    }

    pub fn index(&self) -> u8 {
        match *self {
            Line::Row(i) | Line::Col(i) => i,
        }
    }

    /// "row" or "col"
    pub fn kind_str(&self) -> &'static str {
        match self {
            Line::Row(_) => "row",
            Line::Col(_) => "col",
        }
    }
}

/// Identity of a shape in the fixed catalog
///
/// - **Line3 / Line4 / Line5**: horizontal bars
/// - **CornerLeft / CornerRight**: 3-tall L shapes, foot to the right / left
/// - **Square**: 2x2 block
/// - **Single**: one cell
/// - **Domino**: two cells side by side
/// - **Tee**: 2x3 T shape, stem up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeId {
    Line3,
    Line4,
    Line5,
    CornerLeft,
    CornerRight,
    Square,
    Single,
    Domino,
    Tee,
}

impl ShapeId {
    /// Every catalog id, in catalog order
    pub const ALL: [ShapeId; 9] = [
        ShapeId::Line3,
        ShapeId::Line4,
        ShapeId::Line5,
        ShapeId::CornerLeft,
        ShapeId::CornerRight,
        ShapeId::Square,
        ShapeId::Single,
        ShapeId::Domino,
        ShapeId::Tee,
    ];

    /// Parse a shape id from its snake_case name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use block_puzzle_types::ShapeId;
    ///
    /// assert_eq!(ShapeId::from_str("line3"), Some(ShapeId::Line3));
    /// assert_eq!(ShapeId::from_str("Corner_Left"), Some(ShapeId::CornerLeft));
    /// assert_eq!(ShapeId::from_str("hexomino"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "line3" => Some(ShapeId::Line3),
            "line4" => Some(ShapeId::Line4),
            "line5" => Some(ShapeId::Line5),
            "corner_left" => Some(ShapeId::CornerLeft),
            "corner_right" => Some(ShapeId::CornerRight),
            "square" => Some(ShapeId::Square),
            "single" => Some(ShapeId::Single),
            "domino" => Some(ShapeId::Domino),
            "tee" => Some(ShapeId::Tee),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeId::Line3 => "line3",
            ShapeId::Line4 => "line4",
            ShapeId::Line5 => "line5",
            ShapeId::CornerLeft => "corner_left",
            ShapeId::CornerRight => "corner_right",
            ShapeId::Square => "square",
            ShapeId::Single => "single",
            ShapeId::Domino => "domino",
            ShapeId::Tee => "tee",
        }
    }
}

/// 24-bit RGB color tag (`0xRRGGBB`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const NEON_RED: Rgb = Rgb(0xff0055);
    pub const NEON_CYAN: Rgb = Rgb(0x00ccff);
    pub const NEON_LIME: Rgb = Rgb(0xccff00);
    pub const NEON_ORANGE: Rgb = Rgb(0xffaa00);
    pub const NEON_PURPLE: Rgb = Rgb(0xaa00ff);

    pub fn r(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn g(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn b(&self) -> u8 {
        self.0 as u8
    }

    /// Format as `#rrggbb`
    ///
    /// ```
    /// use block_puzzle_types::Rgb;
    ///
    /// assert_eq!(Rgb::NEON_RED.to_hex(), "#ff0055");
    /// ```
    pub fn to_hex(&self) -> String {
        format!("#{:06x}", self.0 & 0x00ff_ffff)
    }
}

/// Session state machine phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    Playing,
    GameOver,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Playing => "playing",
            SessionPhase::GameOver => "game_over",
        }
    }
}
