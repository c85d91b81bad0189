//! Error types for the core.
//!
//! Every error here is recoverable: the board and session are left exactly as
//! they were before the failing call.

use thiserror::Error;

/// Why [`Board::place`](crate::Board::place) refused a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceError {
    #[error("cell ({row}, {col}) lies outside the board")]
    OutOfBounds { row: i16, col: i16 },
    #[error("cell ({row}, {col}) is already filled")]
    Occupied { row: u8, col: u8 },
}

/// Outcome of a failed [`Session::attempt_placement`](crate::Session::attempt_placement)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// Slot index out of range, or the slot holds no piece.
    #[error("slot {0} is empty or out of range")]
    InvalidSlot(usize),
    /// The slot's shape does not fit at the anchor (bounds or occupancy).
    #[error("piece in slot {slot} does not fit at ({row}, {col})")]
    Rejected { slot: usize, row: i8, col: i8 },
    #[error("the game is over; restart to keep playing")]
    GameOver,
}

/// Failure reading or writing the persisted high score
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score record is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
