//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and scoring logic
//! for the block puzzle. It has **no dependencies** on rendering, input or
//! networking, making it:
//!
//! - **Deterministic**: Same seed (or scripted source) produces identical hands
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Can sit behind a canvas, a terminal, or a socket
//! - **Synchronous**: Every operation completes before returning
//!
//! # Module Structure
//!
//! - [`board`]: 8x8 grid with placement validation and row/column clearing
//! - [`shapes`]: The fixed piece catalog
//! - [`hand`]: Three-slot hand of available pieces
//! - [`rng`]: Injectable random source for dealing pieces
//! - [`scoring`]: Flat placement points and triangular line-clear bonus
//! - [`high_score`]: Persistence slot for the best score
//! - [`session`]: Turn sequence, hand refill and game-over detection
//! - [`snapshot`]: Copyable view of a session for presentation layers
//!
//! # Game Rules
//!
//! - A piece fits when every occupied cell lands inside the board on an empty cell
//! - Complete rows **and** columns clear together; shared cells count once
//! - The hand is dealt three pieces at a time, and only once all three are played
//! - The game ends when no piece in the hand fits anywhere
//!
//! # Example
//!
//! ```
//! use block_puzzle_core::{PlacementError, Session};
//!
//! let mut game = Session::new(12345);
//!
//! // Find a slot whose piece fits at the top-left corner and drop it there.
//! let slot = (0..3)
//!     .find(|&slot| {
//!         let piece = game.hand().get(slot).unwrap();
//!         game.board().can_place(&piece.shape, 0, 0)
//!     })
//!     .unwrap();
//! let report = game.attempt_placement(slot, 0, 0).unwrap();
//! assert_eq!(report.score.block_score, 10);
//!
//! // The slot is now empty.
//! assert_eq!(
//!     game.attempt_placement(slot, 4, 4),
//!     Err(PlacementError::InvalidSlot(slot))
//! );
//! ```

pub mod board;
pub mod error;
pub mod hand;
pub mod high_score;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;

pub use block_puzzle_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearResult};
pub use error::{PlaceError, PlacementError, StoreError};
pub use hand::{Hand, Piece};
pub use high_score::{HighScoreStore, JsonFileStore, MemoryStore};
pub use rng::{ScriptedSource, ShapeSource, SimpleRng};
pub use scoring::{calculate_line_bonus, calculate_score, ScoreResult};
pub use session::{LineResolution, PlacementReport, Session};
pub use shapes::{catalog, get_shape, PieceShape, CATALOG};
pub use snapshot::{SessionSnapshot, SlotSnapshot};
