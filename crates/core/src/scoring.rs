//! Scoring module
//!
//! - Every successful placement earns a flat [`SCORE_PER_BLOCK`], whatever the
//!   piece size.
//! - Clearing `L` lines at once earns `L * (L + 1) / 2 * SCORE_PER_LINE_BASE`,
//!   so multi-line clears grow super-linearly (100, 300, 600, 1000, ...).

use crate::types::{SCORE_PER_BLOCK, SCORE_PER_LINE_BASE};

/// Points earned by one placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub block_score: u32,
    pub line_clear_score: u32,
    pub total: u32,
}

/// Flat award for a successful placement
pub fn calculate_block_score() -> u32 {
    SCORE_PER_BLOCK
}

/// Triangular line-clear bonus; zero lines score nothing
pub fn calculate_line_bonus(lines: usize) -> u32 {
    let lines = lines as u32;
    let triangle = lines.saturating_mul(lines.saturating_add(1)) / 2;
    triangle.saturating_mul(SCORE_PER_LINE_BASE)
}

/// Combine placement and line-clear points
pub fn calculate_score(lines: usize) -> ScoreResult {
    let block_score = calculate_block_score();
    let line_clear_score = calculate_line_bonus(lines);
    ScoreResult {
        block_score,
        line_clear_score,
        total: block_score.saturating_add(line_clear_score),
    }
}
