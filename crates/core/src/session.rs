//! Session module - manages the complete game state
//!
//! This module ties together all core components: board, hand, shape source,
//! scoring and high score persistence. It owns the turn sequence:
//!
//! 1. validate and apply a placement,
//! 2. clear completed lines and award points,
//! 3. refill the hand once every slot is empty,
//! 4. detect the terminal state (no hand piece fits anywhere).
//!
//! Every step completes before the call returns; animation is the caller's
//! business and never gates state changes.

use tracing::{debug, info, warn};

use crate::board::{Board, ClearResult};
use crate::error::PlacementError;
use crate::hand::{Hand, Piece};
use crate::high_score::{HighScoreStore, MemoryStore};
use crate::rng::{ShapeSource, SimpleRng};
use crate::scoring::{calculate_block_score, calculate_line_bonus, ScoreResult};
use crate::shapes::catalog;
use crate::snapshot::{SessionSnapshot, SlotSnapshot};
use crate::types::{SessionPhase, HAND_SIZE};

/// Result of [`Session::resolve_lines`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineResolution {
    pub cleared: ClearResult,
    /// Line-clear bonus awarded (0 when nothing cleared)
    pub bonus: u32,
    /// Whether the high score moved during this resolution
    pub new_high_score: bool,
}

/// Everything a presentation layer needs to animate one successful placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementReport {
    pub slot: usize,
    pub piece: Piece,
    pub row: i8,
    pub col: i8,
    pub cells_placed: usize,
    pub cleared: ClearResult,
    pub score: ScoreResult,
    pub new_high_score: bool,
    /// Hand was empty after this placement and has been dealt again
    pub refilled: bool,
    /// This placement left no legal move
    pub game_over: bool,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct Session<R = SimpleRng, S = MemoryStore> {
    board: Board,
    hand: Hand,
    rng: R,
    store: S,
    score: u32,
    high_score: u32,
    phase: SessionPhase,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Monotonic id for dealt pieces (never reset).
    piece_id: u32,
}

impl Session {
    /// Create a session with a seeded generator and an in-memory high score
    pub fn new(seed: u32) -> Self {
        Self::with_parts(SimpleRng::new(seed), MemoryStore::default())
    }
}

impl<R: ShapeSource, S: HighScoreStore> Session<R, S> {
    /// Create a session from its collaborators and deal the first hand.
    ///
    /// The high score is read from `store` once, here. A failing store is
    /// logged and treated as holding 0.
    pub fn with_parts(rng: R, store: S) -> Self {
        let mut session = Self::blank(Board::new(), rng, store);
        session.spawn_hand();
        session
    }

    /// Resume play from an explicit board and hand.
    ///
    /// An empty hand is dealt immediately. The terminal check runs before
    /// returning, so a position with no legal move comes back as game over.
    pub fn resume(board: Board, hand: Hand, rng: R, store: S) -> Self {
        let mut session = Self::blank(board, rng, store);
        session.piece_id = hand.occupied().map(|(_, p)| p.id).max().unwrap_or(0);
        session.hand = hand;
        session.post_placement_check();
        session
    }

    fn blank(board: Board, rng: R, mut store: S) -> Self {
        let high_score = match store.load() {
            Ok(v) => v,
            Err(err) => {
                warn!(error = %err, "failed to load high score, starting from 0");
                0
            }
        };

        Self {
            board,
            hand: Hand::new(),
            rng,
            store,
            score: 0,
            high_score,
            phase: SessionPhase::Playing,
            episode_id: 0,
            piece_id: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Deal a full hand.
    ///
    /// Only acts when every slot is empty; a partially played hand is never
    /// topped up. Returns whether a hand was dealt.
    pub fn spawn_hand(&mut self) -> bool {
        if !self.hand.is_empty() {
            debug!(occupied = self.hand.len(), "hand not empty, refill skipped");
            return false;
        }

        let shapes = catalog();
        for slot in 0..HAND_SIZE {
            let shape = shapes[self.rng.pick(shapes.len()) % shapes.len()];
            self.piece_id = self.piece_id.wrapping_add(1);
            self.hand.put(
                slot,
                Piece {
                    id: self.piece_id,
                    shape,
                },
            );
        }

        let dealt = self.hand.slots().map(|slot| slot.map(|p| p.shape.id()));
        debug!(episode = self.episode_id, shapes = ?dealt, "hand dealt");
        true
    }

    /// Try to drop the piece in `slot` with its top-left cell at (row, col).
    ///
    /// On failure nothing changes and the piece stays in its slot.
    pub fn attempt_placement(
        &mut self,
        slot: usize,
        row: i8,
        col: i8,
    ) -> Result<PlacementReport, PlacementError> {
        if self.is_game_over() {
            return Err(PlacementError::GameOver);
        }

        let Some(piece) = self.hand.get(slot).copied() else {
            return Err(PlacementError::InvalidSlot(slot));
        };

        let rejected = PlacementError::Rejected { slot, row, col };
        if !self.board.can_place(&piece.shape, row, col) {
            return Err(rejected);
        }
        let cells_placed = self
            .board
            .place(&piece.shape, row, col)
            .map_err(|_| rejected)?;

        self.hand.take(slot);
        let block_score = calculate_block_score();
        self.score = self.score.saturating_add(block_score);

        let resolution = self.resolve_lines();
        let refilled = self.post_placement_check();

        Ok(PlacementReport {
            slot,
            piece,
            row,
            col,
            cells_placed,
            score: ScoreResult {
                block_score,
                line_clear_score: resolution.bonus,
                total: block_score.saturating_add(resolution.bonus),
            },
            cleared: resolution.cleared,
            new_high_score: resolution.new_high_score,
            refilled,
            game_over: self.is_game_over(),
        })
    }

    /// Clear completed lines, award the bonus and raise the high score if beaten.
    pub fn resolve_lines(&mut self) -> LineResolution {
        let cleared = self.board.clear_completed_lines();
        let lines = cleared.line_count();

        let bonus = calculate_line_bonus(lines);
        if lines > 0 {
            self.score = self.score.saturating_add(bonus);
            debug!(
                lines,
                cells = cleared.cells().len(),
                bonus,
                score = self.score,
                "lines cleared"
            );
        }

        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
        }

        LineResolution {
            cleared,
            bonus,
            new_high_score,
        }
    }

    /// Refill an exhausted hand, then check whether any dealt piece still fits.
    ///
    /// Returns whether the hand was refilled. An all-empty hand is never
    /// judged terminal; it is dealt first.
    pub fn post_placement_check(&mut self) -> bool {
        let refilled = self.hand.is_empty() && self.spawn_hand();

        if self.hand.is_empty() {
            return refilled;
        }

        let stuck = self
            .hand
            .occupied()
            .all(|(_, piece)| !self.board.has_any_valid_placement(&piece.shape));
        if stuck {
            self.enter_game_over();
        }

        refilled
    }

    fn enter_game_over(&mut self) {
        self.phase = SessionPhase::GameOver;
        info!(
            episode = self.episode_id,
            score = self.score,
            high_score = self.high_score,
            "game over"
        );
        if let Err(err) = self.store.save(self.high_score) {
            warn!(error = %err, "failed to persist high score");
        }
    }

    /// Start a new episode: empty board, fresh hand, score 0. The high score carries over.
    pub fn restart(&mut self) {
        self.board.clear();
        self.hand.clear();
        self.score = 0;
        self.phase = SessionPhase::Playing;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.spawn_hand();
        info!(episode = self.episode_id, high_score = self.high_score, "session restarted");
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        self.board.write_grid(&mut out.board);
        for (slot, entry) in out.hand.iter_mut().enumerate() {
            *entry = self.hand.get(slot).map(|piece| SlotSnapshot {
                piece_id: piece.id,
                shape: piece.shape.id(),
                color: piece.shape.color(),
                placeable: self.board.has_any_valid_placement(&piece.shape),
            });
        }
        out.score = self.score;
        out.high_score = self.high_score;
        out.game_over = self.is_game_over();
        out.episode_id = self.episode_id;
        out.piece_id = self.piece_id;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1)
    }
}
