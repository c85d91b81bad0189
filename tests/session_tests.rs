//! Session tests - turn sequence, scoring, refill and game over

use block_puzzle::core::{
    get_shape, Board, Hand, HighScoreStore, JsonFileStore, MemoryStore, Piece, PlacementError,
    ScriptedSource, Session,
};
use block_puzzle::types::{SessionPhase, ShapeId};

fn piece(id: u32, shape: ShapeId) -> Piece {
    Piece {
        id,
        shape: get_shape(shape),
    }
}

/// Every cell with an even `row + col` filled: no line is full and no two
/// free cells touch.
fn checkerboard() -> Board {
    let mut board = Board::new();
    for row in 0..8i8 {
        for col in 0..8i8 {
            if (row + col) % 2 == 0 {
                board.set(row, col, true);
            }
        }
    }
    board
}

#[test]
fn test_new_session_deals_full_hand() {
    let session = Session::new(12345);
    assert_eq!(session.hand().len(), 3);
    assert_eq!(session.score(), 0);
    assert_eq!(session.phase(), SessionPhase::Playing);
    assert!(session.board().is_empty());
}

#[test]
fn test_same_seed_same_hands() {
    let a = Session::new(42);
    let b = Session::new(42);
    assert_eq!(a.snapshot().hand, b.snapshot().hand);
}

#[test]
fn test_row_and_column_clear_scores_bonus() {
    let board = Board::from_ascii(&[
        "...#....", "...#....", "...#....", "###.####", "...#....", "...#....", "...#....",
        "...#....",
    ]);
    let hand = Hand::from_slots([
        Some(piece(1, ShapeId::Single)),
        Some(piece(2, ShapeId::Single)),
        None,
    ]);
    let mut session =
        Session::resume(board, hand, ScriptedSource::new([6]), MemoryStore::default());

    let report = session.attempt_placement(0, 3, 3).unwrap();
    assert_eq!(report.cells_placed, 1);
    assert_eq!(report.cleared.line_count(), 2);
    assert_eq!(report.cleared.cells().len(), 15);
    assert_eq!(report.score.block_score, 10);
    assert_eq!(report.score.line_clear_score, 300);
    assert_eq!(report.score.total, 310);
    assert_eq!(session.score(), 310);
    assert_eq!(session.high_score(), 310);
    assert!(report.new_high_score);
    assert!(session.board().is_empty());
}

#[test]
fn test_empty_slot_is_invalid_and_changes_nothing() {
    let hand = Hand::from_slots([None, Some(piece(1, ShapeId::Square)), None]);
    let mut session =
        Session::resume(Board::new(), hand, ScriptedSource::new([0]), MemoryStore::default());

    assert_eq!(
        session.attempt_placement(0, 0, 0),
        Err(PlacementError::InvalidSlot(0))
    );
    assert_eq!(
        session.attempt_placement(3, 0, 0),
        Err(PlacementError::InvalidSlot(3))
    );
    assert_eq!(session.score(), 0);
    assert!(session.board().is_empty());
    assert!(session.hand().get(1).is_some());
}

#[test]
fn test_rejected_placement_keeps_piece() {
    let hand = Hand::from_slots([Some(piece(1, ShapeId::Line5)), None, None]);
    let mut session =
        Session::resume(Board::new(), hand, ScriptedSource::new([0]), MemoryStore::default());

    assert_eq!(
        session.attempt_placement(0, 0, 4),
        Err(PlacementError::Rejected {
            slot: 0,
            row: 0,
            col: 4
        })
    );
    assert_eq!(session.hand().get(0).map(|p| p.id), Some(1));
    assert!(session.board().is_empty());
}

#[test]
fn test_one_free_cell_multi_cell_hand_is_game_over() {
    let mut board = Board::new();
    for row in 0..8 {
        for col in 0..8 {
            board.set(row, col, true);
        }
    }
    board.set(4, 4, false);
    let hand = Hand::from_slots([
        Some(piece(1, ShapeId::Domino)),
        Some(piece(2, ShapeId::Square)),
        Some(piece(3, ShapeId::Tee)),
    ]);

    let mut session =
        Session::resume(board, hand, ScriptedSource::new([0]), MemoryStore::default());
    assert!(session.is_game_over());
    assert_eq!(
        session.attempt_placement(0, 4, 4),
        Err(PlacementError::GameOver)
    );
}

#[test]
fn test_placement_that_strands_hand_ends_game() {
    let hand = Hand::from_slots([
        Some(piece(1, ShapeId::Single)),
        Some(piece(2, ShapeId::Domino)),
        None,
    ]);
    let mut session = Session::resume(
        checkerboard(),
        hand,
        ScriptedSource::new([0]),
        MemoryStore::new(5),
    );
    assert!(!session.is_game_over());

    let report = session.attempt_placement(0, 0, 1).unwrap();
    assert!(report.game_over);
    assert!(!report.refilled);
    assert_eq!(session.phase(), SessionPhase::GameOver);

    // The best score is written when the game ends.
    assert_eq!(session.high_score(), 10);
    assert_eq!(session.store().value(), 10);
}

#[test]
fn test_refill_only_when_all_slots_empty() {
    let hand = Hand::from_slots([
        Some(piece(1, ShapeId::Single)),
        Some(piece(2, ShapeId::Single)),
        Some(piece(3, ShapeId::Single)),
    ]);
    let mut session = Session::resume(
        Board::new(),
        hand,
        ScriptedSource::new([5]),
        MemoryStore::default(),
    );

    assert!(!session.attempt_placement(0, 0, 0).unwrap().refilled);
    assert_eq!(session.hand().len(), 2);
    assert!(!session.attempt_placement(1, 2, 2).unwrap().refilled);
    assert_eq!(session.hand().len(), 1);

    let report = session.attempt_placement(2, 4, 4).unwrap();
    assert!(report.refilled);
    assert_eq!(session.hand().len(), 3);

    let ids: Vec<u32> = session.hand().occupied().map(|(_, p)| p.id).collect();
    assert_eq!(ids, vec![4, 5, 6]);
    assert!(session
        .hand()
        .occupied()
        .all(|(_, p)| p.shape.id() == ShapeId::Square));
}

#[test]
fn test_refill_that_cannot_fit_ends_game() {
    let hand = Hand::from_slots([Some(piece(1, ShapeId::Single)), None, None]);
    let mut session = Session::resume(
        checkerboard(),
        hand,
        ScriptedSource::new([7]),
        MemoryStore::default(),
    );
    assert!(!session.is_game_over());

    // Emptying the hand deals three dominoes, and no two free cells are adjacent.
    let report = session.attempt_placement(0, 0, 1).unwrap();
    assert!(report.refilled);
    assert!(report.game_over);
    assert_eq!(session.hand().len(), 3);
    assert!(session
        .hand()
        .occupied()
        .all(|(_, p)| p.shape.id() == ShapeId::Domino));
    assert_eq!(session.store().value(), 10);
}

#[test]
fn test_refill_that_fits_keeps_playing() {
    let hand = Hand::from_slots([Some(piece(1, ShapeId::Single)), None, None]);
    let mut session = Session::resume(
        Board::new(),
        hand,
        ScriptedSource::new([7]),
        MemoryStore::default(),
    );

    let report = session.attempt_placement(0, 0, 0).unwrap();
    assert!(report.refilled);
    assert!(!report.game_over);
    assert!(!session.is_game_over());
    assert_eq!(session.store().value(), 0);
}

#[test]
fn test_resume_with_empty_hand_deals_before_checking() {
    let session = Session::resume(
        checkerboard(),
        Hand::new(),
        ScriptedSource::new([7]),
        MemoryStore::default(),
    );
    assert_eq!(session.hand().len(), 3);
    assert!(session.is_game_over());

    let mut session = Session::resume(
        checkerboard(),
        Hand::new(),
        ScriptedSource::new([6]),
        MemoryStore::default(),
    );
    assert_eq!(session.hand().len(), 3);
    assert!(!session.is_game_over());
    assert!(session.attempt_placement(0, 0, 1).is_ok());
}

#[test]
fn test_extreme_anchors_are_rejected() {
    let mut session = Session::new(3);
    for (row, col) in [(i8::MIN, 0), (0, i8::MIN), (i8::MAX, 0), (0, i8::MAX), (i8::MIN, i8::MAX)] {
        assert_eq!(
            session.attempt_placement(0, row, col),
            Err(PlacementError::Rejected { slot: 0, row, col })
        );
    }
    assert!(session.board().is_empty());
    assert_eq!(session.hand().len(), 3);
}

#[test]
fn test_restart_resets_board_and_score_keeps_high_score() {
    let mut session = Session::new(7);
    let slot = (0..3)
        .find(|&slot| {
            let piece = session.hand().get(slot).unwrap();
            session.board().can_place(&piece.shape, 0, 0)
        })
        .unwrap();
    session.attempt_placement(slot, 0, 0).unwrap();
    assert_eq!(session.score(), 10);

    session.restart();
    assert_eq!(session.score(), 0);
    assert_eq!(session.high_score(), 10);
    assert!(session.board().is_empty());
    assert_eq!(session.hand().len(), 3);
    assert_eq!(session.episode_id(), 1);
    assert_eq!(session.phase(), SessionPhase::Playing);
}

#[test]
fn test_restart_after_game_over_accepts_input() {
    let mut board = Board::new();
    for row in 0..8 {
        for col in 0..8 {
            board.set(row, col, true);
        }
    }
    board.set(0, 0, false);
    let hand = Hand::from_slots([Some(piece(1, ShapeId::Line5)), None, None]);
    let mut session =
        Session::resume(board, hand, ScriptedSource::new([6]), MemoryStore::default());
    assert!(session.is_game_over());

    session.restart();
    assert!(!session.is_game_over());
    assert!(session.attempt_placement(0, 0, 0).is_ok());
}

#[test]
fn test_high_score_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("highscore.json");

    let hand = Hand::from_slots([
        Some(piece(1, ShapeId::Single)),
        Some(piece(2, ShapeId::Domino)),
        None,
    ]);
    let mut session = Session::resume(
        checkerboard(),
        hand,
        ScriptedSource::new([0]),
        JsonFileStore::new(&path),
    );
    session.attempt_placement(0, 0, 1).unwrap();
    assert!(session.is_game_over());

    assert_eq!(JsonFileStore::new(&path).load().unwrap(), 10);

    let next = Session::with_parts(ScriptedSource::new([0]), JsonFileStore::new(&path));
    assert_eq!(next.high_score(), 10);
    assert_eq!(next.score(), 0);
}

#[test]
fn test_snapshot_reflects_session() {
    let hand = Hand::from_slots([Some(piece(9, ShapeId::Tee)), None, None]);
    let mut session =
        Session::resume(Board::new(), hand, ScriptedSource::new([0]), MemoryStore::new(70));
    session.attempt_placement(0, 0, 0).unwrap();

    let snap = session.snapshot();
    assert_eq!(snap.filled_count(), 4);
    assert!(snap.board[0][1]);
    assert!(!snap.board[0][0]);
    assert_eq!(snap.score, 10);
    assert_eq!(snap.high_score, 70);
    // Tee was the last piece, so a fresh hand of lines was dealt.
    assert!(snap.hand.iter().all(|s| s.map(|s| s.shape) == Some(ShapeId::Line3)));
    assert!(snap.playable());
}
