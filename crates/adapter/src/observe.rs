//! Observation building and core-to-wire mapping.

use block_puzzle_core::{PlacementError, PlacementReport, SessionSnapshot};

use crate::protocol::*;
use crate::types::BOARD_SIZE;

/// Build an observation message from a session snapshot
pub fn build_observation(
    snapshot: &SessionSnapshot,
    seq: u64,
    last_event: Option<LastEvent>,
) -> ObservationMessage {
    // Board snapshot (no heap)
    let mut cells = [[0u8; BOARD_SIZE as usize]; BOARD_SIZE as usize];
    for (out_row, row) in cells.iter_mut().zip(snapshot.board.iter()) {
        for (out, &filled) in out_row.iter_mut().zip(row.iter()) {
            *out = u8::from(filled);
        }
    }

    let hand = snapshot.hand.map(|slot| {
        slot.map(|s| SlotView {
            piece_id: s.piece_id,
            shape: ShapeName(s.shape),
            color: s.color.0,
            placeable: s.placeable,
        })
    });

    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        ts: current_timestamp_ms(),
        playable: snapshot.playable(),
        game_over: snapshot.game_over,
        episode_id: snapshot.episode_id,
        piece_id: snapshot.piece_id,
        board: BoardSnapshot {
            size: BOARD_SIZE,
            cells,
        },
        hand,
        score: snapshot.score,
        high_score: snapshot.high_score,
        last_event,
    }
}

/// Describe a successful placement for the next observation
pub fn last_event_from_report(report: &PlacementReport) -> LastEvent {
    LastEvent {
        slot: report.slot,
        piece_id: report.piece.id,
        row: report.row,
        col: report.col,
        cells_placed: report.cells_placed,
        cleared_cells: report
            .cleared
            .cells()
            .iter()
            .map(|c| [c.row, c.col])
            .collect(),
        cleared_lines: report
            .cleared
            .lines()
            .iter()
            .map(|line| LineView {
                kind: line.kind_str().to_string(),
                index: line.index(),
            })
            .collect(),
        points: report.score.total,
        refilled: report.refilled,
    }
}

pub fn error_code_for(err: &PlacementError) -> ErrorCode {
    match err {
        PlacementError::InvalidSlot(_) => ErrorCode::InvalidSlot,
        PlacementError::Rejected { .. } => ErrorCode::Rejected,
        PlacementError::GameOver => ErrorCode::GameOver,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use block_puzzle_core::{Board, Hand, MemoryStore, Piece, ScriptedSource, Session};
    use crate::types::ShapeId;

    fn single_piece(id: u32) -> Piece {
        Piece {
            id,
            shape: block_puzzle_core::get_shape(ShapeId::Single),
        }
    }

    #[test]
    fn test_observation_mirrors_snapshot() {
        let board = Board::from_ascii(&["#......."]);
        let hand = Hand::from_slots([Some(single_piece(4)), None, None]);
        let session = Session::resume(board, hand, ScriptedSource::new([0]), MemoryStore::new(50));

        let obs = build_observation(&session.snapshot(), 9, None);
        assert_eq!(obs.seq, 9);
        assert_eq!(obs.board.cells[0][0], 1);
        assert_eq!(obs.board.cells[0][1], 0);
        assert_eq!(obs.high_score, 50);
        assert!(obs.playable);
        let slot = obs.hand[0].unwrap();
        assert_eq!(slot.shape, ShapeName(ShapeId::Single));
        assert!(slot.placeable);
        assert!(obs.hand[1].is_none());

        let v = serde_json::to_value(&obs).unwrap();
        assert_eq!(v["type"], "observation");
        assert_eq!(v["hand"][0]["shape"], "single");
        assert!(v.get("last_event").is_none());
    }

    #[test]
    fn test_last_event_lists_cleared_lines() {
        let board = Board::from_ascii(&["#######."]);
        let hand = Hand::from_slots([Some(single_piece(1)), Some(single_piece(2)), None]);
        let mut session =
            Session::resume(board, hand, ScriptedSource::new([0]), MemoryStore::default());

        let report = session.attempt_placement(0, 0, 7).unwrap();
        let event = last_event_from_report(&report);
        assert_eq!(event.cleared_cells.len(), 8);
        assert_eq!(event.cleared_cells[7], [0, 7]);
        assert_eq!(event.cleared_lines.len(), 1);
        assert_eq!(event.cleared_lines[0].kind, "row");
        assert_eq!(event.points, 110);
        assert!(!event.refilled);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            error_code_for(&PlacementError::InvalidSlot(7)),
            ErrorCode::InvalidSlot
        );
        assert_eq!(
            error_code_for(&PlacementError::Rejected {
                slot: 0,
                row: 9,
                col: 0
            }),
            ErrorCode::Rejected
        );
        assert_eq!(error_code_for(&PlacementError::GameOver), ErrorCode::GameOver);
    }
}
