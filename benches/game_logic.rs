use criterion::{black_box, criterion_group, criterion_main, Criterion};
use block_puzzle::core::{get_shape, Board, Session};
use block_puzzle::types::ShapeId;

fn bench_can_place(c: &mut Criterion) {
    let board = Board::from_ascii(&["#.#.#.#.", ".#.#.#.#", "#.#.#.#."]);
    let shape = get_shape(ShapeId::Tee);

    c.bench_function("can_place_tee", |b| {
        b.iter(|| board.can_place(black_box(&shape), black_box(4), black_box(3)))
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_row_and_column", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for i in 0..8 {
                board.set(2, i, true);
                board.set(i, 5, true);
            }
            board.clear_completed_lines()
        })
    });
}

fn bench_valid_placement_scan(c: &mut Criterion) {
    // Worst case: nearly full board, no fit for a 5-line.
    let mut board = Board::new();
    for row in 0..8 {
        for col in 0..8 {
            board.set(row, col, (row + col) % 3 != 0);
        }
    }
    let shape = get_shape(ShapeId::Line5);

    c.bench_function("has_any_valid_placement_miss", |b| {
        b.iter(|| board.has_any_valid_placement(black_box(&shape)))
    });
}

fn bench_attempt_placement(c: &mut Criterion) {
    c.bench_function("attempt_placement_100_turns", |b| {
        b.iter(|| {
            let mut session = Session::new(black_box(12345));
            for _ in 0..100 {
                if session.is_game_over() {
                    break;
                }
                let next = (0..3).find_map(|slot| {
                    let piece = session.hand().get(slot)?;
                    let anchor = *session.board().valid_anchors(&piece.shape).first()?;
                    Some((slot, anchor))
                });
                let Some((slot, anchor)) = next else {
                    break;
                };
                let _ = session.attempt_placement(slot, anchor.row as i8, anchor.col as i8);
            }
            session.score()
        })
    });
}

criterion_group!(
    benches,
    bench_can_place,
    bench_line_clear,
    bench_valid_placement_scan,
    bench_attempt_placement
);
criterion_main!(benches);
