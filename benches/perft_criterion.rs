use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use plum_board::game_controller::game_controller::GameController;
use plum_board::game_state::board_state::BoardState;
use plum_board::move_generation::legal_move_generator::LegalMoveGenerator;
use plum_board::move_generation::perft::perft;
use plum_board::utils::algebraic::algebraic_to_square;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
    expected_nodes: &'static [usize],
}

const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "position_1",
        fen: STARTPOS_FEN,
        expected_nodes: &[20, 400, 8902],
    },
    BenchCase {
        name: "position_2",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_nodes: &[48, 2039],
    },
    BenchCase {
        name: "position_3",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2812],
    },
];

// Italian opening as a click sequence, replayed through the controller.
const OPENING_CLICKS: &[(&str, &str)] = &[
    ("e2", "e4"),
    ("e7", "e5"),
    ("g1", "f3"),
    ("b8", "c6"),
    ("f1", "c4"),
    ("f8", "c5"),
    ("e1", "g1"),
    ("g8", "f6"),
];

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in CASES {
        let board = BoardState::from_fen(case.fen).expect("benchmark FEN should parse");

        for (depth_idx, expected_nodes) in case.expected_nodes.iter().enumerate() {
            let depth = (depth_idx + 1) as u8;

            // Correctness guard before benchmarking.
            let warmup = perft(&LegalMoveGenerator, &board, depth).expect("perft should run");
            assert_eq!(
                warmup.nodes, *expected_nodes,
                "node mismatch in warmup for {} depth {}",
                case.name, depth
            );

            group.throughput(Throughput::Elements(*expected_nodes as u64));
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{}_d{}", case.name, depth)),
                expected_nodes,
                |b, expected| {
                    b.iter(|| {
                        let count = perft(&LegalMoveGenerator, black_box(&board), black_box(depth))
                            .expect("perft benchmark run should succeed");
                        assert_eq!(count.nodes, *expected);
                        black_box(count.nodes)
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_controller_replay(c: &mut Criterion) {
    let clicks: Vec<(u8, u8)> = OPENING_CLICKS
        .iter()
        .map(|(from, to)| {
            (
                algebraic_to_square(from).expect("valid square"),
                algebraic_to_square(to).expect("valid square"),
            )
        })
        .collect();

    c.bench_function("controller_replay_and_undo", |b| {
        b.iter(|| {
            let mut controller = GameController::new().expect("start position is valid");
            for &(from, to) in &clicks {
                controller
                    .attempt_move(black_box(from), black_box(to))
                    .expect("opening move should be legal");
            }
            let undone = controller.undo_all().expect("history is not empty");
            assert_eq!(undone, clicks.len());
            black_box(controller.move_list())
        });
    });
}

criterion_group!(perft_benches, bench_perft, bench_controller_replay);
criterion_main!(perft_benches);
