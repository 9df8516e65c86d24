use std::time::Instant;

use rayon::prelude::*;

use chess_core::{Board, perft};

const FULL_PERFT_ENV: &str = "FULL_PERFT";
const NODE_LIMIT: u64 = 200_000;

/// Reference node counts: (name, FEN, [(depth, nodes)]).
const CASES: &[(&str, &str, &[(u8, u64)])] = &[
    (
        "start",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &[(1, 20), (2, 400), (3, 8_902), (4, 197_281)],
    ),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        &[(1, 48), (2, 2_039), (3, 97_862)],
    ),
    (
        "position 3",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        &[(1, 14), (2, 191), (3, 2_812), (4, 43_238)],
    ),
    (
        "position 4",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        &[(1, 6), (2, 264), (3, 9_467)],
    ),
    (
        "position 5",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        &[(1, 44), (2, 1_486), (3, 62_379)],
    ),
];

#[test]
fn perft_matches_reference_counts() {
    let full = std::env::var(FULL_PERFT_ENV).is_ok();

    CASES.par_iter().for_each(|(name, fen, depths)| {
        let board = Board::from_fen(fen).expect("reference FEN parses");
        let case_start = Instant::now();
        let mut total_nodes = 0u64;

        for &(depth, expected) in depths.iter() {
            if !full && expected > NODE_LIMIT {
                eprintln!(
                    "Skipping depth {depth} for {name} (expected {expected} nodes); set {FULL_PERFT_ENV}=1 to run all."
                );
                continue;
            }
            let got = perft(&board, depth);
            assert_eq!(
                got, expected,
                "Perft mismatch for {name} '{fen}' at depth {depth}"
            );
            total_nodes += got;
        }

        println!(
            "{name}: {total_nodes} nodes in {:.3?}",
            case_start.elapsed()
        );
    });
}

#[test]
fn divide_sums_to_perft() {
    let board = Board::startpos();
    let split = chess_core::divide(&board, 3);
    assert_eq!(split.len(), 20);
    assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), perft(&board, 3));
}
