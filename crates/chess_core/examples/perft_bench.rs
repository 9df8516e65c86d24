//! Perft timing over the standard verification positions.
//!
//! Usage:
//!   cargo run --release --example perft_bench -p chess_core -- [depth] [fen]
//!
//! With a FEN the position is split per root move (`divide`), which is the
//! usual way to bisect a move generator bug against a reference engine.
//! Set `RUST_LOG=debug` for per-move lines.

use std::env;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use chess_core::{divide, perft, Board, ChessError};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

const POSITIONS: &[(&str, &str)] = &[
    (
        "start",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
    ("position 3", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
    (
        "position 4",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    ),
    (
        "position 5",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    ),
];

fn nps(nodes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 { nodes as f64 / secs } else { 0.0 }
}

fn split(fen: &str, depth: u8) -> Result<(), ChessError> {
    let board = Board::from_fen(fen)?;
    println!("{board}");

    let start = Instant::now();
    let counts = divide(&board, depth);
    let elapsed = start.elapsed();

    let mut total = 0u64;
    for (mv, nodes) in &counts {
        debug!(%mv, nodes, "root move");
        println!("{mv}: {nodes}");
        total += nodes;
    }
    info!(depth, moves = counts.len(), total, ?elapsed, nps = nps(total, elapsed), "divide done");
    println!("\nNodes: {total}");
    Ok(())
}

fn suite(depth: u8) -> Result<(), ChessError> {
    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;

    for (name, fen) in POSITIONS {
        let board = Board::from_fen(fen)?;
        let start = Instant::now();
        let nodes = perft(&board, depth);
        let elapsed = start.elapsed();

        total_nodes += nodes;
        total_time += elapsed;
        println!(
            "{name:.<20} {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)",
            nps(nodes, elapsed)
        );
    }

    info!(depth, total_nodes, ?total_time, nps = nps(total_nodes, total_time), "suite done");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);

    let result = match args.get(2) {
        Some(fen) => split(fen, depth),
        None => suite(depth),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "perft failed");
            ExitCode::FAILURE
        }
    }
}
