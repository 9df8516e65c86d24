//! Plays the engine against itself from the start position.
//!
//! Usage:
//!   cargo run --release --example selfplay -p classical_engine -- [config.toml] [max_plies]
//!
//! `RUST_LOG=classical_engine=debug` shows root moves and iterations.

use std::env;
use std::process::ExitCode;

use chess_core::{Board, Color, GameStatus};
use classical_engine::{Engine, EngineConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn play(config: EngineConfig, max_plies: u32) -> Result<GameStatus, Box<dyn std::error::Error>> {
    let white = Engine::with_config(Color::White, config.clone())?;
    let black = Engine::with_config(Color::Black, config)?;
    let mut board = Board::startpos();

    for ply in 0..max_plies {
        let status = board.status();
        if status != GameStatus::Ongoing {
            return Ok(status);
        }
        let engine = match board.side_to_move {
            Color::White => &white,
            Color::Black => &black,
        };
        let result = engine.search(&board)?;
        let Some(mv) = result.best_move else {
            break;
        };
        println!("{:>3}. {} {mv} ({:+.2})", ply / 2 + 1, board.side_to_move, result.score);
        board = board.apply(mv)?;
    }

    println!("{board}");
    Ok(board.status())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    let config = match args.get(1) {
        Some(path) => match EngineConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                error!(%err, path = %path, "cannot load engine config");
                return ExitCode::FAILURE;
            }
        },
        None => {
            let mut config = EngineConfig::default();
            config.search.depth = 3;
            config
        }
    };
    let max_plies: u32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200);

    info!(?config, max_plies, "starting self-play");
    match play(config, max_plies) {
        Ok(status) => {
            info!(?status, "game over");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "self-play failed");
            ExitCode::FAILURE
        }
    }
}
