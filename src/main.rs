//! Bot-vs-bot demo.
//!
//! Usage: `chess-bot [WHITE] [BLACK] [FEN...]` where WHITE and BLACK are
//! `easy`, `medium` or `hard` (default `medium`). Set `RUST_LOG=debug` to
//! watch each search deepen.

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use tracing::error;
use tracing_subscriber::EnvFilter;

use chess_bot::arena::play_game;
use chess_bot::types::MAX_GAME_MOVES;
use chess_bot::{Board, Difficulty, Result, new_engine};

const PER_MOVE: Duration = Duration::from_secs(10);

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(%e, "demo failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let mut args = env::args().skip(1);
    let white: Difficulty = args.next().as_deref().unwrap_or("medium").parse()?;
    let black: Difficulty = args.next().as_deref().unwrap_or("medium").parse()?;

    let fen = args.collect::<Vec<_>>().join(" ");
    let start = if fen.is_empty() {
        Board::default()
    } else {
        Board::from_fen(&fen)?
    };

    let mut white_engine = new_engine(white, &[])?;
    let mut black_engine = new_engine(black, &[])?;
    println!("{} (white) vs {} (black)", white_engine.name(), black_engine.name());

    let record = play_game(
        white_engine.as_mut(),
        black_engine.as_mut(),
        start,
        MAX_GAME_MOVES,
        PER_MOVE,
    );

    white_engine.close()?;
    black_engine.close()?;

    let moves: Vec<String> = record.moves.iter().map(|m| m.to_string()).collect();
    println!("{}", moves.join(" "));
    println!();
    println!("{}", record.final_board);
    println!();

    let outcome = match record.winner {
        Some(color) => format!("{color:?} wins"),
        None => "draw".to_string(),
    };
    println!(
        "{outcome} by {} after {} plies in {:.1?}",
        record.end_reason,
        record.moves.len(),
        record.duration
    );

    Ok(())
}
