//! Plays one engine against another.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::board::{Board, BoardStatus, ChessMove, Color};
use crate::engine::Engine;
use crate::error::EngineError;
use crate::time::Deadline;

/// Why a game stopped.
#[derive(Clone, Debug, PartialEq)]
pub enum EndReason {
    /// The rules ended the game (mate, stalemate or a draw).
    Rules(BoardStatus),
    /// The move cap was reached; scored as a draw.
    MoveLimit,
    /// The engine playing `color` failed to produce a legal move and forfeits.
    EngineFailure { color: Color, error: EngineError },
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndReason::Rules(status) => write!(f, "{status}"),
            EndReason::MoveLimit => f.write_str("move limit exceeded"),
            EndReason::EngineFailure { error, .. } => write!(f, "engine error: {error}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct GameRecord {
    pub moves: Vec<ChessMove>,
    pub final_board: Board,
    pub status: BoardStatus,
    pub winner: Option<Color>,
    pub end_reason: EndReason,
    pub duration: Duration,
}

impl GameRecord {
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

/// Plays `start` out between `white` and `black`.
///
/// Each move request gets a fresh deadline `per_move` from now. Stateful
/// engines are told the game so far before every move. The game ends when
/// the rules say so, when an engine errors or plays an illegal move (that
/// side loses), or once `max_moves` plies have been played (a draw).
pub fn play_game(
    white: &mut dyn Engine,
    black: &mut dyn Engine,
    start: Board,
    max_moves: usize,
    per_move: Duration,
) -> GameRecord {
    let started = Instant::now();
    let mut board = start;
    let mut moves = Vec::new();
    let mut positions = vec![board.clone()];

    let (winner, end_reason) = loop {
        let status = board.status();
        if status != BoardStatus::Ongoing {
            break (board.winner(), EndReason::Rules(status));
        }
        if moves.len() >= max_moves {
            break (None, EndReason::MoveLimit);
        }

        let color = board.side_to_move();
        let engine: &mut dyn Engine = match color {
            Color::White => &mut *white,
            Color::Black => &mut *black,
        };

        if let Some(stateful) = engine.as_stateful() {
            stateful.set_position_history(&positions);
        }

        let played = engine
            .select_move(Deadline::after(per_move), &board)
            .and_then(|mv| board.make_move(mv).map(|()| mv));

        match played {
            Ok(mv) => {
                debug!(ply = moves.len() + 1, engine = engine.name(), %mv, "move played");
                moves.push(mv);
                positions.push(board.clone());
            }
            Err(error) => {
                warn!(engine = engine.name(), ?color, %error, "engine failed to move");
                break (Some(color.other()), EndReason::EngineFailure { color, error });
            }
        }
    };

    let status = board.status();
    let duration = started.elapsed();
    info!(
        moves = moves.len(),
        result = %end_reason,
        winner = ?winner,
        ?duration,
        "game over"
    );

    GameRecord {
        moves,
        final_board: board,
        status,
        winner,
        end_reason,
        duration,
    }
}
