use std::collections::BTreeMap;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::board::{Board, ChessMove};
use crate::engine::{Engine, EngineInfo, Inspectable};
use crate::error::{EngineError, Result};
use crate::movegen::{filter_captures, filter_checks};
use crate::time::Deadline;
use crate::types::{Difficulty, EngineType};

const CAPTURE_BIAS: f64 = 0.7;
const CHECK_BIAS: f64 = 0.5;

/// Easy opponent: random moves with a taste for captures and checks.
pub struct RandomEngine {
    name: String,
    time_limit: Duration,
    rng: StdRng,
    closed: bool,
}

impl RandomEngine {
    pub fn new(time_limit: Duration) -> Self {
        Self::with_rng(time_limit, StdRng::from_entropy())
    }

    /// Deterministic engine for reproducible games.
    pub fn seeded(time_limit: Duration, seed: u64) -> Self {
        Self::with_rng(time_limit, StdRng::seed_from_u64(seed))
    }

    fn with_rng(time_limit: Duration, rng: StdRng) -> Self {
        Self {
            name: "Easy Bot".to_string(),
            time_limit,
            rng,
            closed: false,
        }
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl Engine for RandomEngine {
    fn select_move(&mut self, deadline: Deadline, board: &Board) -> Result<ChessMove> {
        if self.closed {
            return Err(EngineError::Closed);
        }

        let moves = board.legal_moves();
        if moves.len() <= 1 {
            return moves.first().copied().ok_or(EngineError::NoLegalMoves);
        }

        // Out of time: skip the capture and check scans.
        let deadline = deadline.min(Deadline::after(self.time_limit));
        if deadline.is_expired() {
            return moves
                .choose(&mut self.rng)
                .copied()
                .ok_or(EngineError::NoLegalMoves);
        }

        let captures = filter_captures(board, &moves);
        let checks = filter_checks(board, &moves);

        // Each stage draws independently; an empty pool falls through.
        let pool = if self.rng.gen_bool(CAPTURE_BIAS) && !captures.is_empty() {
            &captures
        } else if self.rng.gen_bool(CHECK_BIAS) && !checks.is_empty() {
            &checks
        } else {
            &moves
        };

        pool.choose(&mut self.rng)
            .copied()
            .ok_or(EngineError::NoLegalMoves)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn as_inspectable(&self) -> Option<&dyn Inspectable> {
        Some(self)
    }
}

impl Inspectable for RandomEngine {
    fn info(&self) -> EngineInfo {
        EngineInfo {
            name: self.name.clone(),
            author: "chess-bot".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            engine_type: EngineType::Internal,
            difficulty: Difficulty::Easy,
            features: BTreeMap::from([
                ("random_selection".to_string(), true),
                ("tactical_awareness".to_string(), true),
                ("weighted_selection".to_string(), true),
            ]),
        }
    }
}
