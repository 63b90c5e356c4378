use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::ChessMove;
use crate::error::EngineError;

/// Position score in pawns, from White's point of view unless noted.
pub type Score = f64;

pub const SCORE_MATE: Score = 10_000.0;
/// Any score at or beyond this magnitude is a forced mate.
pub const MATE_THRESHOLD: Score = 9_999.0;
/// Non-terminal scores seen by the search are clamped to this magnitude, so
/// heavy evaluation weights never compete with a mate.
pub const MAX_EVAL: Score = 9_000.0;

pub const MIN_SEARCH_DEPTH: u8 = 1;
pub const MAX_SEARCH_DEPTH: u8 = 20;

/// Games longer than this are adjudicated as drawn by the arena.
pub const MAX_GAME_MOVES: usize = 500;

/// Strength tiers for the built-in engines; ordered weakest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(s)
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(EngineError::InvalidConfiguration(format!(
                "unknown difficulty: {s}"
            ))),
        }
    }
}

/// Where an engine's moves come from. Only `Internal` engines exist today.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineType {
    Internal,
    Uci,
    Rl,
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EngineType::Internal => "Internal",
            EngineType::Uci => "UCI",
            EngineType::Rl => "RL",
        };
        f.write_str(s)
    }
}

/// Multipliers applied to the evaluation terms. Any value is accepted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvalWeights {
    pub material: f64,
    pub piece_square: f64,
    pub mobility: f64,
    pub king_safety: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            material: 1.0,
            piece_square: 1.0,
            mobility: 1.0,
            king_safety: 1.0,
        }
    }
}

/// Settings of a search engine instance.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub difficulty: Difficulty,
    pub max_depth: u8,
    pub time_limit: Duration,
    pub weights: EvalWeights,
}

impl EngineConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let (max_depth, time_limit) = match difficulty {
            Difficulty::Easy => (1, Duration::from_secs(2)),
            Difficulty::Medium => (4, Duration::from_secs(4)),
            Difficulty::Hard => (6, Duration::from_secs(8)),
        };
        Self {
            difficulty,
            max_depth,
            time_limit,
            weights: EvalWeights::default(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Medium)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SearchResult {
    pub best_move: Option<ChessMove>,
    pub score: Score,
    /// Deepest iteration that finished before the deadline; 0 if none did.
    pub depth: u8,
    pub nodes: u64,
}
