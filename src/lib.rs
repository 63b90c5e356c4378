//! Computer opponents for chess.
//!
//! Three strength tiers sit behind one [`Engine`] trait: a weighted-random
//! player for Easy and an alpha-beta searcher for Medium and Hard. Rules of
//! the game come from `shakmaty` through the [`Board`] adapter.

pub mod arena;
pub mod board;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod movegen;
pub mod pst;
pub mod search;
pub mod time;
pub mod types;

pub use board::{Board, BoardStatus, ChessMove};
pub use engine::{
    Configurable, Engine, EngineInfo, EngineOption, Inspectable, MinimaxConfig, MinimaxEngine,
    RandomEngine, Stateful, new_engine, new_minimax_engine, new_random_engine,
};
pub use error::{EngineError, Result};
pub use evaluation::evaluate;
pub use movegen::order_moves;
pub use search::search;
pub use time::Deadline;
pub use types::{Difficulty, EngineConfig, EngineType, EvalWeights, Score, SearchResult};
