//! Thin adapter over the `shakmaty` rules engine.
//!
//! Everything the engines need from the rules of chess goes through [`Board`]:
//! legal moves, game status (including repetition and move-count draws),
//! attack queries and copy-then-play.

#[allow(clippy::module_inception)]
mod board;
mod chessmove;

pub use board::{Board, BoardStatus};
pub use chessmove::ChessMove;
pub use shakmaty::{Color, File, Piece, Rank, Role, Square};
