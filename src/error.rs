use thiserror::Error;

/// Errors reported to callers of an engine or of the board adapter.
///
/// Running out of time is not an error: the search always degrades to a
/// best-effort legal move instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The engine was closed and cannot search any more.
    #[error("engine is closed")]
    Closed,

    /// The position has no legal moves; the game is already over.
    #[error("no legal moves available")]
    NoLegalMoves,

    /// A configuration value was out of range or could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("illegal move: {0}")]
    IllegalMove(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
