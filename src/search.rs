use tracing::debug;

use crate::board::{Board, BoardStatus, ChessMove, Color};

use crate::evaluation::evaluate_weighted;
use crate::movegen::order_moves;
use crate::time::Deadline;
use crate::types::{
    Difficulty, EvalWeights, MATE_THRESHOLD, MAX_EVAL, MAX_SEARCH_DEPTH, Score, SearchResult,
};

/// Mutable search state shared across recursion
pub struct SearchState {
    pub nodes: u64,
    pub deadline: Deadline,
    pub difficulty: Difficulty,
    pub weights: EvalWeights,
    stopped: bool,
}

impl SearchState {
    pub fn new(difficulty: Difficulty, weights: EvalWeights, deadline: Deadline) -> Self {
        Self {
            nodes: 0,
            deadline,
            difficulty,
            weights,
            stopped: false,
        }
    }

    fn check_time(&mut self) {
        if self.deadline.is_expired() {
            self.stopped = true;
        }
    }

    /// True once any node has seen the deadline pass. Scores returned after
    /// that point are placeholders and must not be trusted.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

/// Outcome of one fixed-depth search from the root.
#[derive(Clone, Copy, Debug)]
pub struct RootResult {
    pub best_move: Option<ChessMove>,
    pub score: Score,
    /// False if the deadline passed before every root move was searched.
    pub completed: bool,
}

/// Static value of a node for the side to move. Mate scores lose one point
/// per ply so that shorter mates are preferred and longer losses delayed.
/// Anything else is clamped to `MAX_EVAL`.
fn leaf_score(board: &Board, state: &SearchState, ply: usize) -> Score {
    let eval = evaluate_weighted(board, state.difficulty, &state.weights);

    let white_score = if eval.abs() >= MATE_THRESHOLD && board.status() == BoardStatus::Checkmate {
        eval - eval.signum() * ply as Score
    } else {
        eval.clamp(-MAX_EVAL, MAX_EVAL)
    };

    match board.side_to_move() {
        Color::White => white_score,
        Color::Black => -white_score,
    }
}

/// Iterative deepening search. Returns best move found
///
/// Depths run from 1 up to `max_depth`. A depth that the deadline interrupts
/// is thrown away; the answer always comes from the deepest completed one,
/// or is the first legal move if not even depth 1 finished.
pub fn search(board: &Board, state: &mut SearchState, max_depth: u8) -> SearchResult {
    let moves = board.legal_moves();

    let Some(&first_move) = moves.first() else {
        return SearchResult {
            best_move: None,
            score: leaf_score(board, state, 0),
            depth: 0,
            nodes: state.nodes,
        };
    };

    // Forced move: nothing to search.
    if moves.len() == 1 {
        let child = board.make_move_new(first_move);
        return SearchResult {
            best_move: Some(first_move),
            score: -leaf_score(&child, state, 1),
            depth: 0,
            nodes: state.nodes,
        };
    }

    let mut best_move: Option<ChessMove> = None;
    let mut best_score: Score = 0.0;
    let mut completed_depth = 0;

    for depth in 1..=max_depth.min(MAX_SEARCH_DEPTH) {
        state.check_time();
        if state.is_stopped() {
            debug!(depth, "deadline reached before starting depth");
            break;
        }

        let result = search_root(board, state, depth);
        if !result.completed {
            debug!(depth, nodes = state.nodes, "depth abandoned at deadline");
            break;
        }

        best_move = result.best_move;
        best_score = result.score;
        completed_depth = depth;

        debug!(
            depth,
            score = best_score,
            nodes = state.nodes,
            best_move = %result.best_move.map(|m| m.to_string()).unwrap_or_default(),
            "depth complete"
        );
    }

    SearchResult {
        best_move: best_move.or(Some(first_move)),
        score: best_score,
        depth: completed_depth,
        nodes: state.nodes,
    }
}

/// Fixed-depth search from the root, reporting which move scored best.
pub fn search_root(board: &Board, state: &mut SearchState, depth: u8) -> RootResult {
    let moves = board.legal_moves();

    let mut alpha = Score::NEG_INFINITY;
    let beta = Score::INFINITY;
    let mut best_move: Option<ChessMove> = None;
    let mut best_score = Score::NEG_INFINITY;

    for mv in order_moves(board, &moves) {
        let child = board.make_move_new(mv);
        let score = -negamax(&child, state, depth.saturating_sub(1), -beta, -alpha, 1);

        if state.is_stopped() {
            break;
        }

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }

        if score > alpha {
            alpha = score;
        }

        if alpha >= beta {
            break;
        }
    }

    RootResult {
        best_move,
        score: best_score,
        completed: !state.is_stopped(),
    }
}

/// Negamax with alpha-beta pruning. Returns the score for the side to move.
///
/// Once the deadline has passed every node returns 0.0 without searching;
/// the caller is expected to discard the whole depth.
pub fn negamax(
    board: &Board,
    state: &mut SearchState,
    depth: u8,
    mut alpha: Score,
    beta: Score,
    ply: usize,
) -> Score {
    state.nodes += 1;
    state.check_time();
    if state.is_stopped() {
        return 0.0;
    }

    if depth == 0 || board.is_game_over() {
        return leaf_score(board, state, ply);
    }

    let moves = board.legal_moves();
    if moves.is_empty() {
        return leaf_score(board, state, ply);
    }

    let mut best_score = Score::NEG_INFINITY;

    for mv in order_moves(board, &moves) {
        let child = board.make_move_new(mv);
        let score = -negamax(&child, state, depth - 1, -beta, -alpha, ply + 1);

        if score > best_score {
            best_score = score;
        }

        if score > alpha {
            alpha = score;
        }

        // Beta cutoff
        if alpha >= beta {
            break;
        }
    }

    best_score
}
