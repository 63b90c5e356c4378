use std::collections::BTreeMap;

use tracing::debug;

use crate::board::{Board, ChessMove};
use crate::engine::{Configurable, Engine, EngineInfo, Inspectable, MinimaxConfig, Stateful};
use crate::error::{EngineError, Result};
use crate::search::{SearchState, search};
use crate::time::Deadline;
use crate::types::{Difficulty, EngineConfig, EngineType, SearchResult};

/// Alpha-beta engine behind the Medium and Hard opponents.
pub struct MinimaxEngine {
    name: String,
    config: EngineConfig,
    history: Vec<u64>,
    last_search: Option<SearchResult>,
    closed: bool,
}

impl MinimaxEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            name: format!("{} Bot", config.difficulty),
            config,
            history: Vec::new(),
            last_search: None,
            closed: false,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Statistics of the most recent search, if one ran.
    pub fn last_search(&self) -> Option<&SearchResult> {
        self.last_search.as_ref()
    }
}

/// Joins seeded keys with the board's own, oldest first.
///
/// The board's keys are always kept whole. Seeded keys that the board's
/// history already starts with are dropped, so the overlap is counted once.
fn merge_history(seeded: &[u64], own: &[u64]) -> Vec<u64> {
    let overlap = (0..seeded.len()).find(|&start| own.starts_with(&seeded[start..]));
    let older = match overlap {
        Some(start) => &seeded[..start],
        None => seeded,
    };
    older.iter().chain(own).copied().collect()
}

impl Engine for MinimaxEngine {
    fn select_move(&mut self, deadline: Deadline, board: &Board) -> Result<ChessMove> {
        if self.closed {
            return Err(EngineError::Closed);
        }

        if board.legal_moves().is_empty() {
            return Err(EngineError::NoLegalMoves);
        }

        let mut root = board.clone();
        if !self.history.is_empty() {
            root.set_history(merge_history(&self.history, board.history()));
        }

        let deadline = deadline.min(Deadline::after(self.config.time_limit));
        let mut state = SearchState::new(self.config.difficulty, self.config.weights, deadline);
        let result = search(&root, &mut state, self.config.max_depth);

        debug!(
            engine = %self.name,
            depth = result.depth,
            score = result.score,
            nodes = result.nodes,
            "search finished"
        );

        self.last_search = Some(result);
        result.best_move.ok_or(EngineError::NoLegalMoves)
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

    fn as_configurable(&mut self) -> Option<&mut dyn Configurable> {
        Some(self)
    }

    fn as_stateful(&mut self) -> Option<&mut dyn Stateful> {
        Some(self)
    }

    fn as_inspectable(&self) -> Option<&dyn Inspectable> {
        Some(self)
    }
}

impl Configurable for MinimaxEngine {
    fn configure(&mut self, config: &MinimaxConfig) -> Result<()> {
        config.validate()?;

        if let Some(depth) = config.search_depth {
            self.config.max_depth = depth;
        }
        if let Some(limit) = config.time_limit {
            self.config.time_limit = limit;
        }

        let weights = &mut self.config.weights;
        if let Some(w) = config.material_weight {
            weights.material = w;
        }
        if let Some(w) = config.piece_square_weight {
            weights.piece_square = w;
        }
        if let Some(w) = config.mobility_weight {
            weights.mobility = w;
        }
        if let Some(w) = config.king_safety_weight {
            weights.king_safety = w;
        }

        Ok(())
    }
}

impl Stateful for MinimaxEngine {
    fn set_position_history(&mut self, history: &[Board]) {
        self.history = history.iter().map(Board::hash).collect();
    }
}

impl Inspectable for MinimaxEngine {
    fn info(&self) -> EngineInfo {
        let difficulty = self.config.difficulty;
        EngineInfo {
            name: self.name.clone(),
            author: "chess-bot".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            engine_type: EngineType::Internal,
            difficulty,
            features: BTreeMap::from([
                ("alpha_beta".to_string(), true),
                ("iterative_deepening".to_string(), true),
                ("move_ordering".to_string(), true),
                ("configurable".to_string(), true),
                ("piece_square_tables".to_string(), difficulty >= Difficulty::Medium),
                ("mobility".to_string(), difficulty >= Difficulty::Medium),
                ("king_safety".to_string(), difficulty >= Difficulty::Hard),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn engine(difficulty: Difficulty) -> MinimaxEngine {
        MinimaxEngine::new(EngineConfig::from_difficulty(difficulty))
    }

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn test_defaults() {
        let medium = engine(Difficulty::Medium);
        assert_eq!(medium.name(), "Medium Bot");
        assert_eq!(medium.config().max_depth, 4);
        assert_eq!(medium.config().time_limit, Duration::from_secs(4));

        let hard = engine(Difficulty::Hard);
        assert_eq!(hard.name(), "Hard Bot");
        assert_eq!(hard.config().max_depth, 6);
        assert_eq!(hard.config().time_limit, Duration::from_secs(8));
    }

    #[test]
    fn test_finds_mate_in_one() {
        let mut e = engine(Difficulty::Medium);
        let b = board("6k1/5ppp/8/8/8/8/8/R6K w - - 0 1");
        let mv = e.select_move(Deadline::unbounded(), &b).unwrap();
        assert_eq!(mv.to_string(), "a1a8");
        assert!(b.make_move_new(mv).status() == crate::board::BoardStatus::Checkmate);
    }

    #[test]
    fn test_closed() {
        let mut e = engine(Difficulty::Medium);
        e.close().unwrap();
        assert_eq!(e.close(), Ok(()));
        assert_eq!(
            e.select_move(Deadline::unbounded(), &Board::default()),
            Err(EngineError::Closed)
        );
    }

    #[test]
    fn test_no_legal_moves() {
        let mut e = engine(Difficulty::Hard);
        let stalemate = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert_eq!(
            e.select_move(Deadline::unbounded(), &stalemate),
            Err(EngineError::NoLegalMoves)
        );
    }

    #[test]
    fn test_configure_applies_fields() {
        let mut e = engine(Difficulty::Medium);
        let config = MinimaxConfig {
            search_depth: Some(2),
            time_limit: Some(Duration::from_millis(500)),
            mobility_weight: Some(0.0),
            ..Default::default()
        };
        e.as_configurable().unwrap().configure(&config).unwrap();

        assert_eq!(e.config().max_depth, 2);
        assert_eq!(e.config().time_limit, Duration::from_millis(500));
        assert_eq!(e.config().weights.mobility, 0.0);
        assert_eq!(e.config().weights.material, 1.0);
    }

    #[test]
    fn test_configure_is_all_or_nothing() {
        let mut e = engine(Difficulty::Medium);
        let before = e.config().clone();
        let config = MinimaxConfig {
            search_depth: Some(21),
            time_limit: Some(Duration::from_secs(1)),
            material_weight: Some(2.0),
            ..Default::default()
        };
        assert!(matches!(
            e.configure(&config),
            Err(EngineError::InvalidConfiguration(_))
        ));
        assert_eq!(e.config(), &before);

        let zero_time = MinimaxConfig {
            search_depth: Some(3),
            time_limit: Some(Duration::ZERO),
            ..Default::default()
        };
        assert!(e.configure(&zero_time).is_err());
        assert_eq!(e.config(), &before);
    }

    #[test]
    fn test_depth_reached_with_time() {
        let mut e = engine(Difficulty::Medium);
        e.configure(&MinimaxConfig {
            search_depth: Some(2),
            ..Default::default()
        })
        .unwrap();
        e.select_move(Deadline::unbounded(), &Board::default())
            .unwrap();
        assert_eq!(e.last_search().unwrap().depth, 2);
    }

    #[test]
    fn test_expired_deadline_returns_legal_move() {
        let mut e = engine(Difficulty::Hard);
        let b = Board::default();
        let mv = e.select_move(Deadline::after(Duration::ZERO), &b).unwrap();
        assert!(b.legal_moves().contains(&mv));
        assert_eq!(e.last_search().unwrap().depth, 0);
    }

    #[test]
    fn test_time_limit_caps_deadline() {
        let mut e = engine(Difficulty::Hard);
        e.configure(&MinimaxConfig {
            search_depth: Some(20),
            time_limit: Some(Duration::from_millis(100)),
            ..Default::default()
        })
        .unwrap();

        let start = std::time::Instant::now();
        let b = board("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3");
        let mv = e.select_move(Deadline::unbounded(), &b).unwrap();
        assert!(b.legal_moves().contains(&mv));
        assert!(start.elapsed() < Duration::from_secs(5));
        assert!(e.last_search().unwrap().depth < 20);
    }

    #[test]
    fn test_history_makes_repetition_a_draw() {
        // White is a rook down, so a third repetition is the best result.
        let start = board("4k3/8/8/8/8/8/r7/4K2N b - - 0 1");
        let mut game = vec![start.clone()];
        let mut b = start;
        for uci in ["a2b2", "e1f1", "b2a2", "f1e1", "a2b2", "e1f1", "b2a2"] {
            let mv = b
                .legal_moves()
                .into_iter()
                .find(|m| m.to_string() == uci)
                .unwrap();
            b.make_move(mv).unwrap();
            game.push(b.clone());
        }

        let mut e = engine(Difficulty::Medium);
        e.configure(&MinimaxConfig {
            search_depth: Some(1),
            ..Default::default()
        })
        .unwrap();
        e.set_position_history(&game);

        // Same position as `b`, but with no memory of how it arose.
        let fresh = board("4k3/8/8/8/8/8/r7/5K1N w - - 7 5");
        assert_eq!(fresh.hash(), b.hash());
        let mv = e.select_move(Deadline::unbounded(), &fresh).unwrap();
        assert_eq!(mv.to_string(), "f1e1");

        b.make_move(mv).unwrap();
        assert_eq!(b.status(), crate::board::BoardStatus::DrawThreefoldRepetition);
    }

    #[test]
    fn test_merge_history() {
        // Board only knows itself; the seeded game ends on it.
        assert_eq!(merge_history(&[1, 2, 3], &[3]), vec![1, 2, 3]);
        // Seeded game stops short of the board's position.
        assert_eq!(merge_history(&[1, 2], &[3]), vec![1, 2, 3]);
        // Board has moved on since the engine was seeded.
        assert_eq!(merge_history(&[1, 2], &[2, 4, 2]), vec![1, 2, 4, 2]);
        assert_eq!(merge_history(&[5], &[5, 6, 5, 6, 5]), vec![5, 6, 5, 6, 5]);
    }

    #[test]
    fn test_stale_seed_keeps_board_repetitions() {
        let start = board("4k3/8/8/8/8/8/r7/4K2N b - - 0 1");
        let mut b = start.clone();
        for uci in ["a2b2", "e1f1", "b2a2", "f1e1", "a2b2", "e1f1", "b2a2"] {
            let mv = b
                .legal_moves()
                .into_iter()
                .find(|m| m.to_string() == uci)
                .unwrap();
            b.make_move(mv).unwrap();
        }

        let mut e = engine(Difficulty::Medium);
        e.configure(&MinimaxConfig {
            search_depth: Some(1),
            ..Default::default()
        })
        .unwrap();
        // Seeded at the start of the game and never updated since.
        e.set_position_history(&[start]);

        let mv = e.select_move(Deadline::unbounded(), &b).unwrap();
        assert_eq!(mv.to_string(), "f1e1");
        assert_eq!(e.last_search().unwrap().score, 0.0);
    }

    #[test]
    fn test_info_features() {
        let medium = engine(Difficulty::Medium).info();
        assert_eq!(medium.difficulty, Difficulty::Medium);
        assert!(medium.has_feature("mobility"));
        assert!(!medium.has_feature("king_safety"));

        let hard = engine(Difficulty::Hard).info();
        assert!(hard.has_feature("king_safety"));
        assert_eq!(hard.engine_type, EngineType::Internal);
    }
}
