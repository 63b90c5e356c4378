//! Move-selection engines and the contract callers program against.
//!
//! Every engine implements [`Engine`]. Optional capabilities are reached
//! through the `as_*` accessors rather than assumed, so a caller holding a
//! `Box<dyn Engine>` can ask whether it may be reconfigured or inspected.

mod factory;
mod minimax;
mod random;

pub use factory::{EngineOption, new_engine, new_minimax_engine, new_random_engine};
pub use minimax::MinimaxEngine;
pub use random::RandomEngine;

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::{Board, ChessMove};
use crate::error::{EngineError, Result};
use crate::time::Deadline;
use crate::types::{Difficulty, EngineType, MAX_SEARCH_DEPTH, MIN_SEARCH_DEPTH};

pub trait Engine: Send {
    /// Picks a legal move for the side to move in `board`.
    ///
    /// Fails with [`EngineError::Closed`] after [`Engine::close`] and with
    /// [`EngineError::NoLegalMoves`] if the game is already over. Running
    /// out of time is not an error: the engine answers with the best move
    /// it has.
    fn select_move(&mut self, deadline: Deadline, board: &Board) -> Result<ChessMove>;

    fn name(&self) -> &str;

    /// Marks the engine closed. Safe to call more than once and never fails.
    fn close(&mut self) -> Result<()>;

    fn is_closed(&self) -> bool;

    fn as_configurable(&mut self) -> Option<&mut dyn Configurable> {
        None
    }

    fn as_stateful(&mut self) -> Option<&mut dyn Stateful> {
        None
    }

    fn as_inspectable(&self) -> Option<&dyn Inspectable> {
        None
    }
}

/// Engines whose search parameters can be changed after construction.
pub trait Configurable {
    /// Applies every field that is set. Either all of them are applied or,
    /// on error, none are.
    fn configure(&mut self, config: &MinimaxConfig) -> Result<()>;
}

/// Engines that take the game so far into account.
pub trait Stateful {
    /// Positions played before the one passed to `select_move`, oldest
    /// first. Used to recognise repetitions inside the search.
    fn set_position_history(&mut self, history: &[Board]);
}

pub trait Inspectable {
    fn info(&self) -> EngineInfo;
}

/// Static description of an engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineInfo {
    pub name: String,
    pub author: String,
    pub version: String,
    pub engine_type: EngineType,
    pub difficulty: Difficulty,
    pub features: BTreeMap<String, bool>,
}

impl EngineInfo {
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.get(feature).copied().unwrap_or(false)
    }
}

/// Partial update for a [`MinimaxEngine`]. Unset fields are left alone.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MinimaxConfig {
    pub search_depth: Option<u8>,
    pub time_limit: Option<Duration>,
    pub material_weight: Option<f64>,
    pub piece_square_weight: Option<f64>,
    pub mobility_weight: Option<f64>,
    pub king_safety_weight: Option<f64>,
}

impl MinimaxConfig {
    /// Builds a config from textual key/value pairs.
    ///
    /// Recognised keys are `depth`, `time_limit_ms`, `material_weight`,
    /// `piece_square_weight`, `mobility_weight` and `king_safety_weight`.
    /// Values are range-checked the same way [`MinimaxConfig::validate`]
    /// does. Later pairs override earlier ones.
    pub fn from_options<'a, I>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = MinimaxConfig::default();

        for (key, value) in options {
            let value = value.trim();
            match key {
                "depth" => {
                    let depth: i64 = parse_value(key, value)?;
                    if depth < MIN_SEARCH_DEPTH as i64 || depth > MAX_SEARCH_DEPTH as i64 {
                        return Err(depth_error(depth));
                    }
                    config.search_depth = Some(depth as u8);
                }
                "time_limit_ms" => {
                    let ms: i64 = parse_value(key, value)?;
                    if ms <= 0 {
                        return Err(EngineError::InvalidConfiguration(format!(
                            "time limit must be positive, got {ms}ms"
                        )));
                    }
                    config.time_limit = Some(Duration::from_millis(ms as u64));
                }
                "material_weight" => config.material_weight = Some(parse_value(key, value)?),
                "piece_square_weight" => {
                    config.piece_square_weight = Some(parse_value(key, value)?)
                }
                "mobility_weight" => config.mobility_weight = Some(parse_value(key, value)?),
                "king_safety_weight" => {
                    config.king_safety_weight = Some(parse_value(key, value)?)
                }
                _ => {
                    return Err(EngineError::InvalidConfiguration(format!(
                        "unknown option: {key}"
                    )));
                }
            }
        }

        Ok(config)
    }

    /// Checks the depth and time limit. Weights are never rejected.
    pub fn validate(&self) -> Result<()> {
        if let Some(depth) = self.search_depth {
            validate_depth(depth)?;
        }
        if let Some(limit) = self.time_limit {
            validate_time_limit(limit)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_depth(depth: u8) -> Result<()> {
    if (MIN_SEARCH_DEPTH..=MAX_SEARCH_DEPTH).contains(&depth) {
        Ok(())
    } else {
        Err(depth_error(depth as i64))
    }
}

pub(crate) fn validate_time_limit(limit: Duration) -> Result<()> {
    if limit.is_zero() {
        Err(EngineError::InvalidConfiguration(
            "time limit must be positive".to_string(),
        ))
    } else {
        Ok(())
    }
}

fn depth_error(depth: i64) -> EngineError {
    EngineError::InvalidConfiguration(format!(
        "search depth must be {MIN_SEARCH_DEPTH}-{MAX_SEARCH_DEPTH}, got {depth}"
    ))
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| EngineError::InvalidConfiguration(format!("invalid value for {key}: {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_options_parses_all_keys() {
        let config = MinimaxConfig::from_options([
            ("depth", "8"),
            ("time_limit_ms", "1500"),
            ("material_weight", "1.5"),
            ("piece_square_weight", "0.5"),
            ("mobility_weight", "0"),
            ("king_safety_weight", "-2.25"),
        ])
        .unwrap();

        assert_eq!(config.search_depth, Some(8));
        assert_eq!(config.time_limit, Some(Duration::from_millis(1500)));
        assert_eq!(config.material_weight, Some(1.5));
        assert_eq!(config.piece_square_weight, Some(0.5));
        assert_eq!(config.mobility_weight, Some(0.0));
        assert_eq!(config.king_safety_weight, Some(-2.25));
    }

    #[test]
    fn test_from_options_empty_is_noop() {
        let config = MinimaxConfig::from_options(Vec::<(&str, &str)>::new()).unwrap();
        assert_eq!(config, MinimaxConfig::default());
    }

    #[test]
    fn test_from_options_later_value_wins() {
        let config = MinimaxConfig::from_options([("depth", "3"), ("depth", "5")]).unwrap();
        assert_eq!(config.search_depth, Some(5));
    }

    #[test]
    fn test_from_options_rejects_bad_input() {
        let bad: &[(&str, &str)] = &[
            ("depth", "0"),
            ("depth", "21"),
            ("depth", "-1"),
            ("depth", "four"),
            ("time_limit_ms", "0"),
            ("time_limit_ms", "-100"),
            ("time_limit_ms", "1.5"),
            ("mobility_weight", "heavy"),
            ("contempt", "10"),
        ];
        for &(key, value) in bad {
            let err = MinimaxConfig::from_options([(key, value)]).unwrap_err();
            assert!(
                matches!(err, EngineError::InvalidConfiguration(_)),
                "{key}={value} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_validate() {
        assert!(MinimaxConfig::default().validate().is_ok());

        let ok = MinimaxConfig {
            search_depth: Some(20),
            time_limit: Some(Duration::from_millis(1)),
            material_weight: Some(-100.0),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let shallow = MinimaxConfig {
            search_depth: Some(0),
            ..Default::default()
        };
        assert!(shallow.validate().is_err());

        let instant = MinimaxConfig {
            time_limit: Some(Duration::ZERO),
            ..Default::default()
        };
        assert!(instant.validate().is_err());
    }

    #[test]
    fn test_config_serde() {
        let config = MinimaxConfig {
            search_depth: Some(6),
            mobility_weight: Some(0.5),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: MinimaxConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_has_feature() {
        let info = EngineInfo {
            name: "Test".to_string(),
            author: "Someone".to_string(),
            version: "1.0".to_string(),
            engine_type: EngineType::Internal,
            difficulty: Difficulty::Medium,
            features: BTreeMap::from([
                ("alpha_beta".to_string(), true),
                ("king_safety".to_string(), false),
            ]),
        };
        assert!(info.has_feature("alpha_beta"));
        assert!(!info.has_feature("king_safety"));
        assert!(!info.has_feature("opening_book"));
    }
}
