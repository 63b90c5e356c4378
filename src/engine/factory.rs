use std::time::Duration;

use tracing::info;

use crate::engine::{Engine, MinimaxEngine, RandomEngine, validate_depth, validate_time_limit};
use crate::error::{EngineError, Result};
use crate::types::{Difficulty, EngineConfig, EvalWeights};

const RANDOM_TIME_LIMIT: Duration = Duration::from_secs(2);

/// Construction-time overrides. Applied in order, so a later option of the
/// same kind wins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EngineOption {
    TimeLimit(Duration),
    SearchDepth(u8),
    Weights(EvalWeights),
}

fn apply_options(config: &mut EngineConfig, options: &[EngineOption]) -> Result<()> {
    for option in options {
        match *option {
            EngineOption::TimeLimit(limit) => {
                validate_time_limit(limit)?;
                config.time_limit = limit;
            }
            EngineOption::SearchDepth(depth) => {
                validate_depth(depth)?;
                config.max_depth = depth;
            }
            EngineOption::Weights(weights) => config.weights = weights,
        }
    }
    Ok(())
}

/// Easy engine. Only the time limit option is meaningful; the others are
/// validated and ignored.
pub fn new_random_engine(options: &[EngineOption]) -> Result<RandomEngine> {
    let mut config = EngineConfig::from_difficulty(Difficulty::Easy);
    config.time_limit = RANDOM_TIME_LIMIT;
    apply_options(&mut config, options)?;

    info!(time_limit = ?config.time_limit, "created random engine");
    Ok(RandomEngine::new(config.time_limit))
}

/// Medium or Hard engine.
pub fn new_minimax_engine(
    difficulty: Difficulty,
    options: &[EngineOption],
) -> Result<MinimaxEngine> {
    if difficulty == Difficulty::Easy {
        return Err(EngineError::InvalidConfiguration(format!(
            "invalid difficulty for minimax: {difficulty} (expected Medium or Hard)"
        )));
    }

    let mut config = EngineConfig::from_difficulty(difficulty);
    apply_options(&mut config, options)?;

    info!(
        %difficulty,
        max_depth = config.max_depth,
        time_limit = ?config.time_limit,
        "created minimax engine"
    );
    Ok(MinimaxEngine::new(config))
}

/// Engine for a difficulty tier: random for Easy, minimax above.
pub fn new_engine(difficulty: Difficulty, options: &[EngineOption]) -> Result<Box<dyn Engine>> {
    let engine: Box<dyn Engine> = match difficulty {
        Difficulty::Easy => Box::new(new_random_engine(options)?),
        Difficulty::Medium | Difficulty::Hard => Box::new(new_minimax_engine(difficulty, options)?),
    };
    Ok(engine)
}
