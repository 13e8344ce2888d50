use super::traits::ConfigSection;
use crate::error::RuleEngineError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_TREE_DEPTH: usize = 12;
pub const DEFAULT_MAX_VARIADIC_CHILDREN: usize = 16;

/// Inclusive range a rule score is expected to stay within
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBounds {
    pub min: f64,
    pub max: f64,
}

impl ScoreBounds {
    pub fn contains(&self, score: f64) -> bool {
        score >= self.min && score <= self.max
    }
}

impl Default for ScoreBounds {
    fn default() -> Self {
        Self { min: -1.0, max: 1.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Deepest tree accepted when loading persisted rules
    pub max_tree_depth: usize,
    /// Widest variadic operator accepted when loading persisted rules
    pub max_variadic_children: usize,
    pub score_bounds: ScoreBounds,
    /// Out-of-bounds scores become errors instead of warnings
    pub strict_bounds: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_tree_depth: DEFAULT_MAX_TREE_DEPTH,
            max_variadic_children: DEFAULT_MAX_VARIADIC_CHILDREN,
            score_bounds: ScoreBounds::default(),
            strict_bounds: false,
        }
    }
}

impl ConfigSection for EngineConfig {
    fn section_name() -> &'static str {
        "engine"
    }

    fn validate(&self) -> Result<(), RuleEngineError> {
        if self.max_tree_depth == 0 {
            return Err(RuleEngineError::Configuration(
                "max_tree_depth must be at least 1".to_string(),
            ));
        }
        if self.max_variadic_children < 2 {
            return Err(RuleEngineError::Configuration(
                "max_variadic_children must be at least 2".to_string(),
            ));
        }
        if !(self.score_bounds.min < self.score_bounds.max) {
            return Err(RuleEngineError::Configuration(format!(
                "score_bounds min {} must be below max {}",
                self.score_bounds.min, self.score_bounds.max
            )));
        }
        Ok(())
    }
}
