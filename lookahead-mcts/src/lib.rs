//! LOOKAHEAD MCTS - Monte Carlo Tree Search with UCT
//!
//! This crate provides an asymmetric lookahead planner:
//! - Tree policy (UCT, random tie-break)
//! - Short random rollouts
//! - Backpropagation
//!
//! One node is expanded per iteration. Nodes keep no simulated states; the
//! path to the expanded node is replayed from the root state each time.

pub mod rollout;
pub mod search;
pub mod tree;

use lookahead_core::{ConfigError, SearchBudget};
use serde::{Deserialize, Serialize};

pub use rollout::{rollout, RolloutResult};
pub use search::{MctsPlanner, SearchOutcome};
pub use tree::{NodeId, NodeStats, SearchNode, SearchTree};

/// MCTS configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// UCT exploration constant
    pub exploration: f64,
    /// Maximum random steps per rollout
    pub rollout_depth: usize,
    pub budget: SearchBudget,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration: std::f64::consts::SQRT_2,
            rollout_depth: 5,
            budget: SearchBudget::default(),
        }
    }
}

impl MctsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(ConfigError::InvalidExploration(self.exploration));
        }
        Ok(())
    }

    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }
}
