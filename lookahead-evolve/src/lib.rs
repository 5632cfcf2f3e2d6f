//! LOOKAHEAD Evolution - sequence-based planners
//!
//! This crate provides planners that search over fixed-length action
//! sequences:
//! - Hill climbing with stochastic restart toward the incumbent
//! - Rank-selection genetic algorithm
//!   - Ranking (competition rank, ties averaged)
//!   - Selection (rank-proportional)
//!   - Crossover (uniform, per gene)
//!   - Mutation (single point)

pub mod crossover;
pub mod genetic;
pub mod hill_climb;
pub mod mutation;
pub mod population;
pub mod ranking;
pub mod selection;

use lookahead_core::error::check_probability;
use lookahead_core::{ConfigError, SearchBudget};
use serde::{Deserialize, Serialize};

pub use crossover::{crossover_pairs, uniform_crossover};
pub use genetic::GeneticPlanner;
pub use hill_climb::HillClimbPlanner;
pub use mutation::{mutate_population, point_mutation};
pub use population::Member;
pub use ranking::{assign_ranks, competition_rank};
pub use selection::{rank_select, select_parents, selection_total};

/// Default plan length for both planners
pub const DEFAULT_SEQUENCE_LENGTH: usize = 5;

/// Hill climbing configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HillClimbConfig {
    /// Length of candidate plans
    pub sequence_length: usize,
    /// Per-position chance of drawing a fresh random action instead of
    /// copying the incumbent
    pub restart_rate: f64,
    pub budget: SearchBudget,
}

impl Default for HillClimbConfig {
    fn default() -> Self {
        Self {
            sequence_length: DEFAULT_SEQUENCE_LENGTH,
            restart_rate: 0.5,
            budget: SearchBudget::default(),
        }
    }
}

impl HillClimbConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sequence_length == 0 {
            return Err(ConfigError::ZeroSequenceLength);
        }
        check_probability("restart_rate", self.restart_rate)
    }

    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }
}

/// Genetic algorithm configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    pub population_size: usize,
    pub sequence_length: usize,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub budget: SearchBudget,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 8,
            sequence_length: DEFAULT_SEQUENCE_LENGTH,
            crossover_rate: 0.7,
            mutation_rate: 0.1,
            budget: SearchBudget::default(),
        }
    }
}

impl GeneticConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.sequence_length == 0 {
            return Err(ConfigError::ZeroSequenceLength);
        }
        check_probability("crossover_rate", self.crossover_rate)?;
        check_probability("mutation_rate", self.mutation_rate)
    }

    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs_are_valid() {
        assert!(HillClimbConfig::default().validate().is_ok());
        assert!(GeneticConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_hill_climb_config() {
        let config = HillClimbConfig {
            sequence_length: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSequenceLength));

        let config = HillClimbConfig {
            restart_rate: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProbability { name: "restart_rate", .. })
        ));
    }

    #[test]
    fn test_invalid_genetic_config() {
        let config = GeneticConfig {
            population_size: 1,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::PopulationTooSmall(1)));

        let config = GeneticConfig {
            mutation_rate: 2.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
