//! Planner settings, planner construction and world loading shared by the
//! commands

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use lookahead_core::{
    ConfigError, EpisodeSimulator, Forager, Layout, Planner, ScoreEvaluator, ALL_DIRECTIONS,
};
use lookahead_evolve::{GeneticConfig, GeneticPlanner, HillClimbConfig, HillClimbPlanner};
use lookahead_mcts::{MctsConfig, MctsPlanner};

use crate::random::RandomPlanner;

/// Planner as the episode runner sees it
pub type EpisodePlanner = Box<dyn Planner<EpisodeSimulator, ScoreEvaluator>>;

// ============================================================================
// PLANNER SELECTION
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlannerKind {
    HillClimb,
    Genetic,
    Mcts,
    /// Uniform random legal action (baseline)
    Random,
}

impl PlannerKind {
    pub const ALL: [PlannerKind; 4] = [
        PlannerKind::HillClimb,
        PlannerKind::Genetic,
        PlannerKind::Mcts,
        PlannerKind::Random,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PlannerKind::HillClimb => "hill-climb",
            PlannerKind::Genetic => "genetic",
            PlannerKind::Mcts => "mcts",
            PlannerKind::Random => "random",
        }
    }
}

// ============================================================================
// SETTINGS FILE
// ============================================================================

/// Configuration for every planner, loaded from JSON. Missing sections and
/// fields fall back to their defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    pub hill_climb: HillClimbConfig,
    pub genetic: GeneticConfig,
    pub mcts: MctsConfig,
}

impl PlannerSettings {
    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let settings: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        settings
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(settings)
    }

    /// The file at `path`, or defaults when none is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.hill_climb.validate()?;
        self.genetic.validate()?;
        self.mcts.validate()
    }

    /// Construct a planner of the given kind
    pub fn build(&self, kind: PlannerKind, seed: u64) -> Result<EpisodePlanner, ConfigError> {
        let catalog = ALL_DIRECTIONS.to_vec();

        let planner: EpisodePlanner = match kind {
            PlannerKind::HillClimb => {
                Box::new(HillClimbPlanner::new(self.hill_climb.clone(), catalog, seed)?)
            }
            PlannerKind::Genetic => Box::new(GeneticPlanner::new(self.genetic.clone(), catalog, seed)?),
            PlannerKind::Mcts => Box::new(MctsPlanner::new(self.mcts.clone(), seed)?),
            PlannerKind::Random => Box::new(RandomPlanner::new(seed)),
        };

        Ok(planner)
    }
}

// ============================================================================
// WORLD LOADING
// ============================================================================

/// Built-in layout by name, otherwise a layout file
pub fn load_world(layout: &str) -> Result<Forager> {
    let layout = if Layout::builtin_names().contains(&layout) {
        Layout::builtin(layout)?
    } else {
        let text = fs::read_to_string(layout).with_context(|| {
            format!(
                "Unknown layout '{}' (built-in: {}) and no such file",
                layout,
                Layout::builtin_names().join(", ")
            )
        })?;
        Layout::parse(&text).with_context(|| format!("Failed to parse layout file: {}", layout))?
    };

    Ok(Forager::new(layout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_use_defaults() {
        let settings: PlannerSettings =
            serde_json::from_str(r#"{ "genetic": { "population_size": 12 } }"#).unwrap();

        assert_eq!(settings.genetic.population_size, 12);
        assert_eq!(settings.genetic.sequence_length, 5);
        assert_eq!(settings.hill_climb, HillClimbConfig::default());
        assert_eq!(settings.mcts, MctsConfig::default());
    }

    #[test]
    fn test_build_every_kind() {
        let settings = PlannerSettings::default();
        for kind in PlannerKind::ALL {
            let planner = settings.build(kind, 7).unwrap();
            assert_eq!(planner.name(), kind.name());
        }
    }

    #[test]
    fn test_build_rejects_invalid_settings() {
        let mut settings = PlannerSettings::default();
        settings.genetic.mutation_rate = 2.0;

        assert!(settings.validate().is_err());
        assert!(settings.build(PlannerKind::Genetic, 1).is_err());
        assert!(settings.build(PlannerKind::HillClimb, 1).is_ok());
    }

    #[test]
    fn test_load_world_builtin_and_unknown() {
        assert!(load_world("small").is_ok());
        assert!(load_world("no-such-layout-or-file").is_err());
    }

    #[test]
    fn test_load_world_from_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/layouts/corridor.lay");
        let world = load_world(path).unwrap();
        assert_eq!(world.layout().width, 20);
        assert_eq!(world.layout().ghost_starts.len(), 1);
    }
}
