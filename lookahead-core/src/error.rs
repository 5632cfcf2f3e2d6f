//! Error types
//!
//! The termination sentinel is not an error and never shows up here. These
//! are construction-time problems: bad planner settings and bad layouts.

/// Planner configuration rejected at construction time
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("action catalog is empty")]
    EmptyCatalog,

    #[error("sequence length must be > 0")]
    ZeroSequenceLength,

    #[error("population size must be >= 2, got {0}")]
    PopulationTooSmall(usize),

    #[error("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("exploration constant must be finite and >= 0, got {0}")]
    InvalidExploration(f64),
}

/// Check that `value` is a probability
pub fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { name, value })
    }
}

/// Layout text could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,

    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    #[error("unknown layout character {ch:?} at row {row}, column {col}")]
    UnknownCell { ch: char, row: usize, col: usize },

    #[error("layout needs exactly one agent start 'P', found {0}")]
    AgentCount(usize),

    #[error("layout allows at most {max} ghosts, found {found}")]
    TooManyGhosts { max: usize, found: usize },

    #[error("layout is {width}x{height}, larger than the grid coordinates allow")]
    TooLarge { width: usize, height: usize },

    #[error("unknown built-in layout: {0}")]
    UnknownLayout(String),
}
