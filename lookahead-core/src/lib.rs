//! LOOKAHEAD Core - Oracle interfaces and the Forager world
//!
//! This crate provides what every planner builds on:
//! - Simulation / evaluation oracle traits
//! - Action sequences and the `Planner` trait
//! - Search budgets and the successor-call budget (termination sentinel)
//! - The Forager demo world, its evaluator and an episode runner

pub mod budget;
pub mod error;
pub mod eval;
pub mod forager;
pub mod layout;
pub mod limited;
pub mod oracle;
pub mod planner;
pub mod runner;
pub mod sequence;

// Re-exports for convenient access
pub use budget::{BudgetClock, SearchBudget, DEFAULT_MAX_ITERATIONS};
pub use error::{ConfigError, LayoutError};
pub use eval::ScoreEvaluator;
pub use forager::{Forager, ForagerState, GameResult};
pub use layout::{Direction, Layout, Pos, ALL_DIRECTIONS};
pub use limited::BudgetedSimulator;
pub use oracle::{Evaluator, Simulator, Successor};
pub use planner::{
    legal_or_placeholder, play_sequence, should_plan, Planner, SearchReport, SequenceRun, StopReason,
};
pub use runner::{EpisodeOutcome, EpisodeRunner, EpisodeSimulator};
pub use sequence::ActionSequence;
