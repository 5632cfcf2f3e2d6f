//! Search budget - explicit bound on a planner's internal loop
//!
//! The planners stop primarily when the simulator returns the termination
//! sentinel. A simulator that never does would make them spin forever, so
//! every planner also carries an iteration cap and an optional time limit.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Default cap on planner loop iterations
pub const DEFAULT_MAX_ITERATIONS: u64 = 100_000;

/// Iteration / wall-clock bound for one planning call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchBudget {
    /// Maximum loop iterations (None = only the sentinel stops the loop)
    pub max_iterations: Option<u64>,
    /// Optional time limit in milliseconds
    pub time_limit_ms: Option<u64>,
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self {
            max_iterations: Some(DEFAULT_MAX_ITERATIONS),
            time_limit_ms: None,
        }
    }
}

impl SearchBudget {
    /// No cap at all: termination relies on the simulator's sentinel
    pub fn unbounded() -> Self {
        Self {
            max_iterations: None,
            time_limit_ms: None,
        }
    }

    /// Cap on iterations only
    pub fn iterations(max: u64) -> Self {
        Self {
            max_iterations: Some(max),
            time_limit_ms: None,
        }
    }

    /// Add a time limit
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Start counting for one planning call
    pub fn start(&self) -> BudgetClock {
        BudgetClock {
            max_iterations: self.max_iterations,
            deadline: self
                .time_limit_ms
                .map(|ms| Instant::now() + Duration::from_millis(ms)),
            iterations: 0,
        }
    }
}

/// Running counter for one planning call
#[derive(Debug)]
pub struct BudgetClock {
    max_iterations: Option<u64>,
    deadline: Option<Instant>,
    iterations: u64,
}

impl BudgetClock {
    /// Claim one more iteration. Returns false once the budget is spent.
    pub fn tick(&mut self) -> bool {
        if let Some(max) = self.max_iterations {
            if self.iterations >= max {
                return false;
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return false;
            }
        }
        self.iterations += 1;
        true
    }

    /// Iterations claimed so far
    pub fn iterations(&self) -> u64 {
        self.iterations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget() {
        let budget = SearchBudget::default();
        assert_eq!(budget.max_iterations, Some(DEFAULT_MAX_ITERATIONS));
        assert_eq!(budget.time_limit_ms, None);
    }

    #[test]
    fn test_iteration_cap() {
        let mut clock = SearchBudget::iterations(3).start();
        assert!(clock.tick());
        assert!(clock.tick());
        assert!(clock.tick());
        assert!(!clock.tick());
        assert_eq!(clock.iterations(), 3);
    }

    #[test]
    fn test_zero_time_limit_stops_immediately() {
        let mut clock = SearchBudget::unbounded().with_time_limit_ms(0).start();
        assert!(!clock.tick());
        assert_eq!(clock.iterations(), 0);
    }

    #[test]
    fn test_unbounded_keeps_going() {
        let mut clock = SearchBudget::unbounded().start();
        for _ in 0..10_000 {
            assert!(clock.tick());
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let budget: SearchBudget = serde_json::from_str(r#"{"time_limit_ms": 50}"#).unwrap();
        assert_eq!(budget.max_iterations, Some(DEFAULT_MAX_ITERATIONS));
        assert_eq!(budget.time_limit_ms, Some(50));
    }
}
