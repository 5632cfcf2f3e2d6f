//! Rollout (default policy) for MCTS
//!
//! ## Architecture
//! - Level 3: Single rollout implementation
//! - Level 4: Random action selection

use lookahead_core::{Evaluator, Simulator, Successor};
use rand::Rng;

// ============================================================================
// ROLLOUT RESULT
// ============================================================================

/// Result of a rollout simulation
#[derive(Clone, Debug, PartialEq)]
pub struct RolloutResult {
    /// Score of the final state against the root state
    pub reward: f64,
    /// Number of actions successfully simulated
    pub steps: usize,
    /// The rollout was cut short by the termination sentinel
    pub exhausted: bool,
}

// ============================================================================
// ROLLOUT (Level 3)
// ============================================================================

/// Play up to `max_depth` uniformly random legal actions from `from`.
///
/// Stops early on a terminal state, a state without legal actions, or the
/// sentinel; the last state reached is scored against `root`.
pub fn rollout<S, E, R>(
    sim: &S,
    eval: &E,
    root: &S::State,
    from: S::State,
    max_depth: usize,
    rng: &mut R,
) -> RolloutResult
where
    S: Simulator,
    E: Evaluator<S::State>,
    R: Rng,
{
    let mut current = from;
    let mut steps = 0;
    let mut exhausted = false;

    while steps < max_depth && !sim.is_terminal(&current) {
        let legal = sim.legal_actions(&current);
        let Some(action) = select_random_action(&legal, rng) else {
            break;
        };

        match sim.step(&current, action) {
            Successor::Advanced(next) => current = next,
            Successor::Exhausted => {
                exhausted = true;
                break;
            }
        }
        steps += 1;
    }

    RolloutResult {
        reward: eval.evaluate(root, &current),
        steps,
        exhausted,
    }
}

// ============================================================================
// UTILITIES (Level 4)
// ============================================================================

fn select_random_action<A: Copy, R: Rng>(legal: &[A], rng: &mut R) -> Option<A> {
    if legal.is_empty() {
        None
    } else {
        Some(legal[rng.gen_range(0..legal.len())])
    }
}

// ============================================================================
// TESTS
// ============================================================================
