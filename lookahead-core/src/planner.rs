//! Planner trait and helpers shared by every planner
//!
//! ## Architecture
//! - Level 1: `Planner` - one decision per control step
//! - Level 3: `play_sequence` - simulate a candidate plan
//! - Level 4: `legal_or_placeholder`, `should_plan`

use crate::oracle::{Evaluator, Simulator, Successor};
use crate::sequence::ActionSequence;

// ============================================================================
// PLANNER
// ============================================================================

/// Decision-time planner: called once per control step, returns one action.
pub trait Planner<S: Simulator, E: Evaluator<S::State>> {
    /// Short name for logs and reports
    fn name(&self) -> &str;

    /// Once-per-episode setup hook
    fn register_initial_state(&mut self, _state: &S::State) {}

    /// Choose an action for `state`
    fn plan(&mut self, sim: &S, eval: &E, state: &S::State) -> S::Action;
}

/// Why a planning loop ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The simulator returned the termination sentinel
    Sentinel,
    /// The iteration / time budget ran out
    Budget,
    /// Terminal state or no legal actions; nothing was simulated
    NothingToPlan,
}

/// Summary of the last planning call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchReport {
    /// Loop iterations completed or started (rounds, generations, tree iterations)
    pub iterations: u64,
    pub stop: StopReason,
}

// ============================================================================
// SEQUENCE SIMULATION (Level 3)
// ============================================================================

/// Outcome of simulating an `ActionSequence`
#[derive(Clone, Debug, PartialEq)]
pub enum SequenceRun<St> {
    /// All actions simulated, or a terminal state was reached first
    Finished(St),
    /// The sentinel appeared at position `at`; `last` is the state reached
    /// just before it
    Exhausted { last: St, at: usize },
}

/// Simulate `sequence` from `start`, stopping on a terminal state or the
/// sentinel.
pub fn play_sequence<S: Simulator>(
    sim: &S,
    start: &S::State,
    sequence: &ActionSequence<S::Action>,
) -> SequenceRun<S::State> {
    let mut current = start.clone();

    for (i, action) in sequence.iter().enumerate() {
        if sim.is_terminal(&current) {
            break;
        }
        match sim.step(&current, action) {
            Successor::Advanced(next) => current = next,
            Successor::Exhausted => return SequenceRun::Exhausted { last: current, at: i },
        }
    }

    SequenceRun::Finished(current)
}

// ============================================================================
// UTILITIES (Level 4)
// ============================================================================

/// `action` if it is legal from `state`, otherwise the simulator's placeholder
pub fn legal_or_placeholder<S: Simulator>(sim: &S, state: &S::State, action: S::Action) -> S::Action {
    if sim.legal_actions(state).contains(&action) {
        action
    } else {
        sim.noop_action()
    }
}

/// Is there anything to plan for? False for terminal states and states
/// without legal actions.
pub fn should_plan<S: Simulator>(sim: &S, state: &S::State) -> bool {
    !sim.is_terminal(state) && !sim.legal_actions(state).is_empty()
}
