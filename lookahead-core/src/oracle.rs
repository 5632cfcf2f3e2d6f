//! Oracle interfaces - the black-box view planners have of a simulation
//!
//! Planners never look inside a state. They only:
//! - ask which actions exist (`legal_actions`, `action_catalog`)
//! - advance a state by one action (`step`)
//! - test for win/loss
//! - score a candidate state against a baseline (`Evaluator`)

use std::fmt::Debug;

// ============================================================================
// SUCCESSOR
// ============================================================================

/// Result of advancing a state by one action.
///
/// `Exhausted` is the termination sentinel: the simulator could not carry the
/// transition out (typically because the per-decision successor budget is
/// spent). Planners treat it as an early-exit signal, never as a fault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Successor<S> {
    /// The successor state
    Advanced(S),
    /// The simulator refuses to go further
    Exhausted,
}

impl<S> Successor<S> {
    /// Did the simulator refuse the transition?
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Successor::Exhausted)
    }
}

// ============================================================================
// SIMULATION ORACLE
// ============================================================================

/// Turn-based simulation seen as a black box.
pub trait Simulator {
    /// Opaque state handle
    type State: Clone;
    /// Discrete action token
    type Action: Copy + Eq + Debug;

    /// Actions that can be simulated from `state` right now
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Broad action set used to generate random candidates.
    ///
    /// May contain actions that are illegal from a particular state.
    fn action_catalog(&self) -> Vec<Self::Action>;

    /// Advance `state` by one action
    fn step(&self, state: &Self::State, action: Self::Action) -> Successor<Self::State>;

    /// Has the agent won in `state`?
    fn is_win(&self, state: &Self::State) -> bool;

    /// Has the agent lost in `state`?
    fn is_lose(&self, state: &Self::State) -> bool;

    /// Win or loss
    fn is_terminal(&self, state: &Self::State) -> bool {
        self.is_win(state) || self.is_lose(state)
    }

    /// Safe placeholder action, always legal from a non-terminal state
    fn noop_action(&self) -> Self::Action;
}

// ============================================================================
// EVALUATION ORACLE
// ============================================================================

/// Scores a candidate state relative to a baseline (higher = better).
pub trait Evaluator<S> {
    fn evaluate(&self, baseline: &S, candidate: &S) -> f64;
}

impl<S, F> Evaluator<S> for F
where
    F: Fn(&S, &S) -> f64,
{
    fn evaluate(&self, baseline: &S, candidate: &S) -> f64 {
        self(baseline, candidate)
    }
}
