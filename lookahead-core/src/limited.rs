//! Successor-call budget
//!
//! Wraps a simulator and refuses to advance once a per-decision allowance of
//! `step` calls is spent. This is what produces the termination sentinel in
//! practice: a planner keeps searching until the simulator says "no more".

use std::cell::Cell;

use crate::oracle::{Simulator, Successor};

/// Simulator with a per-decision allowance of `step` calls
#[derive(Debug)]
pub struct BudgetedSimulator<S> {
    inner: S,
    allowance: u64,
    used: Cell<u64>,
}

impl<S: Simulator> BudgetedSimulator<S> {
    /// Wrap `inner`, allowing `allowance` successful steps between resets
    pub fn new(inner: S, allowance: u64) -> Self {
        Self {
            inner,
            allowance,
            used: Cell::new(0),
        }
    }

    /// Restore the full allowance (called before every decision)
    pub fn reset(&self) {
        self.used.set(0);
    }

    /// Steps granted since the last reset
    pub fn calls_used(&self) -> u64 {
        self.used.get()
    }

    /// Steps left before the sentinel fires
    pub fn remaining(&self) -> u64 {
        self.allowance.saturating_sub(self.used.get())
    }
}

impl<S: Simulator> Simulator for BudgetedSimulator<S> {
    type State = S::State;
    type Action = S::Action;

    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        self.inner.legal_actions(state)
    }

    fn action_catalog(&self) -> Vec<Self::Action> {
        self.inner.action_catalog()
    }

    fn step(&self, state: &Self::State, action: Self::Action) -> Successor<Self::State> {
        let used = self.used.get();
        if used >= self.allowance {
            return Successor::Exhausted;
        }
        self.used.set(used + 1);
        self.inner.step(state, action)
    }

    fn is_win(&self, state: &Self::State) -> bool {
        self.inner.is_win(state)
    }

    fn is_lose(&self, state: &Self::State) -> bool {
        self.inner.is_lose(state)
    }

    fn noop_action(&self) -> Self::Action {
        self.inner.noop_action()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counter that never ends
    struct Counter;

    impl Simulator for Counter {
        type State = u32;
        type Action = u32;

        fn legal_actions(&self, _state: &u32) -> Vec<u32> {
            vec![0, 1]
        }

        fn action_catalog(&self) -> Vec<u32> {
            vec![0, 1]
        }

        fn step(&self, state: &u32, action: u32) -> Successor<u32> {
            Successor::Advanced(state + action)
        }

        fn is_win(&self, _state: &u32) -> bool {
            false
        }

        fn is_lose(&self, _state: &u32) -> bool {
            false
        }

        fn noop_action(&self) -> u32 {
            0
        }
    }

    #[test]
    fn test_sentinel_after_allowance() {
        let sim = BudgetedSimulator::new(Counter, 2);

        assert_eq!(sim.step(&0, 1), Successor::Advanced(1));
        assert_eq!(sim.step(&1, 1), Successor::Advanced(2));
        assert_eq!(sim.step(&2, 1), Successor::Exhausted);
        assert_eq!(sim.calls_used(), 2);
        assert_eq!(sim.remaining(), 0);
    }

    #[test]
    fn test_reset_restores_allowance() {
        let sim = BudgetedSimulator::new(Counter, 1);
        assert!(!sim.step(&0, 1).is_exhausted());
        assert!(sim.step(&0, 1).is_exhausted());

        sim.reset();
        assert_eq!(sim.remaining(), 1);
        assert!(!sim.step(&0, 1).is_exhausted());
    }

    #[test]
    fn test_zero_allowance() {
        let sim = BudgetedSimulator::new(Counter, 0);
        assert!(sim.step(&0, 0).is_exhausted());
        assert_eq!(sim.calls_used(), 0);
    }
}
