//! ActionSequence - a fixed-length candidate plan

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Ordered, fixed-length list of actions.
///
/// The length is set at creation and never changes; local search and the
/// genetic operators only overwrite positions in place.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionSequence<A> {
    actions: Vec<A>,
}

impl<A: Copy> ActionSequence<A> {
    /// `len` copies of one action
    pub fn filled(action: A, len: usize) -> Self {
        Self {
            actions: vec![action; len],
        }
    }

    /// `len` actions drawn uniformly from `catalog`
    ///
    /// # Panics
    /// Panics if `catalog` is empty. Planners reject empty catalogs at
    /// construction, so this never fires from a planner.
    pub fn random<R: Rng>(catalog: &[A], len: usize, rng: &mut R) -> Self {
        let actions = (0..len).map(|_| random_action(catalog, rng)).collect();
        Self { actions }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// First action (the one a planner would execute)
    pub fn first(&self) -> Option<A> {
        self.actions.first().copied()
    }

    pub fn get(&self, index: usize) -> Option<A> {
        self.actions.get(index).copied()
    }

    /// Overwrite one position
    pub fn set(&mut self, index: usize, action: A) {
        self.actions[index] = action;
    }

    pub fn as_slice(&self) -> &[A] {
        &self.actions
    }

    pub fn iter(&self) -> impl Iterator<Item = A> + '_ {
        self.actions.iter().copied()
    }
}

impl<A> From<Vec<A>> for ActionSequence<A> {
    fn from(actions: Vec<A>) -> Self {
        Self { actions }
    }
}

/// Pick one action uniformly from `catalog`
pub fn random_action<A: Copy, R: Rng>(catalog: &[A], rng: &mut R) -> A {
    catalog[rng.gen_range(0..catalog.len())]
}
