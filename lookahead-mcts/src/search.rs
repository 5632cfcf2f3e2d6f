//! MCTS Search Loop
//!
//! Implements the core MCTS algorithm:
//! 1. Selection - Use UCT to descend, expanding the first node with an
//!    untried legal action
//! 2. Replay - Re-simulate the path from the root to the expanded node
//! 3. Simulation - Short random rollout
//! 4. Backpropagation - Update statistics up to the root
//!
//! The loop ends when the simulator returns the sentinel during replay or
//! the search budget runs out.
//!
//! ## Architecture
//! - Level 1: `MctsPlanner::plan`
//! - Level 2: Search loop coordination
//! - Level 3: Individual MCTS phases

use lookahead_core::{
    legal_or_placeholder, play_sequence, should_plan, ActionSequence, ConfigError, Evaluator,
    Planner, SearchReport, SequenceRun, Simulator, StopReason, Successor,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::rollout::rollout;
use crate::tree::{NodeId, SearchTree};
use crate::MctsConfig;

// ============================================================================
// SEARCH OUTCOME
// ============================================================================

/// Result of one MCTS search
#[derive(Debug)]
pub struct SearchOutcome<A> {
    /// The final tree after search
    pub tree: SearchTree<A>,
    /// Completed backpropagation passes
    pub backpropagations: u32,
    pub report: SearchReport,
}

// ============================================================================
// PLANNER
// ============================================================================

/// Monte Carlo Tree Search planner
#[derive(Debug)]
pub struct MctsPlanner {
    config: MctsConfig,
    rng: ChaCha8Rng,
    last_report: Option<SearchReport>,
}

impl MctsPlanner {
    pub fn new(config: MctsConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            last_report: None,
        })
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Summary of the most recent search
    pub fn last_report(&self) -> Option<SearchReport> {
        self.last_report
    }

    // ========================================================================
    // Level 2: Search Loop
    // ========================================================================

    /// Grow a tree rooted at `state` until the sentinel or the budget stops it
    pub fn search<S, E>(&mut self, sim: &S, eval: &E, state: &S::State) -> SearchOutcome<S::Action>
    where
        S: Simulator,
        E: Evaluator<S::State>,
    {
        let mut tree = SearchTree::new();
        let mut backpropagations = 0;
        let mut clock = self.config.budget.start();

        let stop = loop {
            if !clock.tick() {
                break StopReason::Budget;
            }

            let leaf = self.tree_policy(&mut tree, sim, state);

            let Some(replayed) = replay(&tree, leaf, sim, state) else {
                break StopReason::Sentinel;
            };

            let result = rollout(sim, eval, state, replayed, self.config.rollout_depth, &mut self.rng);
            tree.backpropagate(leaf, result.reward);
            backpropagations += 1;
        };

        tracing::debug!(
            "mcts stopped ({:?}) after {} iterations, {} nodes, {} backpropagations",
            stop,
            clock.iterations(),
            tree.len(),
            backpropagations
        );

        SearchOutcome {
            tree,
            backpropagations,
            report: SearchReport {
                iterations: clock.iterations(),
                stop,
            },
        }
    }

    // ========================================================================
    // Level 3: Selection + Expansion
    // ========================================================================

    /// Descend from the root, returning the node to evaluate this iteration.
    ///
    /// The first node with a legal action not yet represented by a child is
    /// expanded and the new child returned. Descent also stops at terminal
    /// states, leaves with nothing to expand, and on the sentinel.
    fn tree_policy<S: Simulator>(
        &mut self,
        tree: &mut SearchTree<S::Action>,
        sim: &S,
        root_state: &S::State,
    ) -> NodeId {
        let mut node = tree.root();
        let mut current = root_state.clone();

        while !sim.is_terminal(&current) {
            let tried = tree.child_actions(node);
            let untried: Vec<S::Action> = sim
                .legal_actions(&current)
                .into_iter()
                .filter(|action| !tried.contains(action))
                .collect();

            if !untried.is_empty() {
                let action = untried[self.rng.gen_range(0..untried.len())];
                return tree.add_child(node, action);
            }

            let Some(child) = tree.best_child(node, self.config.exploration, &mut self.rng) else {
                return node;
            };
            let Some(action) = tree.get(child).action else {
                return node;
            };

            node = child;
            match sim.step(&current, action) {
                Successor::Advanced(next) => current = next,
                Successor::Exhausted => return node,
            }
        }

        node
    }
}

// ============================================================================
// UTILITIES (Level 4)
// ============================================================================

/// Re-simulate the root-to-`leaf` path. None if the sentinel appeared.
fn replay<S: Simulator>(
    tree: &SearchTree<S::Action>,
    leaf: NodeId,
    sim: &S,
    root_state: &S::State,
) -> Option<S::State> {
    let path = ActionSequence::from(tree.path_actions(leaf));
    match play_sequence(sim, root_state, &path) {
        SequenceRun::Finished(state) => Some(state),
        SequenceRun::Exhausted { .. } => None,
    }
}

impl<S, E> Planner<S, E> for MctsPlanner
where
    S: Simulator,
    E: Evaluator<S::State>,
{
    fn name(&self) -> &str {
        "mcts"
    }

    fn plan(&mut self, sim: &S, eval: &E, state: &S::State) -> S::Action {
        let noop = sim.noop_action();
        if !should_plan(sim, state) {
            self.last_report = Some(SearchReport {
                iterations: 0,
                stop: StopReason::NothingToPlan,
            });
            return noop;
        }

        let outcome = self.search(sim, eval, state);
        self.last_report = Some(outcome.report);

        if tracing::enabled!(tracing::Level::TRACE) {
            for (action, visits, mean) in outcome.tree.action_statistics() {
                tracing::trace!("root child {:?}: visits={} mean={:.3}", action, visits, mean);
            }
        }

        let action = outcome.tree.most_visited_action(&mut self.rng).unwrap_or(noop);
        legal_or_placeholder(sim, state, action)
    }
}

// ============================================================================
// TESTS
// ============================================================================
