//! Uniform random baseline

use lookahead_core::{Evaluator, Planner, Simulator};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Picks a uniformly random legal action; never simulates
#[derive(Debug)]
pub struct RandomPlanner {
    rng: ChaCha8Rng,
}

impl RandomPlanner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl<S, E> Planner<S, E> for RandomPlanner
where
    S: Simulator,
    E: Evaluator<S::State>,
{
    fn name(&self) -> &str {
        "random"
    }

    fn plan(&mut self, sim: &S, _eval: &E, state: &S::State) -> S::Action {
        let legal = sim.legal_actions(state);
        if sim.is_terminal(state) || legal.is_empty() {
            return sim.noop_action();
        }
        legal[self.rng.gen_range(0..legal.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookahead_core::{Forager, Layout, ScoreEvaluator};

    #[test]
    fn test_random_planner_picks_legal_actions() {
        let world = Forager::new(Layout::builtin("small").unwrap());
        let state = world.initial_state(1);
        let mut planner = RandomPlanner::new(42);

        for _ in 0..50 {
            let action = planner.plan(&world, &ScoreEvaluator, &state);
            assert!(world.legal_actions(&state).contains(&action));
        }
    }
}
