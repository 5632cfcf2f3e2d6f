//! Episode runner - the outer control loop
//!
//! Asks a planner for one action per tick, with a fresh successor budget for
//! every decision, and applies it to the real (unbudgeted) world.

use serde::{Deserialize, Serialize};

use crate::eval::ScoreEvaluator;
use crate::forager::{Forager, ForagerState, GameResult};
use crate::layout::Direction;
use crate::limited::BudgetedSimulator;
use crate::oracle::Simulator;
use crate::planner::Planner;

/// Default successor calls per decision
pub const DEFAULT_STEP_ALLOWANCE: u64 = 200;

/// Default tick limit per episode
pub const DEFAULT_MAX_STEPS: u32 = 300;

/// Outcome of a single episode
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EpisodeOutcome {
    /// Final result (Ongoing if the tick limit was hit)
    pub result: GameResult,
    pub score: f64,
    pub steps: u32,
    /// Action history
    pub actions: Vec<Direction>,
}

impl EpisodeOutcome {
    pub fn won(&self) -> bool {
        self.result == GameResult::Won
    }

    pub fn lost(&self) -> bool {
        self.result == GameResult::Lost
    }
}

/// Plays Forager episodes with a planner
#[derive(Clone, Debug)]
pub struct EpisodeRunner {
    /// Successor calls a planner may make per decision
    pub step_allowance: u64,
    /// Tick limit per episode
    pub max_steps: u32,
}

impl Default for EpisodeRunner {
    fn default() -> Self {
        Self {
            step_allowance: DEFAULT_STEP_ALLOWANCE,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// Simulator type planners see during an episode
pub type EpisodeSimulator = BudgetedSimulator<Forager>;

impl EpisodeRunner {
    pub fn new(step_allowance: u64, max_steps: u32) -> Self {
        Self {
            step_allowance,
            max_steps,
        }
    }

    /// Play one episode from the layout's start; `seed` drives the ghosts
    pub fn play<P>(&self, planner: &mut P, world: &Forager, seed: u64) -> EpisodeOutcome
    where
        P: Planner<EpisodeSimulator, ScoreEvaluator> + ?Sized,
    {
        let state = world.initial_state(seed);
        self.play_from(planner, world, state)
    }

    /// Play one episode from an arbitrary state
    pub fn play_from<P>(&self, planner: &mut P, world: &Forager, initial: ForagerState) -> EpisodeOutcome
    where
        P: Planner<EpisodeSimulator, ScoreEvaluator> + ?Sized,
    {
        let sim = BudgetedSimulator::new(world.clone(), self.step_allowance);
        let eval = ScoreEvaluator;
        let mut state = initial;
        let mut actions = Vec::new();

        planner.register_initial_state(&state);

        while !world.is_terminal(&state) && (actions.len() as u32) < self.max_steps {
            sim.reset();
            let action = planner.plan(&sim, &eval, &state);

            tracing::trace!(
                "{} tick {}: {:?} ({} successor calls)",
                planner.name(),
                actions.len(),
                action,
                sim.calls_used()
            );

            state = world.apply(&state, action);
            actions.push(action);
        }

        tracing::debug!(
            "{} episode finished: {:?}, score={:.1}, steps={}",
            planner.name(),
            state.result,
            state.score,
            actions.len()
        );

        EpisodeOutcome {
            result: state.result,
            score: state.score,
            steps: actions.len() as u32,
            actions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;

    /// Always walks east
    struct EastWalker {
        registered: bool,
    }

    impl Planner<EpisodeSimulator, ScoreEvaluator> for EastWalker {
        fn name(&self) -> &str {
            "east"
        }

        fn register_initial_state(&mut self, _state: &ForagerState) {
            self.registered = true;
        }

        fn plan(&mut self, _sim: &EpisodeSimulator, _eval: &ScoreEvaluator, _state: &ForagerState) -> Direction {
            Direction::East
        }
    }

    #[test]
    fn test_episode_ends_on_win() {
        let world = Forager::new(Layout::parse("%%%%%%\n%P...%\n%%%%%%\n").unwrap());
        let runner = EpisodeRunner::default();
        let mut planner = EastWalker { registered: false };

        let outcome = runner.play(&mut planner, &world, 1);

        assert!(planner.registered);
        assert!(outcome.won());
        assert_eq!(outcome.steps, 3);
        assert_eq!(outcome.actions, vec![Direction::East; 3]);
    }

    #[test]
    fn test_episode_respects_step_limit() {
        let world = Forager::new(Layout::builtin("open").unwrap());
        let runner = EpisodeRunner::new(10, 4);
        let mut planner = EastWalker { registered: false };

        let outcome = runner.play(&mut planner, &world, 1);

        assert_eq!(outcome.steps, 4);
        assert_eq!(outcome.result, GameResult::Ongoing);
    }
}
