//! Hill climbing over action sequences
//!
//! Keeps an incumbent plan (`best`, initially all placeholders) and a working
//! candidate (`cur`, initially random). Every round:
//! 1. Simulate `cur` from the current state
//! 2. If the simulator hit its horizon, decide immediately
//! 3. Otherwise adopt `cur` as the new incumbent on strict improvement
//! 4. Regenerate `cur`: each position is redrawn at random with probability
//!    `restart_rate`, or copied from the incumbent

use lookahead_core::sequence::random_action;
use lookahead_core::{
    legal_or_placeholder, play_sequence, should_plan, ActionSequence, ConfigError, Evaluator,
    Planner, SearchReport, SequenceRun, Simulator, StopReason,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::HillClimbConfig;

/// Score the incumbent has to beat at the start of a decision. The evaluator
/// scores relative to the current state, so zero means "no better than now".
const INITIAL_BEST_SCORE: f64 = 0.0;

/// Stochastic hill climbing planner
#[derive(Debug)]
pub struct HillClimbPlanner<A> {
    config: HillClimbConfig,
    catalog: Vec<A>,
    rng: ChaCha8Rng,
    last_report: Option<SearchReport>,
}

impl<A: Copy> HillClimbPlanner<A> {
    /// Create a planner drawing random actions from `catalog`
    pub fn new(config: HillClimbConfig, catalog: Vec<A>, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        if catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        Ok(Self {
            config,
            catalog,
            rng: ChaCha8Rng::seed_from_u64(seed),
            last_report: None,
        })
    }

    pub fn config(&self) -> &HillClimbConfig {
        &self.config
    }

    /// Summary of the most recent `plan` call
    pub fn last_report(&self) -> Option<SearchReport> {
        self.last_report
    }

    /// Next candidate: per position, a fresh random action or the incumbent's
    fn restart_toward(&mut self, cur: &mut ActionSequence<A>, best: &ActionSequence<A>) {
        for (i, incumbent) in best.iter().enumerate() {
            let action = if self.rng.gen_bool(self.config.restart_rate) {
                random_action(&self.catalog, &mut self.rng)
            } else {
                incumbent
            };
            cur.set(i, action);
        }
    }
}

impl<S, E> Planner<S, E> for HillClimbPlanner<S::Action>
where
    S: Simulator,
    E: Evaluator<S::State>,
{
    fn name(&self) -> &str {
        "hill-climb"
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

        let len = self.config.sequence_length;
        let mut best = ActionSequence::filled(noop, len);
        let mut best_score = INITIAL_BEST_SCORE;
        let mut cur = ActionSequence::random(&self.catalog, len, &mut self.rng);
        let mut action = noop;
        let mut clock = self.config.budget.start();

        let stop = loop {
            if !clock.tick() {
                break StopReason::Budget;
            }

            match play_sequence(sim, state, &cur) {
                SequenceRun::Exhausted { last, at } => {
                    let score = eval.evaluate(state, &last);
                    tracing::trace!("hill climbing sentinel at step {} of round {}", at, clock.iterations());
                    let chosen = if score > best_score { &cur } else { &best };
                    action = chosen.first().unwrap_or(noop);
                    break StopReason::Sentinel;
                }
                SequenceRun::Finished(end) => {
                    let score = eval.evaluate(state, &end);
                    if score > best_score {
                        best_score = score;
                        best = cur.clone();
                        tracing::trace!("hill climbing round {}: new best {:.3}", clock.iterations(), score);
                    }
                    action = best.first().unwrap_or(noop);
                }
            }

            self.restart_toward(&mut cur, &best);
        };

        tracing::debug!(
            "hill climbing stopped ({:?}) after {} rounds, best={:.3}",
            stop,
            clock.iterations(),
            best_score
        );
        self.last_report = Some(SearchReport {
            iterations: clock.iterations(),
            stop,
        });

        legal_or_placeholder(sim, state, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookahead_core::{BudgetedSimulator, SearchBudget, Successor};

    /// Walk on the integers. Score = position. Action 7 is in the catalog but
    /// never legal. Reaching 10 wins.
    struct Walk;

    impl Simulator for Walk {
        type State = i32;
        type Action = i32;

        fn legal_actions(&self, _state: &i32) -> Vec<i32> {
            vec![-1, 0, 1]
        }

        fn action_catalog(&self) -> Vec<i32> {
            vec![-1, 0, 1, 7]
        }

        fn step(&self, state: &i32, action: i32) -> Successor<i32> {
            let delta = if action == 7 { 0 } else { action };
            Successor::Advanced(state + delta)
        }

        fn is_win(&self, state: &i32) -> bool {
            *state >= 10
        }

        fn is_lose(&self, _state: &i32) -> bool {
            false
        }

        fn noop_action(&self) -> i32 {
            0
        }
    }

    fn position_delta(base: &i32, cand: &i32) -> f64 {
        (cand - base) as f64
    }

    fn planner(seed: u64) -> HillClimbPlanner<i32> {
        HillClimbPlanner::new(HillClimbConfig::default(), Walk.action_catalog(), seed).unwrap()
    }

    #[test]
    fn test_rejects_empty_catalog() {
        let result = HillClimbPlanner::<i32>::new(HillClimbConfig::default(), Vec::new(), 1);
        assert_eq!(result.err(), Some(ConfigError::EmptyCatalog));
    }

    #[test]
    fn test_stops_on_sentinel() {
        let sim = BudgetedSimulator::new(Walk, 200);
        let mut p = planner(42);

        let action = p.plan(&sim, &position_delta, &0);

        assert!(Walk.legal_actions(&0).contains(&action));
        let report = p.last_report().unwrap();
        assert_eq!(report.stop, StopReason::Sentinel);
        assert!(report.iterations >= 40, "200 calls / 5 per round");
    }

    #[test]
    fn test_prefers_moving_forward() {
        let sim = BudgetedSimulator::new(Walk, 500);
        let mut forward = 0;

        for seed in 0..20 {
            sim.reset();
            let mut p = planner(seed);
            if p.plan(&sim, &position_delta, &0) == 1 {
                forward += 1;
            }
        }

        assert!(forward >= 15, "forward chosen {} / 20 times", forward);
    }

    #[test]
    fn test_sentinel_on_first_step_returns_placeholder() {
        let sim = BudgetedSimulator::new(Walk, 0);
        let mut p = planner(42);

        assert_eq!(p.plan(&sim, &position_delta, &0), 0);
        assert_eq!(p.last_report().unwrap().stop, StopReason::Sentinel);
    }

    #[test]
    fn test_sentinel_returns_improving_candidate() {
        // Round one reaches 3 before the sentinel, beating the initial best of 0
        let sim = BudgetedSimulator::new(Walk, 3);
        let mut p = HillClimbPlanner::new(HillClimbConfig::default(), vec![1], 42).unwrap();

        assert_eq!(p.plan(&sim, &position_delta, &0), 1);
        let report = p.last_report().unwrap();
        assert_eq!(report.stop, StopReason::Sentinel);
        assert_eq!(report.iterations, 1);
    }

    #[test]
    fn test_sentinel_without_improvement_keeps_incumbent() {
        let sim = BudgetedSimulator::new(Walk, 3);
        let mut p = HillClimbPlanner::new(HillClimbConfig::default(), vec![-1], 42).unwrap();

        assert_eq!(p.plan(&sim, &position_delta, &0), 0);
        assert_eq!(p.last_report().unwrap().stop, StopReason::Sentinel);
    }

    #[test]
    fn test_deterministic_with_same_seed() {
        let sim = BudgetedSimulator::new(Walk, 300);

        let run = |seed: u64| {
            let mut p = planner(seed);
            (0..5)
                .map(|start| {
                    sim.reset();
                    let action = p.plan(&sim, &position_delta, &start);
                    (action, p.last_report().unwrap().iterations)
                })
                .collect::<Vec<_>>()
        };

        assert_eq!(run(11), run(11));
    }

    #[test]
    fn test_iteration_budget_bounds_unlimited_simulator() {
        let config = HillClimbConfig::default().with_budget(SearchBudget::iterations(25));
        let mut p = HillClimbPlanner::new(config, Walk.action_catalog(), 3).unwrap();

        let action = p.plan(&Walk, &position_delta, &0);

        assert!(Walk.legal_actions(&0).contains(&action));
        let report = p.last_report().unwrap();
        assert_eq!(report.stop, StopReason::Budget);
        assert_eq!(report.iterations, 25);
    }

    #[test]
    fn test_terminal_state_returns_placeholder() {
        let mut p = planner(1);
        assert_eq!(p.plan(&Walk, &position_delta, &10), 0);
        assert_eq!(p.last_report().unwrap().stop, StopReason::NothingToPlan);
    }

    #[test]
    fn test_never_returns_illegal_catalog_action() {
        let sim = BudgetedSimulator::new(Walk, 37);

        for seed in 0..50 {
            sim.reset();
            let mut p = planner(seed);
            assert_ne!(p.plan(&sim, &position_delta, &0), 7);
        }
    }
}
