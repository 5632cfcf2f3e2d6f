//! Rank-selection genetic algorithm over action sequences
//!
//! ## Architecture
//! - Level 1: `plan` - generation loop
//! - Level 2: `score_population`, `next_generation`
//! - Level 3: ranking, selection, crossover, mutation (sibling modules)

use lookahead_core::{
    legal_or_placeholder, play_sequence, should_plan, ActionSequence, ConfigError, Evaluator,
    Planner, SearchReport, SequenceRun, Simulator, StopReason,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::crossover::crossover_pairs;
use crate::mutation::mutate_population;
use crate::population::Member;
use crate::ranking::assign_ranks;
use crate::selection::select_parents;
use crate::GeneticConfig;

/// Genetic algorithm planner
#[derive(Debug)]
pub struct GeneticPlanner<A> {
    config: GeneticConfig,
    catalog: Vec<A>,
    rng: ChaCha8Rng,
    last_report: Option<SearchReport>,
}

impl<A: Copy> GeneticPlanner<A> {
    /// Create a planner drawing random genes from `catalog`
    pub fn new(config: GeneticConfig, catalog: Vec<A>, seed: u64) -> Result<Self, ConfigError> {
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

    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    /// Summary of the most recent `plan` call
    pub fn last_report(&self) -> Option<SearchReport> {
        self.last_report
    }

    /// Fresh random population
    pub fn initial_population(&mut self) -> Vec<ActionSequence<A>> {
        (0..self.config.population_size)
            .map(|_| ActionSequence::random(&self.catalog, self.config.sequence_length, &mut self.rng))
            .collect()
    }

    /// Breed the next population from scored members.
    ///
    /// Ranks the members, draws `population_size` parents, crosses
    /// consecutive pairs and mutates. The result always has exactly
    /// `population_size` sequences.
    pub fn next_generation(&mut self, mut members: Vec<Member<A>>) -> Vec<ActionSequence<A>> {
        assign_ranks(&mut members);

        let mut next = select_parents(&members, self.config.population_size, &mut self.rng);
        crossover_pairs(&mut next, self.config.crossover_rate, &mut self.rng);
        mutate_population(&mut next, self.config.mutation_rate, &self.catalog, &mut self.rng);

        next
    }
}

/// Simulate and score every sequence. None if the sentinel appeared.
fn score_population<S, E>(
    sim: &S,
    eval: &E,
    state: &S::State,
    population: &[ActionSequence<S::Action>],
) -> Option<Vec<Member<S::Action>>>
where
    S: Simulator,
    E: Evaluator<S::State>,
{
    let mut members = Vec::with_capacity(population.len());

    for sequence in population {
        match play_sequence(sim, state, sequence) {
            SequenceRun::Finished(end) => {
                let fitness = eval.evaluate(state, &end);
                members.push(Member::new(sequence.clone(), fitness));
            }
            SequenceRun::Exhausted { .. } => return None,
        }
    }

    Some(members)
}

impl<S, E> Planner<S, E> for GeneticPlanner<S::Action>
where
    S: Simulator,
    E: Evaluator<S::State>,
{
    fn name(&self) -> &str {
        "genetic"
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

        let mut population = self.initial_population();
        let mut action = noop;
        let mut clock = self.config.budget.start();

        let stop = loop {
            if !clock.tick() {
                break StopReason::Budget;
            }

            let Some(members) = score_population(sim, eval, state, &population) else {
                break StopReason::Sentinel;
            };

            if tracing::enabled!(tracing::Level::TRACE) {
                let best = members.iter().map(|m| m.fitness).fold(f64::NEG_INFINITY, f64::max);
                tracing::trace!("generation {}: best fitness {:.3}", clock.iterations(), best);
            }

            population = self.next_generation(members);

            let pick = self.rng.gen_range(0..population.len());
            action = population[pick].first().unwrap_or(noop);
        };

        tracing::debug!(
            "genetic search stopped ({:?}) after {} generations",
            stop,
            clock.iterations()
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

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Act {
        A,
        B,
    }

    /// State = actions taken so far; never terminal
    struct Script;

    impl Simulator for Script {
        type State = Vec<Act>;
        type Action = Act;

        fn legal_actions(&self, _state: &Vec<Act>) -> Vec<Act> {
            vec![Act::A, Act::B]
        }

        fn action_catalog(&self) -> Vec<Act> {
            vec![Act::A, Act::B]
        }

        fn step(&self, state: &Vec<Act>, action: Act) -> Successor<Vec<Act>> {
            let mut next = state.clone();
            next.push(action);
            Successor::Advanced(next)
        }

        fn is_win(&self, _state: &Vec<Act>) -> bool {
            false
        }

        fn is_lose(&self, _state: &Vec<Act>) -> bool {
            false
        }

        fn noop_action(&self) -> Act {
            Act::B
        }
    }

    /// Strongly prefers plans that open with A; small bonus for later As
    fn prefers_a_first(base: &Vec<Act>, cand: &Vec<Act>) -> f64 {
        let plan = &cand[base.len()..];
        let first = if plan.first() == Some(&Act::A) { 10.0 } else { 0.0 };
        first + plan.iter().filter(|&&a| a == Act::A).count() as f64 * 0.1
    }

    fn planner(seed: u64, generations: u64) -> GeneticPlanner<Act> {
        let config = GeneticConfig::default().with_budget(SearchBudget::iterations(generations));
        GeneticPlanner::new(config, Script.action_catalog(), seed).unwrap()
    }

    #[test]
    fn test_rejects_bad_config() {
        let config = GeneticConfig {
            population_size: 0,
            ..Default::default()
        };
        assert!(GeneticPlanner::new(config, vec![Act::A], 1).is_err());
        assert_eq!(
            GeneticPlanner::<Act>::new(GeneticConfig::default(), vec![], 1).err(),
            Some(ConfigError::EmptyCatalog)
        );
    }

    #[test]
    fn test_population_size_is_invariant() {
        let mut p = planner(42, 1);
        let mut population = p.initial_population();

        for generation in 0..50 {
            assert_eq!(population.len(), 8, "generation {}", generation);
            assert!(population.iter().all(|s| s.len() == 5));

            let members = score_population(&Script, &prefers_a_first, &Vec::new(), &population).unwrap();
            population = p.next_generation(members);
        }
    }

    #[test]
    fn test_population_size_follows_config() {
        let config = GeneticConfig {
            population_size: 5,
            sequence_length: 3,
            ..Default::default()
        };
        let mut p = GeneticPlanner::new(config, Script.action_catalog(), 1).unwrap();
        let population = p.initial_population();
        assert_eq!(population.len(), 5);

        let members = score_population(&Script, &prefers_a_first, &Vec::new(), &population).unwrap();
        assert_eq!(p.next_generation(members).len(), 5);
    }

    #[test]
    fn test_sentinel_mid_generation_returns_tracked_action() {
        // 8 members * 5 steps = 40 calls per generation; 100 calls -> dies in
        // the third generation
        let sim = BudgetedSimulator::new(Script, 100);
        let mut p = planner(42, 1_000);

        let action = p.plan(&sim, &prefers_a_first, &Vec::new());

        assert!(action == Act::A || action == Act::B);
        let report = p.last_report().unwrap();
        assert_eq!(report.stop, StopReason::Sentinel);
        assert_eq!(report.iterations, 3);
    }

    #[test]
    fn test_sentinel_in_first_generation_returns_placeholder() {
        let sim = BudgetedSimulator::new(Script, 4);
        let mut p = planner(42, 1_000);

        assert_eq!(p.plan(&sim, &prefers_a_first, &Vec::new()), Act::B);
    }

    #[test]
    fn test_converges_to_preferred_first_action() {
        let trials = 40;
        let mut picked_a = 0;

        for seed in 0..trials {
            let mut p = planner(seed, 30);
            if p.plan(&Script, &prefers_a_first, &Vec::new()) == Act::A {
                picked_a += 1;
            }
        }

        assert!(picked_a >= 34, "picked A {} / {} times", picked_a, trials);
    }

    #[test]
    fn test_more_generations_do_not_hurt() {
        let count_a = |generations: u64| {
            (0..40)
                .filter(|&seed| planner(seed, generations).plan(&Script, &prefers_a_first, &Vec::new()) == Act::A)
                .count()
        };

        let short = count_a(1);
        let long = count_a(40);
        assert!(long >= short, "1 gen: {}, 40 gens: {}", short, long);
    }
}
