//! Population members for the genetic planner

use lookahead_core::ActionSequence;

/// One scored individual: its plan, simulated fitness and selection rank
#[derive(Clone, Debug, PartialEq)]
pub struct Member<A> {
    pub sequence: ActionSequence<A>,
    /// Evaluator score of the state the plan reaches (higher = better)
    pub fitness: f64,
    /// Competition rank, ties averaged (1 = worst). Zero until ranked.
    pub rank: f64,
}

impl<A> Member<A> {
    /// Unranked member
    pub fn new(sequence: ActionSequence<A>, fitness: f64) -> Self {
        // NaN would break the rank arithmetic; treat it as the worst score
        let fitness = if fitness.is_nan() { f64::NEG_INFINITY } else { fitness };
        Self {
            sequence,
            fitness,
            rank: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_fitness_is_worst() {
        let member = Member::new(ActionSequence::filled(0u8, 3), f64::NAN);
        assert_eq!(member.fitness, f64::NEG_INFINITY);
        assert_eq!(member.rank, 0.0);
    }
}
