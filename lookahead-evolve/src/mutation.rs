//! Mutation operators for action sequences

use lookahead_core::sequence::random_action;
use lookahead_core::ActionSequence;
use rand::Rng;

/// Replace one uniformly chosen position with a uniformly drawn catalog
/// action. Empty sequences are left alone.
pub fn point_mutation<A: Copy, R: Rng>(
    sequence: &mut ActionSequence<A>,
    catalog: &[A],
    rng: &mut R,
) {
    if sequence.is_empty() {
        return;
    }
    let position = rng.gen_range(0..sequence.len());
    sequence.set(position, random_action(catalog, rng));
}

/// Apply `point_mutation` to each sequence with probability `rate`.
///
/// Returns how many sequences were mutated.
pub fn mutate_population<A: Copy, R: Rng>(
    population: &mut [ActionSequence<A>],
    rate: f64,
    catalog: &[A],
    rng: &mut R,
) -> usize {
    let mut mutated = 0;

    for sequence in population.iter_mut() {
        if rng.gen_bool(rate) {
            point_mutation(sequence, catalog, rng);
            mutated += 1;
        }
    }

    mutated
}
