//! Crossover operators for action sequences
//!
//! Uniform crossover: every gene of a child is copied from one of the two
//! parents, chosen independently per position.

use lookahead_core::ActionSequence;
use rand::Rng;

/// Build one child from two parents of equal length.
///
/// # Panics
/// Panics if the parents differ in length.
pub fn uniform_crossover<A: Copy, R: Rng>(
    a: &ActionSequence<A>,
    b: &ActionSequence<A>,
    rng: &mut R,
) -> ActionSequence<A> {
    assert_eq!(a.len(), b.len(), "Parents must have the same length");

    let genes = a
        .iter()
        .zip(b.iter())
        .map(|(gene_a, gene_b)| if rng.gen_bool(0.5) { gene_a } else { gene_b })
        .collect::<Vec<_>>();

    ActionSequence::from(genes)
}

/// Cross consecutive pairs in place.
///
/// Each pair `(2i, 2i + 1)` is replaced by two children with probability
/// `rate`; otherwise it is left alone. An odd trailing sequence is kept.
/// Returns the number of pairs that were crossed.
pub fn crossover_pairs<A: Copy, R: Rng>(
    parents: &mut [ActionSequence<A>],
    rate: f64,
    rng: &mut R,
) -> usize {
    let mut crossed = 0;

    for pair in parents.chunks_exact_mut(2) {
        if !rng.gen_bool(rate) {
            continue;
        }

        let first = uniform_crossover(&pair[0], &pair[1], rng);
        let second = uniform_crossover(&pair[0], &pair[1], rng);
        pair[0] = first;
        pair[1] = second;
        crossed += 1;
    }

    crossed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_child_genes_come_from_parents() {
        let a = ActionSequence::from(vec![1, 2, 3, 4, 5]);
        let b = ActionSequence::from(vec![10, 20, 30, 40, 50]);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..100 {
            let child = uniform_crossover(&a, &b, &mut rng);
            assert_eq!(child.len(), 5);
            for i in 0..5 {
                let gene = child.get(i).unwrap();
                assert!(gene == a.get(i).unwrap() || gene == b.get(i).unwrap());
            }
        }
    }

    #[test]
    fn test_crossover_mixes_positions() {
        let a = ActionSequence::filled('a', 8);
        let b = ActionSequence::filled('b', 8);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let mut mixed = false;
        for _ in 0..20 {
            let child = uniform_crossover(&a, &b, &mut rng);
            if child.iter().any(|g| g == 'a') && child.iter().any(|g| g == 'b') {
                mixed = true;
            }
        }
        assert!(mixed, "Per-gene crossover should mix parents within one child");
    }

    #[test]
    fn test_crossover_rate_zero_keeps_parents() {
        let mut parents = vec![
            ActionSequence::filled(1, 4),
            ActionSequence::filled(2, 4),
            ActionSequence::filled(3, 4),
        ];
        let original = parents.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        assert_eq!(crossover_pairs(&mut parents, 0.0, &mut rng), 0);
        assert_eq!(parents, original);
    }

    #[test]
    fn test_crossover_rate_one_crosses_every_pair() {
        let mut parents = vec![
            ActionSequence::filled(1, 4),
            ActionSequence::filled(2, 4),
            ActionSequence::filled(3, 4),
            ActionSequence::filled(4, 4),
            ActionSequence::filled(5, 4),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        assert_eq!(crossover_pairs(&mut parents, 1.0, &mut rng), 2);
        assert_eq!(parents.len(), 5);

        // Children only carry genes from their own pair
        for (i, child) in parents[..4].iter().enumerate() {
            let allowed = if i < 2 { [1, 2] } else { [3, 4] };
            assert!(child.iter().all(|g| allowed.contains(&g)));
        }
        // The odd one out is untouched
        assert_eq!(parents[4], ActionSequence::filled(5, 4));
    }
}
