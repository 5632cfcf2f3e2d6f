//! Selection operators for the genetic planner
//!
//! Rank-proportional ("roulette over ranks") selection: draw an integer in
//! `[1, N(N+1)/2]` and walk the ranked population subtracting each member's
//! rank until the running total drops to zero or below. No probability
//! normalization is needed because the ranks always sum to `N(N+1)/2`.

use lookahead_core::ActionSequence;
use rand::Rng;

use crate::population::Member;

/// Upper bound of a selection draw: the triangular number N(N+1)/2
pub fn selection_total(population_size: usize) -> u64 {
    let n = population_size as u64;
    n * (n + 1) / 2
}

/// Pick one index from ranks listed in ascending order.
///
/// # Panics
/// Panics if `ranks` is empty.
pub fn rank_select<R: Rng>(ranks: &[f64], rng: &mut R) -> usize {
    assert!(!ranks.is_empty(), "Population cannot be empty");

    let total = selection_total(ranks.len());
    let mut remaining = rng.gen_range(1..=total) as f64;

    for (i, &rank) in ranks.iter().enumerate() {
        remaining -= rank;
        if remaining <= 0.0 {
            return i;
        }
    }

    ranks.len() - 1
}

/// Draw `count` parents independently from a ranked population.
///
/// `members` must already be sorted and ranked by `assign_ranks`.
pub fn select_parents<A: Copy, R: Rng>(
    members: &[Member<A>],
    count: usize,
    rng: &mut R,
) -> Vec<ActionSequence<A>> {
    let ranks: Vec<f64> = members.iter().map(|m| m.rank).collect();

    (0..count)
        .map(|_| members[rank_select(&ranks, rng)].sequence.clone())
        .collect()
}
