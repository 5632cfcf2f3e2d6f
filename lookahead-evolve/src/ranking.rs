//! Ranking for rank-proportional selection
//!
//! Members are sorted by ascending fitness and given a competition rank:
//!
//! ```text
//! rank(i) = 1 + #{j != i : f_j < f_i} + #{j != i : f_j == f_i} / 2
//! ```
//!
//! Tied members share the average of the positions they occupy, so the ranks
//! of a population of N always add up to N(N+1)/2. Higher fitness means a
//! higher rank and therefore a larger selection weight.

use crate::population::Member;

/// Competition rank of member `i`, ties averaged
pub fn competition_rank(fitness: &[f64], i: usize) -> f64 {
    let own = fitness[i];
    let mut below = 0usize;
    let mut tied = 0usize;

    for (j, &other) in fitness.iter().enumerate() {
        if j == i {
            continue;
        }
        if other < own {
            below += 1;
        } else if other == own {
            tied += 1;
        }
    }

    1.0 + below as f64 + tied as f64 / 2.0
}

/// Sort members by ascending fitness and fill in their ranks
pub fn assign_ranks<A>(members: &mut [Member<A>]) {
    members.sort_by(|a, b| a.fitness.total_cmp(&b.fitness));

    let fitness: Vec<f64> = members.iter().map(|m| m.fitness).collect();
    for (i, member) in members.iter_mut().enumerate() {
        member.rank = competition_rank(&fitness, i);
    }
}
