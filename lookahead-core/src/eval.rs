//! Position evaluation for the Forager world

use crate::forager::ForagerState;
use crate::oracle::Evaluator;

/// Score gained since the baseline state.
///
/// Win and loss are already folded into the score (bonus / penalty), so a
/// plain difference ranks winning lines above everything else.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScoreEvaluator;

impl Evaluator<ForagerState> for ScoreEvaluator {
    fn evaluate(&self, baseline: &ForagerState, candidate: &ForagerState) -> f64 {
        candidate.score - baseline.score
    }
}
