//! Greedy one-ply action selection with uniform random tie-breaking

use capture_core::Action;
use rand::seq::SliceRandom;
use rand::Rng;

/// Actions sharing the highest score.
///
/// Scores are compared exactly; NaN scores never qualify.
pub fn best_actions(scored: &[(Action, f64)]) -> Vec<Action> {
    let max = scored
        .iter()
        .map(|&(_, score)| score)
        .fold(f64::NEG_INFINITY, f64::max);

    scored
        .iter()
        .filter(|&&(_, score)| score == max)
        .map(|&(action, _)| action)
        .collect()
}

/// Pick uniformly among the best actions; `None` if nothing qualifies
pub fn select_best<R: Rng + ?Sized>(scored: &[(Action, f64)], rng: &mut R) -> Option<Action> {
    best_actions(scored).choose(rng).copied()
}
