//! Final ordering of scored candidates.

use std::cmp::Ordering;

use model::Rankable;

use crate::config::ScoringConfig;
use crate::score::score_all;

/// Sort candidates by descending score, in place.
///
/// Every candidate is scored once against the same instant `now`. The sort is
/// stable: candidates with equal scores keep their input order. A NaN score
/// (only reachable with a non-default config) sorts last.
pub fn sort_by_score<T: Rankable + Sync>(candidates: &mut Vec<T>, now: i64, config: &ScoringConfig) {
    let scores = score_all(candidates, now, config);

    let mut scored: Vec<(f64, T)> = scores.into_iter().zip(candidates.drain(..)).collect();
    scored.sort_by(|a, b| descending(a.0, b.0));

    candidates.extend(scored.into_iter().map(|(_, candidate)| candidate));
}

fn descending(a: f64, b: f64) -> Ordering {
    sortable(b).total_cmp(&sortable(a))
}

fn sortable(score: f64) -> f64 {
    if score.is_nan() { f64::NEG_INFINITY } else { score }
}
