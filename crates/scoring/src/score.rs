//! The decaying popularity score.
//!
//! ## Formula
//! ```text
//! raw       = upvotes / 2 + comments + favorites + shares + floor(watch_seconds / 86400)
//! age_hours = (now - created_at) / 3600
//! score     = raw / (age_hours + 2)^2
//! score    *= weight            (only when the weight slot is set and non-zero)
//! ```
//!
//! Upvotes are halved with integer division. A `created_at` in the future
//! yields a negative age and is computed as-is.

use model::Rankable;
use rayon::prelude::*;

use crate::config::ScoringConfig;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Weighted engagement of a candidate, before decay.
pub fn raw_engagement<T: Rankable + ?Sized>(candidate: &T, config: &ScoringConfig) -> f64 {
    let watch_days = candidate
        .watch_seconds()
        .unwrap_or(0)
        .checked_div(config.watch_seconds_per_day)
        .unwrap_or(0);

    (candidate.upvote_count() / 2) as f64
        + candidate.comment_count() as f64
        + candidate.favorite_count() as f64
        + candidate.share_count() as f64
        + watch_days as f64
}

/// The weight that multiplies the score, if any.
///
/// Zero is indistinguishable from "not computed yet" and is treated as unset.
pub fn assigned_weight<T: Rankable + ?Sized>(candidate: &T) -> Option<f64> {
    candidate.weight().filter(|w| *w != 0.0)
}

/// Score a single candidate at evaluation instant `now` (seconds since epoch).
pub fn score<T: Rankable + ?Sized>(candidate: &T, now: i64, config: &ScoringConfig) -> f64 {
    let age_hours = (now - candidate.created_at()) as f64 / SECONDS_PER_HOUR;
    let decay = (age_hours + config.age_offset_hours).powf(config.decay_exponent);

    let score = raw_engagement(candidate, config) / decay;
    match assigned_weight(candidate) {
        Some(weight) => score * weight,
        None => score,
    }
}

/// Score all candidates in parallel.
///
/// # Returns
/// One score per candidate, in the same order as the input
pub fn score_all<T: Rankable + Sync>(candidates: &[T], now: i64, config: &ScoringConfig) -> Vec<f64> {
    candidates
        .par_iter()
        .map(|candidate| score(candidate, now, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::Post;

    const NOW: i64 = 1_700_000_000;

    fn post(id: &str, upvotes: u32, comments: u32, age_secs: i64) -> Post {
        Post {
            upvote_count: upvotes,
            comment_count: comments,
            ..Post::new(id, NOW - age_secs)
        }
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_score_matches_formula() {
        let config = ScoringConfig::default();
        let candidate = post("a", 10, 2, 3600);

        // raw = 10/2 + 2 = 7, denominator = (1 + 2)^2 = 9
        assert!(approx_eq(score(&candidate, NOW, &config), 7.0 / 9.0));
    }

    #[test]
    fn test_upvotes_are_halved_with_integer_division() {
        let config = ScoringConfig::default();

        assert_eq!(raw_engagement(&post("a", 3, 0, 0), &config), 1.0);
        assert_eq!(raw_engagement(&post("a", 1, 0, 0), &config), 0.0);
    }

    #[test]
    fn test_all_counters_contribute() {
        let config = ScoringConfig::default();
        let candidate = Post {
            upvote_count: 4,
            comment_count: 1,
            share_count: 2,
            favorite_count: 3,
            watch_seconds: Some(2 * 86_400 + 86_399),
            ..Post::new("a", NOW)
        };

        // 2 + 1 + 3 + 2 + floor(2.99...) = 10
        assert_eq!(raw_engagement(&candidate, &config), 10.0);
    }

    #[test]
    fn test_missing_watch_time_counts_as_zero() {
        let config = ScoringConfig::default();
        let with_none = post("a", 4, 1, 0);
        let with_zero = Post {
            watch_seconds: Some(0),
            ..with_none.clone()
        };

        assert_eq!(
            score(&with_none, NOW, &config),
            score(&with_zero, NOW, &config)
        );
    }

    #[test]
    fn test_identical_candidates_score_identically() {
        let config = ScoringConfig::default();
        let first = post("a", 8, 3, 7200);
        let second = post("b", 8, 3, 7200);

        assert_eq!(score(&first, NOW, &config), score(&second, NOW, &config));
    }

    #[test]
    fn test_older_candidates_score_lower() {
        let config = ScoringConfig::default();
        let mut previous = f64::INFINITY;

        for age_hours in [0, 1, 2, 6, 24, 24 * 7, 24 * 365] {
            let current = score(&post("a", 10, 2, age_hours * 3600), NOW, &config);
            assert!(
                current < previous,
                "score should strictly decay, age {}h gave {} after {}",
                age_hours,
                current,
                previous
            );
            previous = current;
        }
    }

    #[test]
    fn test_zero_weight_is_a_no_op() {
        let config = ScoringConfig::default();
        let unweighted = post("a", 10, 2, 3600);
        let mut zero = unweighted.clone();
        zero.set_weight(0.0);

        assert_eq!(assigned_weight(&zero), None);
        assert_eq!(score(&zero, NOW, &config), score(&unweighted, NOW, &config));
    }

    #[test]
    fn test_weight_scales_linearly() {
        let config = ScoringConfig::default();
        let mut single = post("a", 10, 2, 3600);
        single.set_weight(1.5);
        let mut double = single.clone();
        double.set_weight(3.0);

        assert!(approx_eq(
            score(&double, NOW, &config),
            2.0 * score(&single, NOW, &config)
        ));
    }

    #[test]
    fn test_future_timestamp_does_not_panic() {
        let config = ScoringConfig::default();
        // Created one hour in the future: age = -1h, denominator = (-1 + 2)^2 = 1
        let candidate = post("a", 10, 2, -3600);

        let value = score(&candidate, NOW, &config);
        assert!(value.is_finite());
        assert!(approx_eq(value, 7.0));
    }

    #[test]
    fn test_zero_day_divisor_ignores_watch_time() {
        let config = ScoringConfig {
            watch_seconds_per_day: 0,
            ..ScoringConfig::default()
        };
        let candidate = Post {
            watch_seconds: Some(1_000_000),
            ..Post::new("a", NOW)
        };

        assert_eq!(raw_engagement(&candidate, &config), 0.0);
    }

    #[test]
    fn test_score_all_preserves_order() {
        let config = ScoringConfig::default();
        let candidates = vec![post("a", 10, 0, 3600), post("b", 2, 0, 3600), post("c", 0, 0, 0)];

        let scores = score_all(&candidates, NOW, &config);

        assert_eq!(scores.len(), 3);
        for (candidate, value) in candidates.iter().zip(&scores) {
            assert_eq!(*value, score(candidate, NOW, &config));
        }
    }
}
