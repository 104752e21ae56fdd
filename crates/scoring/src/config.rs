//! Tunable constants of the scoring engine.

use serde::{Deserialize, Serialize};

/// Constants used by the score function and the rule-based boosters.
///
/// Defaults reproduce the production formula exactly; change them only when
/// every consumer of the ranking agrees on the new values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Power applied to the age term. Higher decays old content faster.
    pub decay_exponent: f64,

    /// Hours added to the age so brand-new items do not blow up the score.
    pub age_offset_hours: f64,

    /// Watch time is counted in whole units of this many seconds.
    pub watch_seconds_per_day: u64,

    pub non_anonymous_factor: f64,

    pub demographic_factor: f64,

    /// Demographic label that receives `demographic_factor`.
    pub boosted_demographic: String,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            decay_exponent: 2.0,
            age_offset_hours: 2.0,
            watch_seconds_per_day: 86_400,
            non_anonymous_factor: 2.0,
            demographic_factor: 4.0,
            boosted_demographic: "Female".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_production_formula() {
        let config = ScoringConfig::default();

        assert_eq!(config.decay_exponent, 2.0);
        assert_eq!(config.age_offset_hours, 2.0);
        assert_eq!(config.watch_seconds_per_day, 86_400);
        assert_eq!(config.non_anonymous_factor, 2.0);
        assert_eq!(config.demographic_factor, 4.0);
        assert_eq!(config.boosted_demographic, "Female");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: ScoringConfig = serde_json::from_str(r#"{"decay_exponent": 1.5}"#).unwrap();

        assert_eq!(config.decay_exponent, 1.5);
        assert_eq!(config.age_offset_hours, 2.0);
        assert_eq!(config.boosted_demographic, "Female");
    }
}
