//! Boost for posts whose author matches a demographic label.

use crate::traits::Booster;
use model::Rankable;

/// Boosts candidates whose demographic attribute equals a configured label.
///
/// ## Algorithm
/// 1. Compare `candidate.demographic()` to the label, exactly and case-sensitively
/// 2. Return the factor on a match
/// 3. Anonymity is not consulted; the non-anonymous rule is independent
pub struct DemographicBooster {
    demographic: String,
    factor: f64,
}

impl DemographicBooster {
    /// Create a new DemographicBooster.
    ///
    /// # Arguments
    /// * `demographic` - Label to boost (production value: "Female")
    /// * `factor` - Multiplier for matching posts (production value: 4.0)
    pub fn new(demographic: impl Into<String>, factor: f64) -> Self {
        Self {
            demographic: demographic.into(),
            factor,
        }
    }
}

impl Booster for DemographicBooster {
    fn name(&self) -> &str {
        "DemographicBooster"
    }

    fn factor_for(&self, candidate: &dyn Rankable) -> Option<f64> {
        if self.demographic.is_empty() {
            return None;
        }
        (candidate.demographic() == self.demographic).then_some(self.factor)
    }
}
