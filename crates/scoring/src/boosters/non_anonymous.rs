//! Boost for posts published under the author's own name.

use crate::traits::Booster;
use model::Rankable;

/// Boosts every candidate that is not anonymous.
pub struct NonAnonymousBooster {
    factor: f64,
}

impl NonAnonymousBooster {
    /// Create a new NonAnonymousBooster.
    ///
    /// # Arguments
    /// * `factor` - Multiplier for non-anonymous posts (production value: 2.0)
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }
}

impl Booster for NonAnonymousBooster {
    fn name(&self) -> &str {
        "NonAnonymousBooster"
    }

    fn factor_for(&self, candidate: &dyn Rankable) -> Option<f64> {
        (!candidate.is_anonymous()).then_some(self.factor)
    }
}
