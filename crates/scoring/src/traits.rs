//! Core traits for the boosting stage.
//!
//! This module defines the Booster trait that allows composable,
//! extensible rule-based boosts to be applied to candidate weights.

use model::Rankable;

/// Core trait for rule-based weight boosts.
///
/// All boosters must implement this trait to be used in the BoostPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows a pipeline to be shared across concurrent ranking calls
/// - Boosters only decide *whether* and *by how much*; the pipeline owns the
///   combination rule and the blacklist check, so every booster raises weights
///   the same way
pub trait Booster: Send + Sync {
    /// Returns the name of this booster (for logging/debugging)
    fn name(&self) -> &str;

    /// The factor to apply to `candidate`, or `None` if the rule does not match.
    fn factor_for(&self, candidate: &dyn Rankable) -> Option<f64>;
}
