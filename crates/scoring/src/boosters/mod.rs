//! Booster implementations for the boosting stage.
//!
//! This module contains the concrete boosters that can be composed
//! into a BoostPipeline.

pub mod demographic;
pub mod non_anonymous;

// Re-export for convenience
pub use demographic::DemographicBooster;
pub use non_anonymous::NonAnonymousBooster;
