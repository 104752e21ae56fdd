//! The BoostPipeline applies rule-based boosts to candidate weights.
//!
//! This module provides the BoostPipeline struct that chains boosters
//! together using the builder pattern and guards them with a blacklist.

use std::collections::HashSet;

use crate::boosters::{DemographicBooster, NonAnonymousBooster};
use crate::config::ScoringConfig;
use crate::traits::Booster;
use model::Rankable;
use tracing;

/// Ids excluded from rule-based boosting.
pub type Blacklist = HashSet<String>;

/// Chains multiple boosters together.
///
/// ## Usage
/// ```ignore
/// let pipeline = BoostPipeline::new()
///     .add_booster(NonAnonymousBooster::new(2.0))
///     .add_booster(DemographicBooster::new("Female", 4.0));
///
/// pipeline.apply(&mut candidates, &blacklist);
/// ```
pub struct BoostPipeline {
    boosters: Vec<Box<dyn Booster>>,
}

impl BoostPipeline {
    /// Create a new empty BoostPipeline.
    pub fn new() -> Self {
        Self {
            boosters: Vec::new(),
        }
    }

    /// The production pipeline: non-anonymous boost, then demographic boost.
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new()
            .add_booster(NonAnonymousBooster::new(config.non_anonymous_factor))
            .add_booster(DemographicBooster::new(
                config.boosted_demographic.clone(),
                config.demographic_factor,
            ))
    }

    /// Add a booster to the pipeline (builder pattern).
    pub fn add_booster(mut self, booster: impl Booster + 'static) -> Self {
        self.boosters.push(Box::new(booster));
        self
    }

    /// Apply every booster, in order, to every non-blacklisted candidate.
    ///
    /// ## Algorithm
    /// 1. Skip the candidate if its id or its owner id is blacklisted
    /// 2. For each booster that matches the candidate:
    ///    weight = max(factor, current_weight * factor)
    ///    where an unset weight counts as zero
    /// 3. Boosters are independent, so several may raise the same candidate
    pub fn apply<T: Rankable>(&self, candidates: &mut [T], blacklist: &Blacklist) {
        let mut boosted = 0usize;
        let mut skipped = 0usize;

        for candidate in candidates.iter_mut() {
            if is_blacklisted(candidate, blacklist) {
                skipped += 1;
                continue;
            }
            for booster in &self.boosters {
                if let Some(factor) = booster.factor_for(&*candidate) {
                    let current = candidate.weight().unwrap_or(0.0);
                    candidate.set_weight(boosted_weight(current, factor));
                    boosted += 1;
                }
            }
        }

        tracing::debug!(
            "Boost pipeline applied {} boosts across {} candidates ({} blacklisted)",
            boosted,
            candidates.len(),
            skipped
        );
    }
}

impl Default for BoostPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Raise a weight by `factor` without ever going below the bare factor.
pub fn boosted_weight(current: f64, factor: f64) -> f64 {
    factor.max(current * factor)
}

fn is_blacklisted<T: Rankable>(candidate: &T, blacklist: &Blacklist) -> bool {
    blacklist.contains(candidate.id())
        || candidate
            .owner_id()
            .is_some_and(|owner| blacklist.contains(owner))
}
