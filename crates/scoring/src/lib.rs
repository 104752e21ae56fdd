//! Scoring, boosting and ordering of rankable candidates.
//!
//! This crate provides:
//! - `ScoringConfig` holding every tunable constant of the engine
//! - The decaying popularity score function
//! - Booster trait and implementations for rule-based weight boosts
//! - BoostPipeline for composing boosters behind a blacklist
//! - A stable descending sort by score
//!
//! ## Architecture
//! Candidates are processed in stages:
//! 1. Weights from the remote service are assigned by the caller
//! 2. BoostPipeline raises weights for eligible, non-blacklisted candidates
//! 3. Every candidate is scored against the same evaluation instant
//! 4. Candidates are sorted by descending score; ties keep input order
//!
//! ## Example Usage
//! ```ignore
//! use scoring::{BoostPipeline, ScoringConfig, sort_by_score};
//!
//! let config = ScoringConfig::default();
//! let boosts = BoostPipeline::from_config(&config);
//!
//! boosts.apply(&mut posts, &blacklist);
//! sort_by_score(&mut posts, chrono::Utc::now().timestamp(), &config);
//! ```

pub mod config;
pub mod score;
pub mod traits;
pub mod boosters;
pub mod boost_pipeline;
pub mod ranking;

// Re-export main types
pub use config::ScoringConfig;
pub use score::{assigned_weight, raw_engagement, score, score_all};
pub use traits::Booster;
pub use boost_pipeline::{BoostPipeline, Blacklist};
pub use ranking::sort_by_score;
