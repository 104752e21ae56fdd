//! Ranking SDK for the content feed.
//!
//! This crate contains the orchestrator that coordinates the weight supplier,
//! the rule-based boosters and the score-based ordering.
//!
//! ## Example Usage
//! ```ignore
//! use recommender::{RecommendStore, Settings};
//!
//! let store = RecommendStore::connect(&Settings::from_env()?).await?;
//!
//! // Weights are fetched while the feed loads its candidates
//! let recommender = store.new_recommender(user_id);
//! let mut posts = load_candidate_posts().await?;
//! recommender.recommend(&mut posts).await;
//!
//! // Later, when the user opens a post
//! store.notify_stickiness(user_id, post_id).await?;
//! ```

pub mod config;
pub mod supplier;
pub mod ranker;
pub mod recommend_store;

pub use config::{ConfigError, RankerConfig, Settings};
pub use supplier::{PendingWeights, WeightSupplier};
pub use ranker::{assign_weights, Ranker, Recommender};
pub use recommend_store::RecommendStore;
