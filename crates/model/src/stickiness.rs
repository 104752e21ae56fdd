//! Stickiness types.
//!
//! A stickiness record is a per-user affinity map computed offline from the
//! user's interaction history and cached externally. Interactions are reported
//! back through `RecommendEvent`s.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{PostId, UserId, Weights};

/// Cached per-user multipliers, keyed by candidate id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickinessRecommendation {
    pub scores: HashMap<PostId, f64>,
    pub created_at: i64,
}

impl StickinessRecommendation {
    /// Create an empty record stamped with the current time.
    pub fn new() -> Self {
        Self {
            scores: HashMap::new(),
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Multiply remote weights by this record, element-wise.
    ///
    /// Only ids already present in `weights` are touched: ids that exist only
    /// in the stickiness record are ignored and ids that exist only in
    /// `weights` pass through unmodified.
    pub fn apply_to(&self, weights: &mut Weights) {
        for (id, weight) in weights.iter_mut() {
            if let Some(factor) = self.scores.get(id) {
                *weight *= factor;
            }
        }
    }
}

impl Default for StickinessRecommendation {
    fn default() -> Self {
        Self::new()
    }
}

/// A user-post interaction reported to the stickiness topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendEvent {
    pub user_id: UserId,
    pub post_id: PostId,
}

impl RecommendEvent {
    pub fn new(user_id: impl Into<UserId>, post_id: impl Into<PostId>) -> Self {
        Self {
            user_id: user_id.into(),
            post_id: post_id.into(),
        }
    }
}
