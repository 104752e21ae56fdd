//! # Weight Supplier
//!
//! Produces the per-request weight map for a user:
//! 1. Fetch remote weights from the recommendation service
//! 2. Multiply them by the user's cached stickiness record, if any
//!
//! Every failure degrades to "no weights"; nothing here is fatal to ranking.
//!
//! The fetch runs as its own tokio task so the caller can race it against a
//! deadline. When the deadline wins the task is detached, not cancelled: it
//! runs to completion (bounded by the HTTP client's own timeout) and its
//! result is dropped.

use std::sync::Arc;
use std::time::Duration;

use model::{UserId, Weights};
use recommender_client::WeightSource;
use store::StickinessCache;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Combines the remote weight source with the stickiness cache.
#[derive(Clone)]
pub struct WeightSupplier {
    source: Arc<dyn WeightSource>,
    stickiness: Option<Arc<dyn StickinessCache>>,
}

impl WeightSupplier {
    /// Create a supplier without a stickiness cache.
    pub fn new(source: Arc<dyn WeightSource>) -> Self {
        Self {
            source,
            stickiness: None,
        }
    }

    /// Attach a stickiness cache (builder pattern).
    pub fn with_stickiness(mut self, cache: Arc<dyn StickinessCache>) -> Self {
        self.stickiness = Some(cache);
        self
    }

    /// Fetch and combine weights for `user_id`, without any deadline.
    ///
    /// # Returns
    /// * `Some(weights)` - Remote weights, adjusted by stickiness when cached
    /// * `None` - The remote service failed; the failure has been logged
    pub async fn fetch_weights(&self, user_id: &str) -> Option<Weights> {
        let mut weights = match self.source.fetch_weights(user_id).await {
            Ok(weights) => weights,
            Err(e) => {
                info!(user_id = %user_id, err = %e, "failed getting weights");
                return None;
            }
        };
        debug!("similarity {:?}", weights);

        if let Some(cache) = &self.stickiness {
            match cache.get_stickiness(user_id).await {
                Ok(Some(stickiness)) => {
                    info!(
                        user_id = %user_id,
                        score_length = stickiness.scores.len(),
                        "stickiness cache retrieved"
                    );
                    debug!("stickiness {:?}", stickiness.scores);
                    stickiness.apply_to(&mut weights);
                }
                Ok(None) => {}
                Err(e) => {
                    error!(user_id = %user_id, err = %e, "get user's recommend cache failed");
                }
            }
        }

        Some(weights)
    }

    /// Start fetching weights for `user_id` in the background.
    pub fn spawn(&self, user_id: impl Into<UserId>) -> PendingWeights {
        let supplier = self.clone();
        let user_id = user_id.into();
        let handle = tokio::spawn(async move { supplier.fetch_weights(&user_id).await });
        PendingWeights { handle }
    }
}

/// A weight fetch in flight.
pub struct PendingWeights {
    handle: JoinHandle<Option<Weights>>,
}

impl PendingWeights {
    /// Wait at most `timeout` for the weights.
    ///
    /// Returns `None` when the fetch failed, panicked, or missed the deadline.
    /// A fetch that misses the deadline keeps running detached.
    pub async fn wait(self, timeout: Duration) -> Option<Weights> {
        match tokio::time::timeout(timeout, self.handle).await {
            Ok(Ok(weights)) => weights,
            Ok(Err(e)) => {
                warn!("weight fetch task failed: {}", e);
                None
            }
            Err(_) => {
                debug!("timeout for getting weights");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use model::StickinessRecommendation;
    use recommender_client::RecommenderClientError;
    use store::{InMemoryStickinessCache, StoreError};

    struct FixedSource(Weights);

    #[async_trait]
    impl WeightSource for FixedSource {
        async fn fetch_weights(&self, _user_id: &str) -> Result<Weights, RecommenderClientError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl WeightSource for FailingSource {
        async fn fetch_weights(&self, _user_id: &str) -> Result<Weights, RecommenderClientError> {
            Err(RecommenderClientError::InvalidResponse("boom".to_string()))
        }
    }

    struct SlowSource(Duration);

    #[async_trait]
    impl WeightSource for SlowSource {
        async fn fetch_weights(&self, _user_id: &str) -> Result<Weights, RecommenderClientError> {
            tokio::time::sleep(self.0).await;
            Ok([("late".to_string(), 9.0)].into())
        }
    }

    struct BrokenCache;

    #[async_trait]
    impl StickinessCache for BrokenCache {
        async fn get_stickiness(
            &self,
            _user_id: &str,
        ) -> store::Result<Option<StickinessRecommendation>> {
            Err(StoreError::Decode {
                what: "stickiness record",
                source: serde_json::from_str::<u8>("nope").unwrap_err(),
            })
        }
    }

    fn weights(pairs: &[(&str, f64)]) -> Weights {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    async fn cache_with(user_id: &str, pairs: &[(&str, f64)]) -> Arc<InMemoryStickinessCache> {
        let cache = InMemoryStickinessCache::new();
        cache
            .insert(
                user_id,
                StickinessRecommendation {
                    scores: weights(pairs),
                    created_at: 0,
                },
            )
            .await;
        Arc::new(cache)
    }

    #[tokio::test]
    async fn test_remote_weights_pass_through_without_cache() {
        let supplier = WeightSupplier::new(Arc::new(FixedSource(weights(&[("a", 2.0)]))));

        assert_eq!(supplier.fetch_weights("u1").await, Some(weights(&[("a", 2.0)])));
    }

    #[tokio::test]
    async fn test_stickiness_multiplies_remote_weights() {
        let supplier = WeightSupplier::new(Arc::new(FixedSource(weights(&[("a", 2.0), ("b", 3.0)]))))
            .with_stickiness(cache_with("u1", &[("a", 0.5), ("only-cached", 7.0)]).await);

        let combined = supplier.fetch_weights("u1").await.unwrap();

        assert_eq!(combined, weights(&[("a", 1.0), ("b", 3.0)]));
    }

    #[tokio::test]
    async fn test_cache_miss_leaves_weights_unchanged() {
        let supplier = WeightSupplier::new(Arc::new(FixedSource(weights(&[("a", 2.0)]))))
            .with_stickiness(cache_with("someone-else", &[("a", 10.0)]).await);

        assert_eq!(supplier.fetch_weights("u1").await, Some(weights(&[("a", 2.0)])));
    }

    #[tokio::test]
    async fn test_cache_error_degrades_to_remote_weights() {
        let supplier = WeightSupplier::new(Arc::new(FixedSource(weights(&[("a", 2.0)]))))
            .with_stickiness(Arc::new(BrokenCache));

        assert_eq!(supplier.fetch_weights("u1").await, Some(weights(&[("a", 2.0)])));
    }

    #[tokio::test]
    async fn test_remote_failure_is_no_weights() {
        let supplier = WeightSupplier::new(Arc::new(FailingSource))
            .with_stickiness(cache_with("u1", &[("a", 10.0)]).await);

        assert_eq!(supplier.fetch_weights("u1").await, None);
    }

    #[tokio::test]
    async fn test_pending_weights_arrive_before_deadline() {
        let supplier = WeightSupplier::new(Arc::new(FixedSource(weights(&[("a", 2.0)]))));

        let pending = supplier.spawn("u1");
        let result = pending.wait(Duration::from_secs(5)).await;

        assert_eq!(result, Some(weights(&[("a", 2.0)])));
    }

    #[tokio::test]
    async fn test_pending_weights_time_out() {
        let supplier = WeightSupplier::new(Arc::new(SlowSource(Duration::from_secs(30))));

        let started = std::time::Instant::now();
        let result = supplier.spawn("u1").wait(Duration::from_millis(50)).await;

        assert_eq!(result, None);
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
