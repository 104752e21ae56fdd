//! The SDK entry point used by the feed backend.
//!
//! `RecommendStore` bundles the ranker with the event publisher so a service
//! holds one handle for both halves of the loop: ranking candidates for a
//! user, and reporting the user's interactions back so stickiness can be
//! recomputed.

use std::sync::Arc;

use anyhow::{Context, Result};
use model::RecommendEvent;
use recommender_client::RecommenderClient;
use store::{
    EventPublisher, PgBlacklistStore, RedisEventPublisher, RedisStickinessCache, StoreError,
    STICKINESS_TOPIC,
};
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::ranker::{Ranker, Recommender};
use crate::supplier::WeightSupplier;

/// Ranking plus interaction reporting.
#[derive(Clone)]
pub struct RecommendStore {
    ranker: Ranker,
    publisher: Option<Arc<dyn EventPublisher>>,
}

impl RecommendStore {
    pub fn new(ranker: Ranker, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            ranker,
            publisher: Some(publisher),
        }
    }

    /// A store that can rank but has no queue to publish to.
    pub fn without_publisher(ranker: Ranker) -> Self {
        Self {
            ranker,
            publisher: None,
        }
    }

    /// Build every collaborator from `settings`.
    ///
    /// # Arguments
    /// * `settings` - Deployment settings, usually from `Settings::from_env()`
    ///
    /// Redis backs both the stickiness cache and the event queue; without
    /// `REDIS_URL` neither is available. Without `DATABASE_URL` the blacklist
    /// is empty.
    pub async fn connect(settings: &Settings) -> Result<Self> {
        let client = RecommenderClient::new(
            &settings.recommender_url,
            settings.recommender_http_timeout,
        )
        .context("Failed to create recommender client")?;
        let mut supplier = WeightSupplier::new(Arc::new(client));

        let mut publisher: Option<Arc<dyn EventPublisher>> = None;
        match &settings.redis_url {
            Some(redis_url) => {
                let cache = RedisStickinessCache::connect(redis_url)
                    .await
                    .context("Failed to connect stickiness cache")?;
                supplier = supplier.with_stickiness(Arc::new(cache));

                let events = RedisEventPublisher::connect(redis_url)
                    .await
                    .context("Failed to connect event publisher")?;
                publisher = Some(Arc::new(events));
            }
            None => warn!("REDIS_URL not set, ranking without stickiness and events disabled"),
        }

        let mut ranker = Ranker::new(supplier, settings.ranker_config());
        match &settings.database_url {
            Some(database_url) => {
                let mut blacklist = PgBlacklistStore::connect(database_url)
                    .await
                    .context("Failed to connect blacklist store")?;
                if let Some(query) = &settings.blacklist_query {
                    blacklist = blacklist.with_query(query.clone());
                }
                ranker = ranker.with_blacklist(Arc::new(blacklist));
            }
            None => info!("DATABASE_URL not set, ranking without a blacklist"),
        }

        Ok(Self { ranker, publisher })
    }

    pub fn ranker(&self) -> &Ranker {
        &self.ranker
    }

    /// Start a ranking call for `user_id`; see [`Ranker::recommender`].
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn new_recommender(&self, user_id: impl Into<String>) -> Recommender {
        self.ranker.recommender(user_id)
    }

    /// Report that `user_id` interacted with `post_id`.
    ///
    /// # Errors
    /// Returns the publish failure: an unreported interaction is lost.
    pub async fn notify_stickiness(&self, user_id: &str, post_id: &str) -> Result<(), StoreError> {
        info!(
            user_id = %user_id,
            post_id = %post_id,
            "stickiness notified on user-post interaction event"
        );

        let Some(publisher) = &self.publisher else {
            error!(user_id = %user_id, post_id = %post_id, "send event failed: no publisher configured");
            return Err(StoreError::Publish {
                topic: STICKINESS_TOPIC.to_string(),
                reason: "no publisher configured".to_string(),
            });
        };

        let event = RecommendEvent::new(user_id, post_id);
        publisher.send(STICKINESS_TOPIC, &event).await.map_err(|e| {
            error!(err = %e, user_id = %user_id, post_id = %post_id, "send event failed");
            e
        })
    }
}
