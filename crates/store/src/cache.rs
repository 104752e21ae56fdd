//! Stickiness cache access.

use std::collections::HashMap;

use async_trait::async_trait;
use model::{StickinessRecommendation, UserId};
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::STICKINESS_TOPIC;

/// Cache key of a user's stickiness record.
pub fn stickiness_key(user_id: &str) -> String {
    format!("{}:{}", STICKINESS_TOPIC, user_id)
}

/// Read access to cached stickiness records.
#[async_trait]
pub trait StickinessCache: Send + Sync {
    /// Look up the record for `user_id`.
    ///
    /// # Returns
    /// * `Ok(Some(record))` - A record is cached
    /// * `Ok(None)` - Nothing is cached for this user
    /// * `Err` - The cache failed or held an undecodable value
    async fn get_stickiness(&self, user_id: &str) -> Result<Option<StickinessRecommendation>>;
}

/// Stickiness cache backed by Redis.
///
/// Records are JSON strings under `stickiness:{user_id}`.
#[derive(Clone)]
pub struct RedisStickinessCache {
    manager: ConnectionManager,
}

impl RedisStickinessCache {
    /// Connect to Redis at `redis_url`.
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;
        info!("Connected stickiness cache to Redis");
        Ok(Self::new(manager))
    }

    /// Wrap an existing connection manager.
    pub fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }

    /// Store a record, optionally expiring after `ttl_secs`.
    pub async fn put_stickiness(
        &self,
        user_id: &str,
        record: &StickinessRecommendation,
        ttl_secs: Option<u64>,
    ) -> Result<()> {
        let payload = serde_json::to_string(record).map_err(|source| StoreError::Encode {
            what: "stickiness record",
            source,
        })?;

        let mut conn = self.manager.clone();
        let mut cmd = redis::cmd("SET");
        cmd.arg(stickiness_key(user_id)).arg(payload);
        if let Some(ttl) = ttl_secs {
            cmd.arg("EX").arg(ttl);
        }
        cmd.query_async::<_, ()>(&mut conn).await?;

        debug!(user_id = %user_id, scores = record.scores.len(), "stickiness record stored");
        Ok(())
    }
}

#[async_trait]
impl StickinessCache for RedisStickinessCache {
    async fn get_stickiness(&self, user_id: &str) -> Result<Option<StickinessRecommendation>> {
        let mut conn = self.manager.clone();
        let raw: Option<String> = conn.get(stickiness_key(user_id)).await?;

        raw.map(|json| {
            serde_json::from_str(&json).map_err(|source| StoreError::Decode {
                what: "stickiness record",
                source,
            })
        })
        .transpose()
    }
}

/// Stickiness cache held in process memory.
///
/// Used when no Redis is configured and as a test double.
#[derive(Default)]
pub struct InMemoryStickinessCache {
    records: RwLock<HashMap<UserId, StickinessRecommendation>>,
}

impl InMemoryStickinessCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user_id: impl Into<UserId>, record: StickinessRecommendation) {
        self.records.write().await.insert(user_id.into(), record);
    }
}

#[async_trait]
impl StickinessCache for InMemoryStickinessCache {
    async fn get_stickiness(&self, user_id: &str) -> Result<Option<StickinessRecommendation>> {
        Ok(self.records.read().await.get(user_id).cloned())
    }
}
