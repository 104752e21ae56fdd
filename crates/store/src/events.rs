//! Event publishing.

use async_trait::async_trait;
use model::RecommendEvent;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::{debug, info};

use crate::error::{Result, StoreError};

/// Publisher of interaction events to a message queue.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish `event` to `topic`.
    ///
    /// # Errors
    /// Returns an error if the queue did not accept the event. Callers must
    /// surface it: a dropped event breaks at-least-once delivery.
    async fn send(&self, topic: &str, event: &RecommendEvent) -> Result<()>;
}

/// Field holding the JSON event in each stream entry.
pub const EVENT_FIELD: &str = "payload";

/// Publisher backed by Redis Streams.
///
/// Each event is appended with `XADD <topic> * payload <json>`, so it stays in
/// the stream until a consumer group acknowledges it. A successful `send`
/// means Redis has stored the entry.
#[derive(Clone)]
pub struct RedisEventPublisher {
    manager: ConnectionManager,
}

impl RedisEventPublisher {
    /// Connect to Redis at `redis_url`.
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;
        info!("Connected event publisher to Redis");
        Ok(Self::new(manager))
    }

    pub fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl EventPublisher for RedisEventPublisher {
    async fn send(&self, topic: &str, event: &RecommendEvent) -> Result<()> {
        let payload = encode_event(event)?;

        let mut conn = self.manager.clone();
        let entry_id: String = conn
            .xadd(topic, "*", &[(EVENT_FIELD, payload)])
            .await
            .map_err(|e| StoreError::Publish {
                topic: topic.to_string(),
                reason: e.to_string(),
            })?;

        debug!(
            topic = %topic,
            user_id = %event.user_id,
            post_id = %event.post_id,
            entry_id = %entry_id,
            "event appended to stream"
        );
        Ok(())
    }
}

fn encode_event(event: &RecommendEvent) -> Result<String> {
    serde_json::to_string(event).map_err(|source| StoreError::Encode {
        what: "recommend event",
        source,
    })
}
