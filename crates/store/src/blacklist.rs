//! Blacklist store.
//!
//! The blacklist is re-read on every ranking call, so implementations should
//! be cheap to query and must not cache across calls themselves.

use std::collections::HashSet;

use async_trait::async_trait;
use model::UserId;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

use crate::error::Result;

/// Query used when no override is configured. Ids are cast to text so uuid
/// and varchar columns both decode.
pub const DEFAULT_BLACKLIST_QUERY: &str = "SELECT user_id::text FROM recommend_blacklist";

/// Source of the ids excluded from rule-based boosting.
#[async_trait]
pub trait BlacklistStore: Send + Sync {
    async fn blacklist(&self) -> Result<HashSet<UserId>>;
}

/// Blacklist read from Postgres.
#[derive(Clone)]
pub struct PgBlacklistStore {
    pool: PgPool,
    query: String,
}

impl PgBlacklistStore {
    /// Connect a small pool to `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .connect(database_url)
            .await?;
        info!("Connected blacklist store to Postgres");
        Ok(Self::new(pool))
    }

    /// Wrap an existing pool, using the default query.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            query: DEFAULT_BLACKLIST_QUERY.to_string(),
        }
    }

    /// Replace the query (builder pattern).
    ///
    /// The query must return a single text column of ids.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

#[async_trait]
impl BlacklistStore for PgBlacklistStore {
    async fn blacklist(&self) -> Result<HashSet<UserId>> {
        let ids: Vec<String> = sqlx::query_scalar(&self.query)
            .fetch_all(&self.pool)
            .await?;

        debug!("Loaded {} blacklisted ids", ids.len());
        Ok(ids.into_iter().collect())
    }
}

/// A fixed blacklist.
#[derive(Debug, Clone, Default)]
pub struct StaticBlacklist {
    ids: HashSet<UserId>,
}

impl StaticBlacklist {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<UserId>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl BlacklistStore for StaticBlacklist {
    async fn blacklist(&self) -> Result<HashSet<UserId>> {
        Ok(self.ids.clone())
    }
}
