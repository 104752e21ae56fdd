//! Error types for the store crate.

use thiserror::Error;

/// Errors raised by the external stores.
///
/// A cache miss is not represented here: lookups return `Ok(None)` for it.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Redis command or connection failure
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// A stored record could not be decoded
    #[error("Failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded before writing or publishing
    #[error("Failed to encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// SQL query or pool failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The message queue rejected an event
    #[error("Failed to publish to {topic}: {reason}")]
    Publish { topic: String, reason: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, StoreError>;
