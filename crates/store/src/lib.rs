//! # Store Crate
//!
//! External collaborators of the ranking engine: the stickiness cache, the
//! blacklist store and the event queue.
//!
//! ## Components
//!
//! ### Stickiness cache
//! Per-user affinity records stored as JSON under `stickiness:{user_id}`:
//! - `RedisStickinessCache` reads and seeds records in Redis
//! - `InMemoryStickinessCache` serves the same contract from a map
//! - A missing key is `Ok(None)`, never an error
//!
//! ### Blacklist store
//! The set of user ids excluded from rule-based boosting:
//! - `PgBlacklistStore` runs a configurable SQL query through sqlx
//! - `StaticBlacklist` holds a fixed set
//!
//! ### Event publisher
//! User-post interactions are published to the `stickiness` topic:
//! - `RedisEventPublisher` appends them to a Redis stream with XADD
//!
//! ## Example Usage
//!
//! ```ignore
//! use store::{RedisStickinessCache, StickinessCache};
//!
//! let cache = RedisStickinessCache::connect("redis://localhost:6379").await?;
//! match cache.get_stickiness("user-1").await? {
//!     Some(record) => println!("{} cached scores", record.scores.len()),
//!     None => println!("no stickiness for user-1"),
//! }
//! ```

pub mod error;
pub mod cache;
pub mod blacklist;
pub mod events;

// Re-export commonly used types
pub use error::{Result, StoreError};
pub use cache::{stickiness_key, InMemoryStickinessCache, RedisStickinessCache, StickinessCache};
pub use blacklist::{BlacklistStore, PgBlacklistStore, StaticBlacklist, DEFAULT_BLACKLIST_QUERY};
pub use events::{EventPublisher, RedisEventPublisher, EVENT_FIELD};

/// Topic for interaction events and key prefix for cached stickiness records.
pub const STICKINESS_TOPIC: &str = "stickiness";
