//! # Model Crate
//!
//! Domain types shared by every other crate in the workspace.
//!
//! ## Main Components
//!
//! - **rankable**: The `Rankable` capability trait the ranking engine is generic over
//! - **post**: `Post`, the concrete feed candidate used by the CLI and tests
//! - **stickiness**: Cached per-user affinity record and the interaction event
//!
//! ## Example Usage
//!
//! ```ignore
//! use model::{Post, Rankable};
//!
//! let mut post = Post::new("post-1", 1_700_000_000);
//! post.upvote_count = 12;
//! post.set_weight(1.5);
//!
//! assert_eq!(post.weight(), Some(1.5));
//! ```

pub mod rankable;
pub mod post;
pub mod stickiness;

use std::collections::HashMap;

// Re-export commonly used types for convenience
pub use rankable::Rankable;
pub use post::Post;
pub use stickiness::{RecommendEvent, StickinessRecommendation};

/// Identifier of a user of the feed (opaque string, usually a UUID)
pub type UserId = String;

/// Identifier of a candidate post
pub type PostId = String;

/// Per-request mapping from candidate id to weight multiplier.
pub type Weights = HashMap<PostId, f64>;
