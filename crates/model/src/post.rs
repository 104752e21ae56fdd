//! The concrete feed candidate.

use serde::{Deserialize, Serialize};

use crate::rankable::Rankable;
use crate::{PostId, UserId};

/// A post in the content feed.
///
/// Deserializes from the JSON shape the feed backend hands to the CLI.
/// Every counter defaults to zero so partial records are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,

    /// Author of the post; absent for imported or system posts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<UserId>,

    // Engagement counters
    #[serde(default)]
    pub upvote_count: u32,
    #[serde(default)]
    pub comment_count: u32,
    #[serde(default)]
    pub share_count: u32,
    #[serde(default)]
    pub favorite_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch_seconds: Option<u64>,

    /// Seconds since the Unix epoch
    pub created_at: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    #[serde(default)]
    pub is_anonymous: bool,

    /// Author's gender label as stored by the feed backend
    #[serde(default)]
    pub gender: String,
}

impl Post {
    /// Create a post with zeroed counters and no weight.
    pub fn new(id: impl Into<PostId>, created_at: i64) -> Self {
        Self {
            id: id.into(),
            author_id: None,
            upvote_count: 0,
            comment_count: 0,
            share_count: 0,
            favorite_count: 0,
            watch_seconds: None,
            created_at,
            weight: None,
            is_anonymous: false,
            gender: String::new(),
        }
    }
}

impl Rankable for Post {
    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> Option<&str> {
        self.author_id.as_deref()
    }

    fn upvote_count(&self) -> u32 {
        self.upvote_count
    }

    fn comment_count(&self) -> u32 {
        self.comment_count
    }

    fn share_count(&self) -> u32 {
        self.share_count
    }

    fn favorite_count(&self) -> u32 {
        self.favorite_count
    }

    fn watch_seconds(&self) -> Option<u64> {
        self.watch_seconds
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn weight(&self) -> Option<f64> {
        self.weight
    }

    fn set_weight(&mut self, weight: f64) {
        self.weight = Some(weight);
    }

    fn is_anonymous(&self) -> bool {
        self.is_anonymous
    }

    fn demographic(&self) -> &str {
        &self.gender
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_defaults_to_zero() {
        let post: Post =
            serde_json::from_str(r#"{"id": "p1", "created_at": 1700000000, "upvote_count": 4}"#)
                .unwrap();

        assert_eq!(post.upvote_count, 4);
        assert_eq!(post.comment_count, 0);
        assert_eq!(post.watch_seconds, None);
        assert_eq!(post.weight, None);
        assert!(!post.is_anonymous);
        assert_eq!(post.demographic(), "");
        assert_eq!(post.owner_id(), None);
    }

    #[test]
    fn test_owner_id_comes_from_author() {
        let post = Post {
            author_id: Some("user-9".to_string()),
            ..Post::new("p1", 0)
        };

        assert_eq!(post.owner_id(), Some("user-9"));
    }

    #[test]
    fn test_set_weight_replaces_slot() {
        let mut post = Post::new("p1", 0);
        post.set_weight(2.0);
        post.set_weight(5.0);

        assert_eq!(post.weight(), Some(5.0));
    }
}
