//! Client for the remote recommendation scoring service.
//!
//! This crate provides a Rust client to fetch per-post weight multipliers
//! for a user over HTTP. It handles:
//! - Building the request URL for a user
//! - Bounding every request with a transport-level timeout
//! - Decoding the JSON weight map
//! - Mapping transport, status and decode failures to typed errors
//!
//! The `WeightSource` trait is the seam the ranker depends on, so tests and
//! alternative backends can supply weights without HTTP.

use std::time::Duration;

use async_trait::async_trait;
use model::Weights;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when interacting with the recommendation service
#[derive(Error, Debug)]
pub enum RecommenderClientError {
    #[error("Invalid recommender base URL: {0}")]
    InvalidUrl(String),

    #[error("Request to recommender failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Recommender responded with unexpected status code {0}")]
    UnexpectedStatus(StatusCode),

    #[error("Invalid response from recommender: {0}")]
    InvalidResponse(String),
}

/// Anything that can produce a weight map for a user.
#[async_trait]
pub trait WeightSource: Send + Sync {
    /// Fetch the weight map for `user_id`.
    async fn fetch_weights(&self, user_id: &str) -> Result<Weights, RecommenderClientError>;
}

/// HTTP client for the recommendation service.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct RecommenderClient {
    client: Client,
    base_url: Url,
}

impl RecommenderClient {
    /// Create a client for the service at `base_url`.
    ///
    /// # Arguments
    /// * `base_url` - Root of the service (e.g., "http://localhost:8080")
    /// * `timeout` - Upper bound for a whole request, including a request
    ///   the ranker has stopped waiting for
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RecommenderClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| RecommenderClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(RecommenderClientError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;
        info!("Recommender client configured for {}", base_url);

        Ok(Self { client, base_url })
    }

    /// URL of the recommendations endpoint for a user.
    pub fn recommendations_url(&self, user_id: &str) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new(), so path segments are available
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("recommendations").push(user_id);
        }
        url
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl WeightSource for RecommenderClient {
    async fn fetch_weights(&self, user_id: &str) -> Result<Weights, RecommenderClientError> {
        let url = self.recommendations_url(user_id);
        debug!("Fetching weights from {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            info!(
                status_code = %status,
                "recommender responded with unexpected status code"
            );
            return Err(RecommenderClientError::UnexpectedStatus(status));
        }

        let body = response.bytes().await?;
        let weights: Weights = serde_json::from_slice(&body)
            .map_err(|e| RecommenderClientError::InvalidResponse(e.to_string()))?;

        debug!("Received {} weights for user {}", weights.len(), user_id);
        Ok(weights)
    }
}
