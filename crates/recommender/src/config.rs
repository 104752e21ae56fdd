//! Configuration for the ranker and its collaborators.

use std::env;
use std::time::Duration;

use scoring::ScoringConfig;
use thiserror::Error;

/// How long the ranker waits for remote weights before ranking without them.
pub const DEFAULT_WEIGHT_TIMEOUT: Duration = Duration::from_secs(2);

/// Transport bound for a weight request, including one nobody waits for anymore.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_RECOMMENDER_URL: &str = "http://localhost:8080";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Per-ranker tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct RankerConfig {
    pub scoring: ScoringConfig,
    pub weight_timeout: Duration,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            weight_timeout: DEFAULT_WEIGHT_TIMEOUT,
        }
    }
}

/// Deployment settings, read from the environment.
///
/// | variable                        | default                   |
/// |---------------------------------|---------------------------|
/// | `RECOMMENDER_URL`               | `http://localhost:8080`   |
/// | `RECOMMENDER_HTTP_TIMEOUT_SECS` | `10`                      |
/// | `WEIGHT_TIMEOUT_MS`             | `2000`                    |
/// | `REDIS_URL`                     | unset (no cache, no queue)|
/// | `DATABASE_URL`                  | unset (empty blacklist)   |
/// | `BLACKLIST_QUERY`               | built-in query            |
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub recommender_url: String,
    pub recommender_http_timeout: Duration,
    pub weight_timeout: Duration,
    pub redis_url: Option<String>,
    pub database_url: Option<String>,
    pub blacklist_query: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            recommender_url: DEFAULT_RECOMMENDER_URL.to_string(),
            recommender_http_timeout: DEFAULT_HTTP_TIMEOUT,
            weight_timeout: DEFAULT_WEIGHT_TIMEOUT,
            redis_url: None,
            database_url: None,
            blacklist_query: None,
        }
    }
}

impl Settings {
    /// Read settings from the process environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Read settings through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        Ok(Self {
            recommender_url: non_empty("RECOMMENDER_URL").unwrap_or(defaults.recommender_url),
            recommender_http_timeout: match non_empty("RECOMMENDER_HTTP_TIMEOUT_SECS") {
                Some(value) => Duration::from_secs(parse("RECOMMENDER_HTTP_TIMEOUT_SECS", value)?),
                None => defaults.recommender_http_timeout,
            },
            weight_timeout: match non_empty("WEIGHT_TIMEOUT_MS") {
                Some(value) => Duration::from_millis(parse("WEIGHT_TIMEOUT_MS", value)?),
                None => defaults.weight_timeout,
            },
            redis_url: non_empty("REDIS_URL"),
            database_url: non_empty("DATABASE_URL"),
            blacklist_query: non_empty("BLACKLIST_QUERY"),
        })
    }

    /// Ranker config with production scoring constants and this weight timeout.
    pub fn ranker_config(&self) -> RankerConfig {
        RankerConfig {
            scoring: ScoringConfig::default(),
            weight_timeout: self.weight_timeout,
        }
    }
}

fn parse(var: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
            var,
            value,
            reason: e.to_string(),
        })
}
