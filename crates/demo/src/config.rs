//! Demo configuration loaded from environment variables.

use std::time::Duration;

use read_repository::BackoffConfig;

/// Demo configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `DEMO_PROJECTION_LAG_MS` — delay before the projector applies each event (default: `30`)
/// - `DEMO_QUERY_TIMEOUT_MS` — how long version-gated queries wait (default: `500`)
/// - `READ_REPO_BACKOFF_*` — see [`BackoffConfig`]
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub projection_lag: Duration,
    pub query_timeout: Duration,
    pub backoff: BackoffConfig,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let millis = |key: &str| {
            lookup(key)
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_millis)
        };

        Self {
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            projection_lag: millis("DEMO_PROJECTION_LAG_MS").unwrap_or(defaults.projection_lag),
            query_timeout: millis("DEMO_QUERY_TIMEOUT_MS").unwrap_or(defaults.query_timeout),
            backoff: BackoffConfig::from_lookup(&lookup),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            projection_lag: Duration::from_millis(30),
            query_timeout: Duration::from_millis(500),
            backoff: BackoffConfig::default(),
        }
    }
}
