//! Backoff configuration loaded from environment variables.

use std::time::Duration;

/// Retry pacing for version-gated reads.
///
/// Reads from environment variables:
/// - `READ_REPO_BACKOFF_INITIAL_MS` — first retry interval (default: `10`)
/// - `READ_REPO_BACKOFF_MAX_MS` — cap on the retry interval (default: `1000`)
/// - `READ_REPO_BACKOFF_FACTOR` — growth factor per retry (default: `2.0`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackoffConfig {
    pub initial: Duration,
    pub max: Duration,
    pub factor: f64,
}

impl BackoffConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let millis = |key: &str| {
            lookup(key)
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_millis)
        };

        Self {
            initial: millis("READ_REPO_BACKOFF_INITIAL_MS").unwrap_or(defaults.initial),
            max: millis("READ_REPO_BACKOFF_MAX_MS").unwrap_or(defaults.max),
            factor: lookup("READ_REPO_BACKOFF_FACTOR")
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|f| f.is_finite())
                .unwrap_or(defaults.factor),
        }
    }
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(10),
            max: Duration::from_secs(1),
            factor: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = BackoffConfig::default();
        assert_eq!(config.initial, Duration::from_millis(10));
        assert_eq!(config.max, Duration::from_secs(1));
        assert_eq!(config.factor, 2.0);
    }

    #[test]
    fn test_lookup_overrides() {
        let config = BackoffConfig::from_lookup(lookup_from(&[
            ("READ_REPO_BACKOFF_INITIAL_MS", "5"),
            ("READ_REPO_BACKOFF_MAX_MS", "200"),
            ("READ_REPO_BACKOFF_FACTOR", "1.5"),
        ]));
        assert_eq!(config.initial, Duration::from_millis(5));
        assert_eq!(config.max, Duration::from_millis(200));
        assert_eq!(config.factor, 1.5);
    }

    #[test]
    fn test_invalid_values_fall_back_to_defaults() {
        let config = BackoffConfig::from_lookup(lookup_from(&[
            ("READ_REPO_BACKOFF_INITIAL_MS", "soon"),
            ("READ_REPO_BACKOFF_FACTOR", "NaN"),
        ]));
        assert_eq!(config, BackoffConfig::default());
    }
}
