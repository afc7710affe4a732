//! Exponential backoff for retried reads.

use std::time::Duration;

use crate::BackoffConfig;

/// Shortest interval a sequence starts from.
pub const MIN_INITIAL_DELAY: Duration = Duration::from_millis(1);

/// Per-call retry interval sequence.
///
/// The n-th call to [`next_delay`](Backoff::next_delay) returns
/// `initial * factor^n`, clamped to `[initial, max]`. Each gated read owns
/// its own `Backoff`; nothing is shared between concurrent reads.
#[derive(Debug, Clone)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    factor: f64,
    attempt: u32,
}

impl Backoff {
    /// Creates a backoff sequence from `config`.
    ///
    /// Factors below 1.0 are treated as 1.0 and a cap below the initial
    /// interval is raised to it, so the sequence never shrinks. The initial
    /// interval is at least [`MIN_INITIAL_DELAY`].
    pub fn new(config: BackoffConfig) -> Self {
        let initial = config.initial.max(MIN_INITIAL_DELAY);
        Self {
            initial,
            max: config.max.max(initial),
            factor: if config.factor.is_finite() {
                config.factor.max(1.0)
            } else {
                1.0
            },
            attempt: 0,
        }
    }

    /// Returns the next interval to wait and advances the sequence.
    pub fn next_delay(&mut self) -> Duration {
        let exponent = self.attempt.min(i32::MAX as u32) as i32;
        let scaled = self.initial.as_secs_f64() * self.factor.powi(exponent);
        self.attempt = self.attempt.saturating_add(1);

        if !scaled.is_finite() || scaled >= self.max.as_secs_f64() {
            return self.max;
        }
        Duration::from_secs_f64(scaled).max(self.initial)
    }

    /// Returns how many intervals have been handed out.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Restarts the sequence at the initial interval.
    pub fn reset(&mut self) {
        self.attempt = 0;
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(BackoffConfig::default())
    }
}
