//! Request-scoped options for repository calls.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::Version;

/// Namespace used when a context doesn't name one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Per-call options passed to every repository operation.
///
/// Carries the namespace the call targets and, for reads, how fresh the
/// returned model must be and how long the caller is willing to wait for it.
///
/// ```
/// use std::time::Duration;
/// use read_repository::{QueryContext, Version};
///
/// let ctx = QueryContext::new()
///     .with_namespace("invitations")
///     .with_min_version(Version::new(3))
///     .with_timeout(Duration::from_millis(500));
/// assert!(ctx.deadline().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct QueryContext {
    namespace: String,
    min_version: Option<Version>,
    deadline: Option<Instant>,
    cancellation: CancellationToken,
}

impl QueryContext {
    /// Creates a context in the default namespace with no version
    /// requirement, no deadline, and a token that is never cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Targets the given namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Requires returned models to be at least at `version`.
    pub fn with_min_version(mut self, version: Version) -> Self {
        self.min_version = Some(version);
        self
    }

    /// Sets an absolute deadline for the call.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets a deadline `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Lets the caller abort the call through `token`.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn min_version(&self) -> Option<Version> {
        self.min_version
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }
}

impl Default for QueryContext {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            min_version: None,
            deadline: None,
            cancellation: CancellationToken::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_has_no_requirements() {
        let ctx = QueryContext::new();
        assert_eq!(ctx.namespace(), DEFAULT_NAMESPACE);
        assert!(ctx.min_version().is_none());
        assert!(ctx.deadline().is_none());
        assert!(!ctx.cancellation().is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_sets_deadline_relative_to_now() {
        let now = Instant::now();
        let ctx = QueryContext::new().with_timeout(Duration::from_millis(50));
        assert_eq!(ctx.deadline(), Some(now + Duration::from_millis(50)));
    }

    #[test]
    fn cancellation_token_is_shared_with_caller() {
        let token = CancellationToken::new();
        let ctx = QueryContext::new().with_cancellation(token.clone());
        token.cancel();
        assert!(ctx.cancellation().is_cancelled());
    }

    #[test]
    fn builder_sets_namespace_and_min_version() {
        let ctx = QueryContext::new()
            .with_namespace("guest_lists")
            .with_min_version(Version::new(4));
        assert_eq!(ctx.namespace(), "guest_lists");
        assert_eq!(ctx.min_version(), Some(Version::new(4)));
    }
}
