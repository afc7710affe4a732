//! Version-gated reads for eventually consistent read models.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    Backoff, BackoffConfig, ModelId, QueryContext, ReadModel, ReadRepository, RepoError, Result,
    Version,
};

/// Decorator that makes `find` honor the context's minimum version.
///
/// Projections update read models some time after the events that drive
/// them are written. A caller that has just issued a command and knows the
/// resulting version can ask for at least that version through
/// [`QueryContext::with_min_version`]:
///
/// - Without a deadline on the context, one read is made and a missing or
///   stale model is reported as `NotFound` / `IncorrectVersion`.
/// - With a deadline, the read is retried with exponential backoff until
///   the model catches up, the deadline passes (`DeadlineExceeded`), or the
///   context's token is cancelled (`Cancelled`).
///
/// Models without a version fail with `ModelHasNoVersion` on the first
/// read. Other errors from the wrapped repository are returned unretried.
/// Reads without a minimum version, and all writes, pass straight through.
pub struct VersionRepo<M: ReadModel> {
    inner: Box<dyn ReadRepository<Model = M>>,
    backoff: RwLock<BackoffConfig>,
}

impl<M: ReadModel> VersionRepo<M> {
    /// Wraps `inner` using the default backoff configuration.
    pub fn new(inner: impl ReadRepository<Model = M> + 'static) -> Self {
        Self::with_backoff(inner, BackoffConfig::default())
    }

    /// Wraps `inner`, pacing retries according to `config`.
    pub fn with_backoff(
        inner: impl ReadRepository<Model = M> + 'static,
        config: BackoffConfig,
    ) -> Self {
        Self {
            inner: Box::new(inner),
            backoff: RwLock::new(config),
        }
    }

    /// Returns the backoff configuration used by subsequent reads.
    pub async fn backoff_config(&self) -> BackoffConfig {
        *self.backoff.read().await
    }

    /// Replaces the backoff configuration. Reads already waiting keep the
    /// configuration they started with.
    pub async fn set_backoff_config(&self, config: BackoffConfig) {
        *self.backoff.write().await = config;
    }

    /// Reads the model once and checks it against `min_version`.
    async fn find_min_version(
        &self,
        ctx: &QueryContext,
        id: ModelId,
        min_version: Version,
    ) -> Result<M> {
        let model = self.inner.find(ctx, id).await?;

        let Some(version) = model.version() else {
            return Err(RepoError::ModelHasNoVersion {
                namespace: ctx.namespace().to_string(),
                id,
            });
        };

        if version < min_version {
            return Err(RepoError::IncorrectVersion {
                namespace: ctx.namespace().to_string(),
                id,
                required: min_version,
                actual: version,
            });
        }

        Ok(model)
    }
}

#[async_trait]
impl<M: ReadModel> ReadRepository for VersionRepo<M> {
    type Model = M;

    #[tracing::instrument(skip(self, ctx), fields(namespace = %ctx.namespace()))]
    async fn find(&self, ctx: &QueryContext, id: ModelId) -> Result<M> {
        let min_version = match ctx.min_version() {
            Some(version) if version >= Version::first() => version,
            _ => return self.inner.find(ctx, id).await,
        };

        let deadline = ctx.deadline();
        let mut backoff = Backoff::new(self.backoff_config().await);

        loop {
            let err = match self.find_min_version(ctx, id, min_version).await {
                Ok(model) => {
                    metrics::counter!("read_repository_version_checks", "outcome" => "satisfied")
                        .increment(1);
                    return Ok(model);
                }
                Err(err) if err.is_retryable() => err,
                Err(err) => {
                    metrics::counter!("read_repository_version_checks", "outcome" => "failed")
                        .increment(1);
                    return Err(err);
                }
            };

            // Without a deadline the caller gets a single best-effort read.
            let Some(deadline) = deadline else {
                metrics::counter!("read_repository_version_checks", "outcome" => "stale")
                    .increment(1);
                return Err(err);
            };

            let delay = backoff.next_delay();
            tracing::debug!(
                %min_version,
                attempt = backoff.attempt(),
                delay_ms = delay.as_millis() as u64,
                reason = %err,
                "read model behind requested version, retrying"
            );
            metrics::counter!("read_repository_version_retries").increment(1);

            tokio::select! {
                biased;
                () = ctx.cancellation().cancelled() => {
                    tracing::debug!(%min_version, "version wait cancelled");
                    metrics::counter!("read_repository_version_checks", "outcome" => "cancelled")
                        .increment(1);
                    return Err(RepoError::Cancelled);
                }
                () = tokio::time::sleep_until(deadline) => {
                    tracing::debug!(%min_version, "version wait hit deadline");
                    metrics::counter!("read_repository_version_checks", "outcome" => "deadline")
                        .increment(1);
                    return Err(RepoError::DeadlineExceeded);
                }
                () = tokio::time::sleep(delay) => {}
            }
        }
    }

    async fn find_all(&self, ctx: &QueryContext) -> Result<Vec<M>> {
        self.inner.find_all(ctx).await
    }

    async fn save(&self, ctx: &QueryContext, id: ModelId, model: M) -> Result<()> {
        self.inner.save(ctx, id, model).await
    }

    async fn remove(&self, ctx: &QueryContext, id: ModelId) -> Result<()> {
        self.inner.remove(ctx, id).await
    }

    fn parent(&self) -> Option<&dyn ReadRepository<Model = M>> {
        Some(self.inner.as_ref())
    }

    fn as_version_repo(&self) -> Option<&VersionRepo<M>> {
        Some(self)
    }
}
