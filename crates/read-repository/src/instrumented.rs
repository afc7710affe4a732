//! Tracing and metrics decorator for read repositories.

use async_trait::async_trait;

use crate::{ModelId, QueryContext, ReadModel, ReadRepository, Result};

/// Decorator that records a span and metrics for every repository call.
///
/// Increments `read_repository_operations` for each call and
/// `read_repository_errors` for each failed one, both labelled with the
/// repository name and operation. Results are returned unchanged.
pub struct InstrumentedRepo<M: ReadModel> {
    name: &'static str,
    inner: Box<dyn ReadRepository<Model = M>>,
}

impl<M: ReadModel> InstrumentedRepo<M> {
    /// Wraps `inner`, labelling its spans and metrics with `name`.
    pub fn new(name: &'static str, inner: impl ReadRepository<Model = M> + 'static) -> Self {
        Self {
            name,
            inner: Box::new(inner),
        }
    }

    /// Returns the label used for spans and metrics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn record<T>(&self, operation: &'static str, result: &Result<T>) {
        metrics::counter!(
            "read_repository_operations",
            "repository" => self.name,
            "operation" => operation
        )
        .increment(1);

        if let Err(err) = result {
            metrics::counter!(
                "read_repository_errors",
                "repository" => self.name,
                "operation" => operation
            )
            .increment(1);
            tracing::debug!(repository = self.name, operation, error = %err, "repository call failed");
        }
    }
}

#[async_trait]
impl<M: ReadModel> ReadRepository for InstrumentedRepo<M> {
    type Model = M;

    #[tracing::instrument(skip(self, ctx), fields(repository = self.name, namespace = %ctx.namespace()))]
    async fn find(&self, ctx: &QueryContext, id: ModelId) -> Result<M> {
        let result = self.inner.find(ctx, id).await;
        self.record("find", &result);
        result
    }

    #[tracing::instrument(skip(self, ctx), fields(repository = self.name, namespace = %ctx.namespace()))]
    async fn find_all(&self, ctx: &QueryContext) -> Result<Vec<M>> {
        let result = self.inner.find_all(ctx).await;
        self.record("find_all", &result);
        if let Ok(models) = &result {
            tracing::trace!(count = models.len(), "listed read models");
        }
        result
    }

    #[tracing::instrument(skip(self, ctx, model), fields(repository = self.name, namespace = %ctx.namespace()))]
    async fn save(&self, ctx: &QueryContext, id: ModelId, model: M) -> Result<()> {
        let result = self.inner.save(ctx, id, model).await;
        self.record("save", &result);
        result
    }

    #[tracing::instrument(skip(self, ctx), fields(repository = self.name, namespace = %ctx.namespace()))]
    async fn remove(&self, ctx: &QueryContext, id: ModelId) -> Result<()> {
        let result = self.inner.remove(ctx, id).await;
        self.record("remove", &result);
        result
    }

    fn parent(&self) -> Option<&dyn ReadRepository<Model = M>> {
        Some(self.inner.as_ref())
    }
}
