//! Core repository trait for read models.

use async_trait::async_trait;

use crate::version::VersionRepo;
use crate::{ModelId, QueryContext, ReadModel, Result};

/// Storage contract for read models.
///
/// Implemented both by concrete stores and by decorators that wrap another
/// repository and add behavior. A decorator owns the repository it wraps
/// and exposes it through [`parent`](ReadRepository::parent), so a chain of
/// decorators always ends at exactly one concrete store.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait ReadRepository: Send + Sync {
    /// The read model type stored in this repository.
    type Model: ReadModel;

    /// Returns the model stored under `id`.
    ///
    /// Fails with `NotFound` if there is none.
    async fn find(&self, ctx: &QueryContext, id: ModelId) -> Result<Self::Model>;

    /// Returns every model in the context's namespace, in no particular order.
    async fn find_all(&self, ctx: &QueryContext) -> Result<Vec<Self::Model>>;

    /// Stores `model` under `id`, replacing any previous model.
    async fn save(&self, ctx: &QueryContext, id: ModelId, model: Self::Model) -> Result<()>;

    /// Removes the model stored under `id`.
    ///
    /// Fails with `NotFound` if there is none.
    async fn remove(&self, ctx: &QueryContext, id: ModelId) -> Result<()>;

    /// Returns the repository this one wraps, or `None` for a concrete store.
    fn parent(&self) -> Option<&dyn ReadRepository<Model = Self::Model>>;

    /// Returns this repository as a [`VersionRepo`] if it is one.
    ///
    /// Only `VersionRepo` overrides this. See
    /// [`locate_version_repo`](crate::locate_version_repo).
    fn as_version_repo(&self) -> Option<&VersionRepo<Self::Model>> {
        None
    }
}

// A boxed repository stands in for the repository it holds, so chains can
// be assembled from trait objects.
#[async_trait]
impl<R: ReadRepository + ?Sized> ReadRepository for Box<R> {
    type Model = R::Model;

    async fn find(&self, ctx: &QueryContext, id: ModelId) -> Result<Self::Model> {
        (**self).find(ctx, id).await
    }

    async fn find_all(&self, ctx: &QueryContext) -> Result<Vec<Self::Model>> {
        (**self).find_all(ctx).await
    }

    async fn save(&self, ctx: &QueryContext, id: ModelId, model: Self::Model) -> Result<()> {
        (**self).save(ctx, id, model).await
    }

    async fn remove(&self, ctx: &QueryContext, id: ModelId) -> Result<()> {
        (**self).remove(ctx, id).await
    }

    fn parent(&self) -> Option<&dyn ReadRepository<Model = Self::Model>> {
        (**self).parent()
    }

    fn as_version_repo(&self) -> Option<&VersionRepo<Self::Model>> {
        (**self).as_version_repo()
    }
}

/// Extension trait providing convenience methods for read repositories.
#[async_trait]
pub trait ReadRepositoryExt: ReadRepository {
    /// Returns the model stored under `id`, or `None` if there is none.
    async fn find_optional(&self, ctx: &QueryContext, id: ModelId) -> Result<Option<Self::Model>> {
        match self.find(ctx, id).await {
            Ok(model) => Ok(Some(model)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Checks if a model is stored under `id`.
    async fn exists(&self, ctx: &QueryContext, id: ModelId) -> Result<bool> {
        Ok(self.find_optional(ctx, id).await?.is_some())
    }
}

// Blanket implementation for all ReadRepository implementations
impl<T: ReadRepository + ?Sized> ReadRepositoryExt for T {}
