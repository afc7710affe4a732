use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{ModelId, QueryContext, ReadModel, ReadRepository, RepoError, Result};

/// In-memory read repository.
///
/// Keeps one collection per namespace. Cloning yields another handle to the
/// same storage, so a projector and a query side can share it.
#[derive(Clone)]
pub struct InMemoryReadRepository<M> {
    namespaces: Arc<RwLock<HashMap<String, HashMap<ModelId, M>>>>,
}

impl<M: ReadModel> InMemoryReadRepository<M> {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self {
            namespaces: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of models stored in the context's namespace.
    pub async fn count(&self, ctx: &QueryContext) -> usize {
        self.namespaces
            .read()
            .await
            .get(ctx.namespace())
            .map_or(0, HashMap::len)
    }

    /// Returns the models in the context's namespace that match `filter`.
    pub async fn find_custom(
        &self,
        ctx: &QueryContext,
        filter: impl Fn(&M) -> bool,
    ) -> Result<Vec<M>> {
        let namespaces = self.namespaces.read().await;
        let models = namespaces
            .get(ctx.namespace())
            .map(|models| models.values().filter(|m| filter(m)).cloned().collect())
            .unwrap_or_default();
        Ok(models)
    }

    /// Removes all models from all namespaces.
    pub async fn clear(&self) {
        self.namespaces.write().await.clear();
    }
}

impl<M: ReadModel> Default for InMemoryReadRepository<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<M: ReadModel> ReadRepository for InMemoryReadRepository<M> {
    type Model = M;

    async fn find(&self, ctx: &QueryContext, id: ModelId) -> Result<M> {
        self.namespaces
            .read()
            .await
            .get(ctx.namespace())
            .and_then(|models| models.get(&id))
            .cloned()
            .ok_or_else(|| RepoError::NotFound {
                namespace: ctx.namespace().to_string(),
                id,
            })
    }

    async fn find_all(&self, ctx: &QueryContext) -> Result<Vec<M>> {
        let namespaces = self.namespaces.read().await;
        let models = namespaces
            .get(ctx.namespace())
            .map(|models| models.values().cloned().collect())
            .unwrap_or_default();
        Ok(models)
    }

    async fn save(&self, ctx: &QueryContext, id: ModelId, model: M) -> Result<()> {
        self.namespaces
            .write()
            .await
            .entry(ctx.namespace().to_string())
            .or_default()
            .insert(id, model);
        Ok(())
    }

    async fn remove(&self, ctx: &QueryContext, id: ModelId) -> Result<()> {
        let mut namespaces = self.namespaces.write().await;
        namespaces
            .get_mut(ctx.namespace())
            .and_then(|models| models.remove(&id))
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound {
                namespace: ctx.namespace().to_string(),
                id,
            })
    }

    fn parent(&self) -> Option<&dyn ReadRepository<Model = M>> {
        None
    }
}
