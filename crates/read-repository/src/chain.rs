//! Lookup of decorators inside a repository chain.

use crate::{ReadRepository, VersionRepo};

/// Returns the version gate nearest to `repo` in its decorator chain.
///
/// Checks `repo` itself first, then follows [`ReadRepository::parent`]
/// links inward until a [`VersionRepo`] is found or the concrete store at
/// the root is reached. Returns `None` when `repo` is `None` or the chain
/// holds no version gate.
///
/// Lets code that only holds the outermost repository, such as a query
/// handler, adjust the gate without knowing how the chain was assembled.
pub fn locate_version_repo<R>(repo: Option<&R>) -> Option<&VersionRepo<R::Model>>
where
    R: ReadRepository + ?Sized,
{
    let repo = repo?;
    if let Some(found) = repo.as_version_repo() {
        return Some(found);
    }

    let mut current = repo.parent();
    while let Some(next) = current {
        if let Some(found) = next.as_version_repo() {
            return Some(found);
        }
        current = next.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{BackoffConfig, InMemoryReadRepository, InstrumentedRepo, ReadModel};

    #[derive(Debug, Clone)]
    struct Row;

    impl ReadModel for Row {}

    type DynRepo = Box<dyn ReadRepository<Model = Row>>;

    /// Builds `depth` instrumentation layers around a store, placing a
    /// version gate directly above layer `gate_at` when given.
    fn chain(depth: usize, gate_at: Option<usize>) -> DynRepo {
        let mut repo: DynRepo = Box::new(InMemoryReadRepository::<Row>::new());
        for layer in 0..=depth {
            if gate_at == Some(layer) {
                repo = Box::new(VersionRepo::new(repo));
            }
            if layer < depth {
                repo = Box::new(InstrumentedRepo::new("row", repo));
            }
        }
        repo
    }

    #[test]
    fn none_input_yields_none() {
        assert!(locate_version_repo::<InMemoryReadRepository<Row>>(None).is_none());
    }

    #[test]
    fn concrete_store_has_no_gate() {
        let store = InMemoryReadRepository::<Row>::new();
        assert!(locate_version_repo(Some(&store)).is_none());
    }

    #[test]
    fn gate_at_top_is_returned_directly() {
        let gate = VersionRepo::new(InMemoryReadRepository::<Row>::new());
        let found = locate_version_repo(Some(&gate)).unwrap();
        assert!(std::ptr::eq(found, &gate));
    }

    #[test]
    fn finds_gate_at_every_position_of_every_depth() {
        for depth in 0..6 {
            for gate_at in 0..=depth {
                let repo = chain(depth, Some(gate_at));
                assert!(
                    locate_version_repo(Some(repo.as_ref())).is_some(),
                    "depth {depth}, gate at {gate_at}"
                );
            }
        }
    }

    #[test]
    fn chains_without_gate_yield_none() {
        for depth in 0..6 {
            let repo = chain(depth, None);
            assert!(locate_version_repo(Some(repo.as_ref())).is_none(), "depth {depth}");
        }
    }

    #[tokio::test]
    async fn located_gate_can_be_reconfigured() {
        let gate = VersionRepo::new(InMemoryReadRepository::<Row>::new());
        let outer = InstrumentedRepo::new("outer", InstrumentedRepo::new("inner", gate));

        let config = BackoffConfig {
            initial: Duration::from_millis(2),
            max: Duration::from_millis(20),
            factor: 3.0,
        };
        locate_version_repo(Some(&outer))
            .unwrap()
            .set_backoff_config(config)
            .await;

        let found = locate_version_repo(Some(&outer)).unwrap();
        assert_eq!(found.backoff_config().await, config);
    }
}
