//! Read model trait for values stored in repositories.

use crate::Version;

/// A value stored in a read repository.
///
/// Read models are the query-side data structures in CQRS. They are written
/// by projections and read through a [`ReadRepository`](crate::ReadRepository).
///
/// A model that tracks how many events produced it reports that count from
/// [`version`](ReadModel::version). Models that don't keep the default,
/// which returns `None`; a [`VersionRepo`](crate::VersionRepo) rejects
/// minimum-version reads of such models with
/// [`RepoError::ModelHasNoVersion`](crate::RepoError::ModelHasNoVersion).
pub trait ReadModel: Clone + Send + Sync + 'static {
    /// Returns the model's version, if it carries one.
    fn version(&self) -> Option<Version> {
        None
    }
}
