//! Demo error types.

use read_repository::{ModelId, RepoError};
use thiserror::Error;

/// Errors that can occur while projecting invitation events.
#[derive(Debug, Error)]
pub enum DemoError {
    /// An error occurred in the read repository.
    #[error("Repository error: {0}")]
    Repository(#[from] RepoError),

    /// An event referred to an invitation that was never created.
    #[error("Unknown invitation: {0}")]
    UnknownInvitation(ModelId),
}

/// Result type for demo operations.
pub type Result<T> = std::result::Result<T, DemoError>;
