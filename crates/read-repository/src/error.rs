//! Repository error types.

use thiserror::Error;

use crate::{ModelId, Version};

/// Errors that can occur when reading or writing read models.
#[derive(Debug, Error)]
pub enum RepoError {
    /// No model is stored under the identifier.
    #[error("Model not found: {id} in namespace {namespace}")]
    NotFound { namespace: String, id: ModelId },

    /// The model does not carry a version, so a minimum version can never be satisfied.
    #[error("Model has no version: {id} in namespace {namespace}")]
    ModelHasNoVersion { namespace: String, id: ModelId },

    /// The model exists but is older than the requested version.
    #[error(
        "Incorrect model version for {id} in namespace {namespace}: required at least {required}, found {actual}"
    )]
    IncorrectVersion {
        namespace: String,
        id: ModelId,
        required: Version,
        actual: Version,
    },

    /// The query was cancelled while waiting for a newer version.
    #[error("Query cancelled")]
    Cancelled,

    /// The query deadline passed while waiting for a newer version.
    #[error("Query deadline exceeded")]
    DeadlineExceeded,

    /// The underlying store failed.
    #[error("Storage error: {0}")]
    Internal(String),
}

impl RepoError {
    /// Returns true for conditions a later read may resolve: the model not
    /// existing yet, or existing at an older version.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RepoError::NotFound { .. } | RepoError::IncorrectVersion { .. }
        )
    }

    /// Returns true if this is a `NotFound` error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepoError::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_and_stale_models_are_retryable() {
        let id = ModelId::new();
        let namespace = "default".to_string();

        assert!(
            RepoError::NotFound {
                namespace: namespace.clone(),
                id
            }
            .is_retryable()
        );
        assert!(
            RepoError::IncorrectVersion {
                namespace: namespace.clone(),
                id,
                required: Version::new(3),
                actual: Version::new(2),
            }
            .is_retryable()
        );
        assert!(!RepoError::ModelHasNoVersion { namespace, id }.is_retryable());
        assert!(!RepoError::Cancelled.is_retryable());
        assert!(!RepoError::DeadlineExceeded.is_retryable());
        assert!(!RepoError::Internal("disk full".to_string()).is_retryable());
    }

    #[test]
    fn incorrect_version_message_names_both_versions() {
        let err = RepoError::IncorrectVersion {
            namespace: "orders".to_string(),
            id: ModelId::new(),
            required: Version::new(5),
            actual: Version::new(2),
        };
        let message = err.to_string();
        assert!(message.contains("required at least 5"));
        assert!(message.contains("found 2"));
        assert!(message.contains("orders"));
    }
}
