//! Read model repositories for the CQRS query side.
//!
//! This crate provides:
//! - [`ReadRepository`] trait, the storage contract shared by concrete stores and decorators
//! - [`ReadModel`] trait, through which a model may report its [`Version`]
//! - [`VersionRepo`], a decorator that makes `find` wait for a minimum model version
//! - [`locate_version_repo`] for finding the version gate inside a decorator chain
//! - [`InstrumentedRepo`], a decorator recording tracing spans and metrics
//! - [`InMemoryReadRepository`], a namespaced in-memory store

pub mod backoff;
pub mod chain;
pub mod config;
pub mod context;
pub mod error;
pub mod instrumented;
pub mod memory;
pub mod model;
pub mod repository;
pub mod version;

pub use backoff::Backoff;
pub use chain::locate_version_repo;
pub use common::{ModelId, Version};
pub use config::BackoffConfig;
pub use context::{DEFAULT_NAMESPACE, QueryContext};
pub use error::{RepoError, Result};
pub use instrumented::InstrumentedRepo;
pub use memory::InMemoryReadRepository;
pub use model::ReadModel;
pub use repository::{ReadRepository, ReadRepositoryExt};
pub use version::VersionRepo;
