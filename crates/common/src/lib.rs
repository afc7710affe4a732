//! Shared types for the read-model repository layer.

pub mod types;

pub use types::{ModelId, Version};
