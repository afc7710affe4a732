use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a read model instance within a namespace.
///
/// Wraps a UUID so read model keys can't be confused with other
/// UUID-based identifiers such as event or correlation IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(Uuid);

impl ModelId {
    /// Creates a new random model ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a model ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ModelId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ModelId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ModelId> for Uuid {
    fn from(id: ModelId) -> Self {
        id.0
    }
}

/// Number of events applied to produce a read model.
///
/// A model that has seen no events is at version 0; the first applied
/// event brings it to version 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// Creates a version from a raw value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns version 0, before any event was applied.
    pub fn initial() -> Self {
        Self(0)
    }

    /// Returns version 1, after the first event.
    pub fn first() -> Self {
        Self(1)
    }

    /// Returns the next version.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Version> for u64 {
    fn from(version: Version) -> Self {
        version.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_id_new_creates_unique_ids() {
        let id1 = ModelId::new();
        let id2 = ModelId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn model_id_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = ModelId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), uuid);
    }

    #[test]
    fn model_id_serializes_as_bare_uuid() {
        let id = ModelId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
    }

    #[test]
    fn version_ordering_follows_raw_value() {
        assert!(Version::initial() < Version::first());
        assert!(Version::first() < Version::first().next());
        assert_eq!(Version::first().next(), Version::new(2));
    }

    #[test]
    fn version_display() {
        assert_eq!(Version::new(42).to_string(), "42");
    }
}
