//! Invitation read model and the events that drive it.

use chrono::{DateTime, Utc};
use read_repository::{ModelId, ReadModel, Version};
use serde::Serialize;

/// Answer state of an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
}

impl std::fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvitationStatus::Pending => write!(f, "Pending"),
            InvitationStatus::Accepted => write!(f, "Accepted"),
            InvitationStatus::Declined => write!(f, "Declined"),
        }
    }
}

/// Read model for a single invitation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invitation {
    pub id: ModelId,
    pub name: String,
    pub status: InvitationStatus,
    pub version: Version,
    pub updated_at: DateTime<Utc>,
}

impl ReadModel for Invitation {
    fn version(&self) -> Option<Version> {
        Some(self.version)
    }
}

/// Events emitted by the invitation command side.
#[derive(Debug, Clone, PartialEq)]
pub enum InvitationEvent {
    Created { id: ModelId, name: String },
    Accepted { id: ModelId },
    Declined { id: ModelId },
}

impl InvitationEvent {
    /// Returns the invitation this event belongs to.
    pub fn invitation_id(&self) -> ModelId {
        match self {
            InvitationEvent::Created { id, .. }
            | InvitationEvent::Accepted { id }
            | InvitationEvent::Declined { id } => *id,
        }
    }

    /// Returns the event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            InvitationEvent::Created { .. } => "InviteCreated",
            InvitationEvent::Accepted { .. } => "InviteAccepted",
            InvitationEvent::Declined { .. } => "InviteDeclined",
        }
    }
}
