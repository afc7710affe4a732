//! Guest list read model: answer counts for a whole event.

use std::sync::Arc;

use read_repository::{ModelId, QueryContext, ReadModel, ReadRepository, ReadRepositoryExt, Version};
use serde::Serialize;

use crate::Result;
use crate::invitation::InvitationEvent;

/// Read model counting the invitations sent for one event and their answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestList {
    pub id: ModelId,
    pub invited: u32,
    pub accepted: u32,
    pub declined: u32,
    pub version: Version,
}

impl GuestList {
    /// Returns an empty guest list that has not been saved yet.
    pub fn empty(id: ModelId) -> Self {
        Self {
            id,
            invited: 0,
            accepted: 0,
            declined: 0,
            version: Version::initial(),
        }
    }

    /// Returns the number of invitations still waiting for an answer.
    pub fn pending(&self) -> u32 {
        self.invited.saturating_sub(self.accepted + self.declined)
    }
}

impl ReadModel for GuestList {
    fn version(&self) -> Option<Version> {
        Some(self.version)
    }
}

/// Folds invitation events into the single guest list stored under
/// `event_id`.
#[derive(Clone)]
pub struct GuestListProjector {
    repo: Arc<dyn ReadRepository<Model = GuestList>>,
    event_id: ModelId,
}

impl GuestListProjector {
    pub fn new(repo: Arc<dyn ReadRepository<Model = GuestList>>, event_id: ModelId) -> Self {
        Self { repo, event_id }
    }

    /// Returns the id the guest list is stored under.
    pub fn event_id(&self) -> ModelId {
        self.event_id
    }

    /// Applies one event and returns the saved guest list.
    #[tracing::instrument(skip(self, event), fields(event_type = event.event_type()))]
    pub async fn apply(&self, event: &InvitationEvent) -> Result<GuestList> {
        let ctx = QueryContext::new();
        let mut list = self
            .repo
            .find_optional(&ctx, self.event_id)
            .await?
            .unwrap_or_else(|| GuestList::empty(self.event_id));

        match event {
            InvitationEvent::Created { .. } => list.invited += 1,
            InvitationEvent::Accepted { .. } => list.accepted += 1,
            InvitationEvent::Declined { .. } => list.declined += 1,
        }
        list.version = list.version.next();

        self.repo.save(&ctx, self.event_id, list.clone()).await?;
        tracing::debug!(
            event_id = %self.event_id,
            version = %list.version,
            accepted = list.accepted,
            declined = list.declined,
            "projected guest list"
        );
        Ok(list)
    }
}
