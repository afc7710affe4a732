//! Projector that applies invitation events to the read repository.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use read_repository::{QueryContext, ReadRepository, ReadRepositoryExt, Version};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::guest_list::GuestListProjector;
use crate::invitation::{Invitation, InvitationEvent, InvitationStatus};
use crate::{DemoError, Result};

/// Applies invitation events to read models, each save bumping the model's
/// version by one.
///
/// `lag` is slept before every event to imitate the delay between an event
/// being stored and its projection becoming visible. An attached
/// [`GuestListProjector`] sees every event whose invitation was projected.
pub struct InvitationProjector<R: ?Sized> {
    repo: Arc<R>,
    guest_list: Option<GuestListProjector>,
    lag: Duration,
}

impl<R> InvitationProjector<R>
where
    R: ReadRepository<Model = Invitation> + ?Sized + 'static,
{
    pub fn new(repo: Arc<R>, lag: Duration) -> Self {
        Self {
            repo,
            guest_list: None,
            lag,
        }
    }

    /// Also folds events into a guest list.
    pub fn with_guest_list(mut self, guest_list: GuestListProjector) -> Self {
        self.guest_list = Some(guest_list);
        self
    }

    /// Applies one event and returns the saved model.
    #[tracing::instrument(skip(self, event), fields(event_type = event.event_type()))]
    pub async fn apply(&self, event: &InvitationEvent) -> Result<Invitation> {
        let ctx = QueryContext::new();
        let id = event.invitation_id();
        let current = self.repo.find_optional(&ctx, id).await?;

        let invitation = match (event, current) {
            (InvitationEvent::Created { name, .. }, current) => Invitation {
                id,
                name: name.clone(),
                status: InvitationStatus::Pending,
                version: current.map_or(Version::first(), |c| c.version.next()),
                updated_at: Utc::now(),
            },
            (InvitationEvent::Accepted { .. }, Some(current)) => {
                answered(current, InvitationStatus::Accepted)
            }
            (InvitationEvent::Declined { .. }, Some(current)) => {
                answered(current, InvitationStatus::Declined)
            }
            (_, None) => return Err(DemoError::UnknownInvitation(id)),
        };

        self.repo.save(&ctx, id, invitation.clone()).await?;
        tracing::debug!(%id, version = %invitation.version, status = %invitation.status, "projected invitation");
        Ok(invitation)
    }

    /// Applies one event to the invitation and then to the guest list, if any.
    pub async fn project(&self, event: &InvitationEvent) -> Result<Invitation> {
        let invitation = self.apply(event).await?;
        if let Some(guest_list) = &self.guest_list {
            guest_list.apply(event).await?;
        }
        Ok(invitation)
    }

    /// Runs the projector until `events` is closed.
    pub fn spawn(self, mut events: mpsc::Receiver<InvitationEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                tokio::time::sleep(self.lag).await;
                if let Err(err) = self.project(&event).await {
                    tracing::warn!(error = %err, event_type = event.event_type(), "failed to project event");
                }
            }
            tracing::info!("projector stopped");
        })
    }
}

fn answered(current: Invitation, status: InvitationStatus) -> Invitation {
    Invitation {
        status,
        version: current.version.next(),
        updated_at: Utc::now(),
        ..current
    }
}
