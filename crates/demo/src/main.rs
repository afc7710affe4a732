//! Invitation demo entry point.

use std::sync::Arc;
use std::time::Duration;

use demo::{
    Config, GuestList, GuestListProjector, Invitation, InvitationEvent, InvitationProjector,
    InvitationStatus,
};
use read_repository::{
    BackoffConfig, InMemoryReadRepository, InstrumentedRepo, ModelId, QueryContext,
    ReadRepository, Version, VersionRepo, locate_version_repo,
};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Reads `id` once it has reached `version`, logging the outcome.
async fn read_at_least<R>(repo: &R, id: ModelId, version: Version, timeout: Duration)
where
    R: ReadRepository<Model = Invitation> + ?Sized,
{
    let ctx = QueryContext::new()
        .with_min_version(version)
        .with_timeout(timeout);
    match repo.find(&ctx, id).await {
        Ok(invitation) => tracing::info!(
            %id,
            name = %invitation.name,
            status = %invitation.status,
            version = %invitation.version,
            "read invitation"
        ),
        Err(err) => tracing::warn!(%id, %version, error = %err, "invitation not available"),
    }
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Build the repository chain and start the projector
    let store = InMemoryReadRepository::<Invitation>::new();
    let repo = Arc::new(InstrumentedRepo::new(
        "invitations",
        VersionRepo::with_backoff(store.clone(), config.backoff),
    ));
    let guest_lists = Arc::new(InstrumentedRepo::new(
        "guest_lists",
        VersionRepo::with_backoff(InMemoryReadRepository::<GuestList>::new(), config.backoff),
    ));
    let event_id = ModelId::new();
    let (events, rx) = mpsc::channel(16);
    let projector = InvitationProjector::new(Arc::clone(&repo), config.projection_lag)
        .with_guest_list(GuestListProjector::new(guest_lists.clone(), event_id))
        .spawn(rx);

    let alice = ModelId::new();
    let bob = ModelId::new();

    // 4. Create an invitation and wait for its first version
    events
        .send(InvitationEvent::Created {
            id: alice,
            name: "Alice".to_string(),
        })
        .await
        .expect("projector stopped");
    read_at_least(repo.as_ref(), alice, Version::first(), config.query_timeout).await;

    // 5. A best-effort read right after accepting usually sees the old version
    events
        .send(InvitationEvent::Accepted { id: alice })
        .await
        .expect("projector stopped");
    let ctx = QueryContext::new().with_min_version(Version::new(2));
    match repo.find(&ctx, alice).await {
        Ok(invitation) => tracing::info!(status = %invitation.status, "best-effort read already current"),
        Err(err) => tracing::info!(error = %err, "best-effort read is behind"),
    }

    // 6. Tighten the retry pacing without knowing the chain layout
    if let Some(gate) = locate_version_repo(Some(repo.as_ref())) {
        let tuned = BackoffConfig {
            initial: Duration::from_millis(5),
            max: Duration::from_millis(100),
            ..gate.backoff_config().await
        };
        gate.set_backoff_config(tuned).await;
        tracing::info!(?tuned, "retuned version gate backoff");
    }
    read_at_least(repo.as_ref(), alice, Version::new(2), config.query_timeout).await;

    // 7. A second guest declines
    for event in [
        InvitationEvent::Created {
            id: bob,
            name: "Bob".to_string(),
        },
        InvitationEvent::Declined { id: bob },
    ] {
        events.send(event).await.expect("projector stopped");
    }
    read_at_least(repo.as_ref(), bob, Version::new(2), config.query_timeout).await;

    // 8. Drain the projector and list what was projected
    drop(events);
    projector.await.expect("projector task panicked");

    let invitations = repo
        .find_all(&QueryContext::new())
        .await
        .expect("listing invitations failed");
    for invitation in &invitations {
        match serde_json::to_string(invitation) {
            Ok(json) => tracing::info!(%json, "invitation"),
            Err(err) => tracing::warn!(error = %err, "could not serialize invitation"),
        }
    }

    let accepted = store
        .find_custom(&QueryContext::new(), |invitation| {
            invitation.status == InvitationStatus::Accepted
        })
        .await
        .expect("filtering invitations failed");
    tracing::info!(count = accepted.len(), "accepted invitations");

    // 9. Read the guest list once all four events have reached it
    let ctx = QueryContext::new()
        .with_min_version(Version::new(4))
        .with_timeout(config.query_timeout);
    match guest_lists.find(&ctx, event_id).await {
        Ok(list) => tracing::info!(
            invited = list.invited,
            accepted = list.accepted,
            declined = list.declined,
            pending = list.pending(),
            version = %list.version,
            "guest list"
        ),
        Err(err) => tracing::warn!(error = %err, "guest list not available"),
    }

    tracing::info!(metrics = %metrics_handle.render(), "final metrics");
}
