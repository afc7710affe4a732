//! Invitation example for the read-model repository layer.
//!
//! A projector applies invitation events to read models, and to a guest list
//! of answer counts, after a configurable lag while the query side reads them
//! through a decorator chain holding a
//! [`VersionRepo`](read_repository::VersionRepo).

pub mod config;
pub mod error;
pub mod guest_list;
pub mod invitation;
pub mod projector;

pub use config::Config;
pub use error::{DemoError, Result};
pub use guest_list::{GuestList, GuestListProjector};
pub use invitation::{Invitation, InvitationEvent, InvitationStatus};
pub use projector::InvitationProjector;
