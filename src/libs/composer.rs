use std::sync::Arc;

use tracing::debug;

use crate::libs::codec;
use crate::libs::errors::SendError;
use crate::libs::models::{OutgoingPayload, SessionUser};
use crate::libs::remote::RemoteStore;
use crate::libs::sync::{SyncState, SyncStatus};

/// Whether a send reached the remote store or was dropped offline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    DroppedOffline,
}

/// Outgoing message path. Sends only succeed while the sync controller
/// reports live; offline sends are dropped outright, never queued or
/// retried.
pub struct Composer {
    remote: Arc<dyn RemoteStore>,
    status: SyncStatus,
    author: SessionUser,
}

impl Composer {
    pub fn new(remote: Arc<dyn RemoteStore>, status: SyncStatus, author: SessionUser) -> Self {
        Self {
            remote,
            status,
            author,
        }
    }

    pub fn send(&self, payload: OutgoingPayload) -> Result<SendOutcome, SendError> {
        if self.status.state() != SyncState::Live {
            debug!("offline, dropping outgoing message");
            return Ok(SendOutcome::DroppedOffline);
        }
        let doc = codec::encode(&payload, &self.author);
        self.remote.append(doc)?;
        Ok(SendOutcome::Sent)
    }
}
