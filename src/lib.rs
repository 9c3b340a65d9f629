pub mod libs;

use std::sync::Arc;

use crate::libs::cache::CacheStore;
use crate::libs::composer::{Composer, SendOutcome};
use crate::libs::connectivity::ConnectivityMonitor;
use crate::libs::errors::SendError;
use crate::libs::models::{Message, OutgoingPayload, SessionUser};
use crate::libs::remote::RemoteStore;
use crate::libs::sync::{SyncController, SyncState};

pub use crate::libs::cache::SqliteCacheStore;
pub use crate::libs::errors::{AuthError, CacheError, CapabilityError, DecodeError};
pub use crate::libs::models::{Attachment, GeoPoint, MessageAuthor};

/// One chat conversation wired end to end: sync controller, composer and
/// connectivity monitor over an injected remote store and cache.
pub struct ChatClient {
    controller: SyncController,
    composer: Composer,
    monitor: ConnectivityMonitor,
}

impl ChatClient {
    pub fn new(
        remote: Arc<dyn RemoteStore>,
        cache: Arc<dyn CacheStore>,
        user: SessionUser,
    ) -> Self {
        let controller = SyncController::new(remote.clone(), cache);
        let composer = Composer::new(remote, controller.status(), user);
        Self {
            controller,
            composer,
            monitor: ConnectivityMonitor::new(),
        }
    }

    /// Feeds a reachability report into the sync state machine.
    pub fn report_connectivity(&mut self, online: bool) {
        self.monitor.report(online, &mut self.controller);
    }

    /// Current message list, most recent first.
    pub fn messages(&self) -> Vec<Message> {
        self.controller.messages()
    }

    pub fn state(&self) -> SyncState {
        self.controller.state()
    }

    pub fn send(&self, payload: OutgoingPayload) -> Result<SendOutcome, SendError> {
        self.composer.send(payload)
    }

    /// Tears down the live subscription. Also happens on drop.
    pub fn shutdown(&mut self) {
        self.controller.shutdown();
    }
}
