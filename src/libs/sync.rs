use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::libs::cache::CacheStore;
use crate::libs::codec::{self, RemoteDocument};
use crate::libs::models::Message;
use crate::libs::remote::{RemoteStore, SnapshotHandler, Subscription};

/// Which data source currently backs the in-memory message list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Live,
    Cached,
}

/// Cloneable read handle onto the controller's current state. The composer
/// consults it before every send.
#[derive(Clone)]
pub struct SyncStatus {
    live: Arc<AtomicBool>,
}

impl SyncStatus {
    fn new() -> Self {
        Self {
            live: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn state(&self) -> SyncState {
        if self.live.load(Ordering::SeqCst) {
            SyncState::Live
        } else {
            SyncState::Cached
        }
    }

    fn set(&self, state: SyncState) {
        self.live.store(state == SyncState::Live, Ordering::SeqCst);
    }
}

/// Owns the live subscription to the remote message collection and the
/// fallback read of the snapshot cache.
///
/// Two states. Live: every remote snapshot replaces the in-memory list
/// wholesale and is written through to the cache. Cached: the subscription
/// is torn down and the last cached snapshot (if any) is shown. Each
/// connectivity flip triggers a full unsubscribe/resubscribe cycle with no
/// debounce or retry.
pub struct SyncController {
    remote: Arc<dyn RemoteStore>,
    cache: Arc<dyn CacheStore>,
    messages: Arc<Mutex<Vec<Message>>>,
    status: SyncStatus,
    subscription: Option<Subscription>,
    // Guard against the late-callback race: a snapshot delivered after
    // teardown must not mutate state.
    subscription_active: Option<Arc<AtomicBool>>,
}

impl SyncController {
    pub fn new(remote: Arc<dyn RemoteStore>, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            remote,
            cache,
            messages: Arc::new(Mutex::new(Vec::new())),
            status: SyncStatus::new(),
            subscription: None,
            subscription_active: None,
        }
    }

    /// Current in-memory message list, most recent first.
    pub fn messages(&self) -> Vec<Message> {
        self.messages.lock().expect("messages lock poisoned").clone()
    }

    pub fn state(&self) -> SyncState {
        self.status.state()
    }

    /// Shared status handle for the composer.
    pub fn status(&self) -> SyncStatus {
        self.status.clone()
    }

    /// Reacts to a connectivity transition reported by the monitor.
    pub fn set_connectivity(&mut self, online: bool) {
        if online {
            self.enter_live();
        } else {
            self.enter_cached();
        }
    }

    /// Cancels any active subscription. Mandatory cleanup contract,
    /// independent of connectivity; also runs on drop.
    pub fn shutdown(&mut self) {
        self.teardown_subscription();
    }

    fn enter_live(&mut self) {
        self.teardown_subscription();
        self.status.set(SyncState::Live);

        let active = Arc::new(AtomicBool::new(true));
        let guard = active.clone();
        let messages = self.messages.clone();
        let cache = self.cache.clone();

        let handler: SnapshotHandler = Box::new(move |docs| {
            if !guard.load(Ordering::SeqCst) {
                debug!("snapshot arrived after teardown, ignoring");
                return;
            }
            let decoded = decode_snapshot(&docs);
            *messages.lock().expect("messages lock poisoned") = decoded.clone();
            // The rendered live data is authoritative; a failed cache
            // write only costs the offline fallback.
            if let Err(err) = cache.save(&decoded) {
                warn!(%err, "failed to cache message snapshot");
            }
        });

        info!("connectivity up, subscribing to remote messages");
        self.subscription = Some(self.remote.subscribe(handler));
        self.subscription_active = Some(active);
    }

    fn enter_cached(&mut self) {
        self.teardown_subscription();
        self.status.set(SyncState::Cached);

        info!("connectivity down, falling back to cached messages");
        match self.cache.load() {
            Ok(Some(cached)) => {
                *self.messages.lock().expect("messages lock poisoned") = cached;
            }
            // Never cached: keep whatever is already in memory.
            Ok(None) => debug!("no cached snapshot present"),
            Err(err) => warn!(%err, "failed to load cached messages"),
        }
    }

    fn teardown_subscription(&mut self) {
        if let Some(active) = self.subscription_active.take() {
            active.store(false, Ordering::SeqCst);
        }
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
        }
    }
}

impl Drop for SyncController {
    fn drop(&mut self) {
        self.teardown_subscription();
    }
}

// Malformed documents are skipped and the rest of the snapshot still
// applies; a single bad row never blanks the conversation.
fn decode_snapshot(docs: &[RemoteDocument]) -> Vec<Message> {
    docs.iter()
        .filter_map(|doc| match codec::decode(doc) {
            Ok(message) => Some(message),
            Err(err) => {
                warn!(doc_id = %doc.id, %err, "skipping malformed remote document");
                None
            }
        })
        .collect()
}
