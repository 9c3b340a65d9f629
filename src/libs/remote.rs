use crate::libs::codec::{NewRemoteDocument, RemoteDocument};
use crate::libs::errors::SendError;

/// Callback receiving the complete ordered document list, on initial
/// attach and on every subsequent change. Snapshots are full replacements,
/// never diffs.
pub type SnapshotHandler = Box<dyn Fn(Vec<RemoteDocument>) + Send + 'static>;

/// The remote message collection, constructed once and passed by reference
/// into the sync controller and composer. Never reached through ambient
/// global state.
pub trait RemoteStore: Send + Sync {
    /// Attaches a live listener ordered by creation time descending.
    fn subscribe(&self, handler: SnapshotHandler) -> Subscription;

    /// Appends one document; the store stamps id and creation time.
    fn append(&self, doc: NewRemoteDocument) -> Result<(), SendError>;
}

/// Cancelable handle for an active subscription. The teardown closure runs
/// exactly once: on an explicit `cancel` or, failing that, on drop.
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(teardown: impl FnOnce() + Send + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.teardown.is_some())
            .finish()
    }
}
