#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use uuid::Uuid;

use parley_chat_lib::libs::attachments::{
    CapturedImage, LocationProvider, MediaProvider, ObjectStorage,
};
use parley_chat_lib::libs::auth::IdentityProvider;
use parley_chat_lib::libs::cache::{CacheStore, SqliteCacheStore};
use parley_chat_lib::libs::codec::{NewRemoteDocument, RemoteDocument, RemoteUser};
use parley_chat_lib::libs::errors::{AuthError, CacheError, Capability, CapabilityError, SendError};
use parley_chat_lib::libs::models::{GeoPoint, Message, SessionUser};
use parley_chat_lib::libs::remote::{RemoteStore, SnapshotHandler, Subscription};

pub const T0_MILLIS: i64 = 1_700_000_000_000;

struct FakeRemoteInner {
    docs: Vec<RemoteDocument>,
    handlers: Vec<(u64, SnapshotHandler)>,
    next_handler_id: u64,
    next_created_at: i64,
}

/// In-process stand-in for the remote message collection. Subscribers get
/// the full ordered document list immediately on attach and again after
/// every append or emit, newest first.
pub struct FakeRemoteStore {
    inner: Arc<Mutex<FakeRemoteInner>>,
    // When false, cancel() leaves the handler registered; used to prove
    // the controller's own late-callback guard.
    honor_cancel: bool,
}

impl FakeRemoteStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Self::empty_inner(),
            honor_cancel: true,
        })
    }

    /// A store whose subscription cancel is a no-op.
    pub fn leaky() -> Arc<Self> {
        Arc::new(Self {
            inner: Self::empty_inner(),
            honor_cancel: false,
        })
    }

    fn empty_inner() -> Arc<Mutex<FakeRemoteInner>> {
        Arc::new(Mutex::new(FakeRemoteInner {
            docs: Vec::new(),
            handlers: Vec::new(),
            next_handler_id: 0,
            next_created_at: T0_MILLIS,
        }))
    }

    /// Replaces the remote document list and notifies every subscriber
    /// with the full snapshot, never a diff.
    pub fn emit(&self, docs: Vec<RemoteDocument>) {
        let mut inner = self.inner.lock().unwrap();
        inner.docs = docs.clone();
        for (_, handler) in &inner.handlers {
            handler(docs.clone());
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().unwrap().handlers.len()
    }

    pub fn docs(&self) -> Vec<RemoteDocument> {
        self.inner.lock().unwrap().docs.clone()
    }
}

impl RemoteStore for FakeRemoteStore {
    fn subscribe(&self, handler: SnapshotHandler) -> Subscription {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_handler_id;
        inner.next_handler_id += 1;

        // Initial snapshot is delivered synchronously on attach.
        handler(inner.docs.clone());
        inner.handlers.push((id, handler));
        drop(inner);

        let weak = Arc::downgrade(&self.inner);
        let honor_cancel = self.honor_cancel;
        Subscription::new(move || {
            if !honor_cancel {
                return;
            }
            if let Some(inner) = weak.upgrade() {
                inner.lock().unwrap().handlers.retain(|(hid, _)| *hid != id);
            }
        })
    }

    fn append(&self, doc: NewRemoteDocument) -> Result<(), SendError> {
        let mut inner = self.inner.lock().unwrap();
        // The store stamps id and creation time; timestamps are strictly
        // monotonic, so ordering stays consistent across clients.
        inner.next_created_at += 1_000;
        let stamped = RemoteDocument {
            id: Uuid::now_v7().to_string(),
            text: doc.text,
            image: doc.image,
            location: doc.location,
            created_at: Some(inner.next_created_at),
            user: Some(doc.user),
        };
        // Newest first, matching the descending query order.
        inner.docs.insert(0, stamped);
        let docs = inner.docs.clone();
        for (_, handler) in &inner.handlers {
            handler(docs.clone());
        }
        Ok(())
    }
}

/// Cache store whose saves always fail; loads report an empty cache.
pub struct FailingCacheStore;

impl CacheStore for FailingCacheStore {
    fn save(&self, _messages: &[Message]) -> Result<(), CacheError> {
        Err(CacheError::Storage("disk full".into()))
    }

    fn load(&self) -> Result<Option<Vec<Message>>, CacheError> {
        Ok(None)
    }
}

pub struct FakeObjectStorage {
    pub uploads: Mutex<Vec<String>>,
}

impl FakeObjectStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            uploads: Mutex::new(Vec::new()),
        })
    }
}

impl ObjectStorage for FakeObjectStorage {
    fn upload(&self, reference: &str, _bytes: &[u8]) -> Result<String, CapabilityError> {
        self.uploads.lock().unwrap().push(reference.to_string());
        Ok(format!("https://storage.example/{reference}"))
    }
}

pub struct FakeMediaProvider {
    pub granted: bool,
    pub image: Option<CapturedImage>,
}

impl MediaProvider for FakeMediaProvider {
    fn request_permission(&self, _capability: Capability) -> bool {
        self.granted
    }

    fn pick_image(&self) -> Option<CapturedImage> {
        self.image.clone()
    }

    fn take_photo(&self) -> Option<CapturedImage> {
        self.image.clone()
    }
}

pub struct FakeLocationProvider {
    pub granted: bool,
    pub position: Option<GeoPoint>,
}

impl LocationProvider for FakeLocationProvider {
    fn request_permission(&self) -> bool {
        self.granted
    }

    fn current_position(&self) -> Option<GeoPoint> {
        self.position.clone()
    }
}

pub struct FakeIdentityProvider {
    pub reachable: bool,
}

impl IdentityProvider for FakeIdentityProvider {
    fn sign_in_anonymously(&self) -> Result<String, AuthError> {
        if self.reachable {
            Ok(Uuid::now_v7().to_string())
        } else {
            Err(AuthError::Unavailable("network unreachable".into()))
        }
    }
}

/// Per-test cache database in a temp directory. Keep the `TempDir` alive
/// for the duration of the test.
pub fn temp_cache() -> (TempDir, Arc<SqliteCacheStore>) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let store =
        SqliteCacheStore::open(dir.path().join("cache.db")).expect("failed to open cache store");
    (dir, Arc::new(store))
}

pub fn remote_user(id: &str, name: &str) -> RemoteUser {
    RemoteUser {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn text_doc(id: &str, text: &str, created_at: i64) -> RemoteDocument {
    RemoteDocument {
        id: id.to_string(),
        text: Some(text.to_string()),
        image: None,
        location: None,
        created_at: Some(created_at),
        user: Some(remote_user("user-1", "Ada")),
    }
}

pub fn session_user() -> SessionUser {
    SessionUser {
        id: "user-1".to_string(),
        display_name: "Ada".to_string(),
        background_color: "#474056".to_string(),
    }
}
