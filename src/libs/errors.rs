use thiserror::Error;

/// A remote document that cannot be mapped into a [`crate::libs::models::Message`].
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("remote document {id} has no createdAt timestamp")]
    MissingCreatedAt { id: String },
    #[error("remote document {id} has an out-of-range createdAt timestamp")]
    InvalidCreatedAt { id: String },
    #[error("remote document {id} has no author")]
    MissingAuthor { id: String },
    #[error("remote document {id} carries more than one attachment kind")]
    ConflictingAttachments { id: String },
}

/// Snapshot cache serialization or storage failure.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache storage error: {0}")]
    Storage(String),
    #[error("cached snapshot is corrupt: {0}")]
    Corrupt(String),
}

impl From<rusqlite::Error> for CacheError {
    fn from(err: rusqlite::Error) -> Self {
        CacheError::Storage(err.to_string())
    }
}

impl From<r2d2::Error> for CacheError {
    fn from(err: r2d2::Error) -> Self {
        CacheError::Storage(err.to_string())
    }
}

/// Remote append failure.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("remote append failed: {0}")]
    Append(String),
}

/// Device capability (image/location acquisition) failure.
#[derive(Debug, Error, PartialEq)]
pub enum CapabilityError {
    #[error("permission denied for {0}")]
    PermissionDenied(Capability),
    #[error("image upload failed: {0}")]
    Upload(String),
    #[error("current position unavailable")]
    LocationUnavailable,
}

/// Permission-gated device capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    MediaLibrary,
    Camera,
    ForegroundLocation,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::MediaLibrary => write!(f, "media library"),
            Capability::Camera => write!(f, "camera"),
            Capability::ForegroundLocation => write!(f, "foreground location"),
        }
    }
}

/// Anonymous sign-in failure.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("anonymous sign-in unavailable: {0}")]
    Unavailable(String),
}
