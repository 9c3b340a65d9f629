use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::libs::errors::{Capability, CapabilityError};
use crate::libs::models::{GeoPoint, OutgoingPayload};

/// An image acquired from the media library or camera, ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Binary upload keyed by a caller-generated reference string; returns a
/// publicly fetchable URL once the upload completes.
pub trait ObjectStorage: Send + Sync {
    fn upload(&self, reference: &str, bytes: &[u8]) -> Result<String, CapabilityError>;
}

/// Permission-gated access to the device image sources. `None` from an
/// acquire call means the user cancelled; that aborts quietly.
pub trait MediaProvider: Send + Sync {
    fn request_permission(&self, capability: Capability) -> bool;
    fn pick_image(&self) -> Option<CapturedImage>;
    fn take_photo(&self) -> Option<CapturedImage>;
}

/// Permission-gated access to the device's foreground location.
pub trait LocationProvider: Send + Sync {
    fn request_permission(&self) -> bool;
    fn current_position(&self) -> Option<GeoPoint>;
}

/// Outcome of an attachment action: a payload ready for the composer, or
/// nothing if the user backed out.
pub type AttachmentResult = Result<Option<OutgoingPayload>, CapabilityError>;

/// Orchestrates attachment acquisition: permission, capture, upload.
/// Begins where the device pickers end and hands a finished payload to the
/// composer.
pub struct AttachmentActions {
    storage: Arc<dyn ObjectStorage>,
    media: Arc<dyn MediaProvider>,
    location: Arc<dyn LocationProvider>,
    user_id: String,
}

impl AttachmentActions {
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        media: Arc<dyn MediaProvider>,
        location: Arc<dyn LocationProvider>,
        user_id: String,
    ) -> Self {
        Self {
            storage,
            media,
            location,
            user_id,
        }
    }

    /// Picks an image from the media library and uploads it.
    pub fn pick_image(&self) -> AttachmentResult {
        if !self.media.request_permission(Capability::MediaLibrary) {
            return Err(CapabilityError::PermissionDenied(Capability::MediaLibrary));
        }
        match self.media.pick_image() {
            Some(image) => self.upload_image(image).map(Some),
            None => {
                debug!("image selection cancelled");
                Ok(None)
            }
        }
    }

    /// Takes a photo with the camera and uploads it.
    pub fn take_photo(&self) -> AttachmentResult {
        if !self.media.request_permission(Capability::Camera) {
            return Err(CapabilityError::PermissionDenied(Capability::Camera));
        }
        match self.media.take_photo() {
            Some(image) => self.upload_image(image).map(Some),
            None => {
                debug!("camera capture cancelled");
                Ok(None)
            }
        }
    }

    /// Fetches the current position as a location payload.
    pub fn current_location(&self) -> AttachmentResult {
        if !self.location.request_permission() {
            return Err(CapabilityError::PermissionDenied(
                Capability::ForegroundLocation,
            ));
        }
        match self.location.current_position() {
            Some(point) => Ok(Some(OutgoingPayload::Location(point))),
            None => Err(CapabilityError::LocationUnavailable),
        }
    }

    fn upload_image(&self, image: CapturedImage) -> Result<OutgoingPayload, CapabilityError> {
        let reference = self.upload_reference(&image.file_name);
        let url = self.storage.upload(&reference, &image.bytes)?;
        info!(%reference, "image uploaded");
        Ok(OutgoingPayload::Image { url })
    }

    // Unique per upload: user id, current time, original filename.
    fn upload_reference(&self, file_name: &str) -> String {
        format!(
            "{}-{}-{}",
            self.user_id,
            Utc::now().timestamp_millis(),
            file_name
        )
    }
}
