use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::libs::errors::DecodeError;
use crate::libs::models::{Attachment, GeoPoint, Message, MessageAuthor, OutgoingPayload, SessionUser};

/// Author fields as stored on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// A document as delivered by the remote message collection.
///
/// Every field beyond `_id` is optional on the wire; `decode` decides what
/// is actually required. Unknown remote fields are dropped at
/// deserialization and never reach the domain model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    /// Milliseconds since the epoch, stamped server-side.
    #[serde(default, rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<RemoteUser>,
}

/// The append payload for a new message. Carries no id and no timestamp;
/// the remote store assigns both, so clock skew between clients cannot
/// break the ordering key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRemoteDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    pub user: RemoteUser,
}

/// Maps a remote document into a [`Message`].
///
/// Fails if the server timestamp is absent (no "now" substitution), if the
/// author is missing, or if both attachment kinds are present at once.
pub fn decode(doc: &RemoteDocument) -> Result<Message, DecodeError> {
    let millis = doc.created_at.ok_or_else(|| DecodeError::MissingCreatedAt {
        id: doc.id.clone(),
    })?;
    let created_at =
        DateTime::from_timestamp_millis(millis).ok_or_else(|| DecodeError::InvalidCreatedAt {
            id: doc.id.clone(),
        })?;

    let user = doc.user.as_ref().ok_or_else(|| DecodeError::MissingAuthor {
        id: doc.id.clone(),
    })?;

    let attachment = match (&doc.image, &doc.location) {
        (Some(_), Some(_)) => {
            return Err(DecodeError::ConflictingAttachments { id: doc.id.clone() })
        }
        (Some(url), None) => Some(Attachment::Image { url: url.clone() }),
        (None, Some(point)) => Some(Attachment::Location(point.clone())),
        (None, None) => None,
    };

    Ok(Message {
        id: doc.id.clone(),
        text: doc.text.clone(),
        attachment,
        created_at,
        author: MessageAuthor {
            id: user.id.clone(),
            display_name: user.name.clone(),
        },
    })
}

/// Builds the write payload for an outgoing message.
pub fn encode(payload: &OutgoingPayload, author: &SessionUser) -> NewRemoteDocument {
    let user = RemoteUser {
        id: author.id.clone(),
        name: author.display_name.clone(),
    };
    match payload {
        OutgoingPayload::Text(text) => NewRemoteDocument {
            text: Some(text.clone()),
            image: None,
            location: None,
            user,
        },
        OutgoingPayload::Image { url } => NewRemoteDocument {
            text: None,
            image: Some(url.clone()),
            location: None,
            user,
        },
        OutgoingPayload::Location(point) => NewRemoteDocument {
            text: None,
            image: None,
            location: Some(point.clone()),
            user,
        },
    }
}
