use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Background colors selectable on the start screen.
pub const BACKGROUND_COLORS: [&str; 4] = ["#090C08", "#474056", "#8A95A5", "#B9C6AE"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

// A message carries at most one attachment kind, so this is a closed sum
// rather than a pair of optional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attachment {
    Image { url: String },
    Location(GeoPoint),
}

/// Sender identity as embedded in each message at send time. Renaming a
/// user does not rewrite their historical messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageAuthor {
    pub id: String,
    pub display_name: String,
}

/// One immutable chat message. `id` and `created_at` are assigned by the
/// remote store; display order is `created_at` descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: Option<String>,
    pub attachment: Option<Attachment>,
    pub created_at: DateTime<Utc>,
    pub author: MessageAuthor,
}

/// What the composer accepts for an outgoing send.
#[derive(Debug, Clone, PartialEq)]
pub enum OutgoingPayload {
    Text(String),
    Image { url: String },
    Location(GeoPoint),
}

/// Ephemeral per-screen session identity. Built at sign-in, passed by
/// value into the composer, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUser {
    pub id: String,
    pub display_name: String,
    pub background_color: String,
}
