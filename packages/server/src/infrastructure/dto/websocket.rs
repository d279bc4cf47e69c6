//! WebSocket wire frames for the event chat relay.
//!
//! The protocol is a closed tagged union on both directions: the `type` tag
//! is kebab-case and payload fields are camelCase, matching the client's
//! wire format. An unrecognized or malformed frame fails to parse and takes
//! the single rejection path in the handler.

use serde::{Deserialize, Serialize};

use crate::domain::{EventMessage, User};

/// Frames sent by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientFrame {
    /// Request to join an event's chat room
    JoinEvent { event_id: i64, user_id: String },
    /// Post a chat message to the joined room
    SendMessage { event_id: i64, message: String },
}

/// Frames sent by the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerFrame {
    /// Join accepted
    Joined { event_id: i64 },
    /// Join/send rejected, or malformed input
    Error { message: String },
    /// Broadcast of a persisted message, joined with the author's display row
    NewMessage {
        #[serde(flatten)]
        message: EventMessageDto,
        user: UserSummaryDto,
    },
    /// Presence notice: a participant joined the room
    UserJoined { user: UserSummaryDto },
    /// Presence notice: a participant left the room
    UserLeft { user: UserSummaryDto },
}

/// A persisted message row on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMessageDto {
    pub id: i64,
    pub event_id: i64,
    pub user_id: String,
    pub message: String,
    /// Unix timestamp (milliseconds since epoch, UTC)
    pub created_at: i64,
}

impl From<&EventMessage> for EventMessageDto {
    fn from(message: &EventMessage) -> Self {
        Self {
            id: message.id.value(),
            event_id: message.event_id.value(),
            user_id: message.user_id.as_str().to_string(),
            message: message.message.as_str().to_string(),
            created_at: message.created_at.value(),
        }
    }
}

/// User display fields on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryDto {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

impl From<&User> for UserSummaryDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.as_str().to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            profile_image_url: user.profile_image_url.clone(),
        }
    }
}
