//! Core domain models for the event chat relay.

use serde::{Deserialize, Serialize};

use super::value_object::{ConnectionId, EventId, MessageId, MessageText, Timestamp, UserId};

/// A user row as seen by the relay.
///
/// Display fields are nullable in the source of record (profiles created by
/// the identity provider may carry no name or avatar yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier
    pub id: UserId,
    /// Given name, if set
    pub first_name: Option<String>,
    /// Family name, if set
    pub last_name: Option<String>,
    /// Avatar URL, if set
    pub profile_image_url: Option<String>,
}

impl User {
    /// Create a new user row.
    pub fn new(
        id: UserId,
        first_name: Option<String>,
        last_name: Option<String>,
        profile_image_url: Option<String>,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            profile_image_url,
        }
    }
}

/// The relay-relevant projection of an event row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event identifier
    pub id: EventId,
    /// User who created and hosts the event
    pub host_id: UserId,
    /// Event title
    pub title: String,
    /// Sport being played (basketball, soccer, ...)
    pub sport_type: String,
}

impl Event {
    /// Create a new event row.
    pub fn new(id: EventId, host_id: UserId, title: String, sport_type: String) -> Self {
        Self {
            id,
            host_id,
            title,
            sport_type,
        }
    }

    /// Whether the given user hosts this event.
    pub fn is_hosted_by(&self, user_id: &UserId) -> bool {
        &self.host_id == user_id
    }
}

/// RSVP status on an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsvpStatus {
    Interested,
    Joined,
    Declined,
}

/// An RSVP row linking a user to an event.
///
/// Chat eligibility counts any RSVP row regardless of status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRsvp {
    /// Event the RSVP is for
    pub event_id: EventId,
    /// User holding the RSVP
    pub user_id: UserId,
    /// Current RSVP status
    pub status: RsvpStatus,
}

impl EventRsvp {
    /// Create a new RSVP row.
    pub fn new(event_id: EventId, user_id: UserId, status: RsvpStatus) -> Self {
        Self {
            event_id,
            user_id,
            status,
        }
    }
}

/// A persisted chat message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMessage {
    /// Message identifier, assigned by the persistence layer
    pub id: MessageId,
    /// Event whose room the message was posted in
    pub event_id: EventId,
    /// Author of the message
    pub user_id: UserId,
    /// Message body
    pub message: MessageText,
    /// Timestamp when the row was created
    pub created_at: Timestamp,
}

/// Insert shape for a chat message, before id and created_at are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEventMessage {
    /// Event whose room the message was posted in
    pub event_id: EventId,
    /// Author of the message
    pub user_id: UserId,
    /// Message body
    pub message: MessageText,
}

/// A live participant in an event chat room.
///
/// Transient: exists only while the underlying connection is registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// The connection this participant is attached to
    pub connection_id: ConnectionId,
    /// Display row of the connected user
    pub user: User,
    /// Timestamp when the participant joined the room
    pub connected_at: Timestamp,
}

impl Participant {
    /// Create a new participant.
    pub fn new(connection_id: ConnectionId, user: User, connected_at: Timestamp) -> Self {
        Self {
            connection_id,
            user,
            connected_at,
        }
    }

    /// The participant's user id.
    pub fn user_id(&self) -> &UserId {
        &self.user.id
    }
}
