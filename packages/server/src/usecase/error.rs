//! UseCase layer error definitions.
//!
//! The `Display` strings of these errors double as the wire-level `error`
//! frame messages, so the exact wording is part of the protocol.

use thiserror::Error;

use crate::domain::RepositoryError;

/// Errors returned by the join protocol
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinEventError {
    /// The referenced event does not exist
    #[error("Event not found")]
    EventNotFound,

    /// The user is neither the host nor an RSVP holder for the event
    #[error("Access denied to event chat")]
    AccessDenied,

    /// The user row could not be found
    #[error("User not found")]
    UserNotFound,

    /// The persistence layer failed during the join checks
    #[error("Failed to join event chat")]
    Repository(#[source] RepositoryError),
}

impl From<RepositoryError> for JoinEventError {
    fn from(err: RepositoryError) -> Self {
        Self::Repository(err)
    }
}

/// Errors returned by the send protocol
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// The message text is empty after trimming whitespace
    #[error("Message cannot be empty")]
    EmptyText,

    /// The message text exceeds the length cap
    #[error("Message exceeds maximum length")]
    TextTooLong,

    /// The message insert failed; nothing was broadcast
    #[error("Failed to save message")]
    Persistence(#[source] RepositoryError),
}
