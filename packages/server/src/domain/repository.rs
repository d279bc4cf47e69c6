//! Persistence abstraction consumed by the relay.
//!
//! The usecase layer depends on this trait, never on a concrete store
//! (dependency inversion). The in-memory implementation lives in the
//! infrastructure layer; a DBMS-backed implementation would slot in behind
//! the same trait.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::{
    entity::{Event, EventMessage, EventRsvp, NewEventMessage, User},
    error::RepositoryError,
    value_object::{EventId, UserId},
};

/// Data access required by the event chat relay.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Look up an event by id. `None` when the event does not exist.
    async fn get_event_by_id(&self, event_id: EventId) -> Result<Option<Event>, RepositoryError>;

    /// All RSVP rows held by a user, any status.
    async fn get_rsvps_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<EventRsvp>, RepositoryError>;

    /// Look up a user row by id. `None` when the user does not exist.
    async fn get_user(&self, user_id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Persist a chat message.
    ///
    /// Returns the stored row with id and created_at assigned by the store.
    async fn create_event_message(
        &self,
        new_message: NewEventMessage,
    ) -> Result<EventMessage, RepositoryError>;
}
