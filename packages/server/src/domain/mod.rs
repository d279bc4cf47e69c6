//! Domain layer for the event chat relay.
//!
//! This module contains business rules that are independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use entity::{Event, EventMessage, EventRsvp, NewEventMessage, Participant, RsvpStatus, User};
pub use error::{RepositoryError, ValueObjectError};
pub use factory::ConnectionIdFactory;
pub use repository::ChatRepository;
pub use value_object::{ConnectionId, EventId, MessageId, MessageText, Timestamp, UserId};
