//! Baller event chat relay server.
//!
//! Real-time chat for event rooms: a participant joins an event's room
//! after an eligibility check (event host or RSVP holder), messages are
//! persisted before they are broadcast, and presence notices track joins
//! and leaves.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use ui::{ServerConfig, create_router, run};
