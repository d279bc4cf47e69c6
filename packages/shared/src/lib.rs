//! Shared utilities for the Baller event chat server.
//!
//! Cross-cutting helpers used across the workspace: logger initialization
//! and timestamp handling.

pub mod logger;
pub mod time;

pub use logger::setup_logger;
pub use time::{timestamp_ms_to_rfc3339, unix_timestamp_ms};
