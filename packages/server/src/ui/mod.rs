//! WebSocket relay server implementation: registry, state, handlers, runner.

pub mod handler;
pub mod registry;
pub mod runner;
pub mod signal;
pub mod state;

pub use runner::{ServerConfig, create_router, run};
