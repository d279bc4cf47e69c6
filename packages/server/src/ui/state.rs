//! Server state shared across connections.

use std::sync::Arc;

use crate::domain::ChatRepository;

use super::registry::RoomRegistry;

/// Shared application state
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn ChatRepository>,
    /// Live rooms and their members
    pub registry: Arc<RoomRegistry>,
}

impl AppState {
    /// Create application state over the given repository.
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self {
            repository,
            registry: Arc::new(RoomRegistry::new()),
        }
    }
}
