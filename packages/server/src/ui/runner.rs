//! Server assembly and entry point.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::domain::ChatRepository;

use super::{
    handler::{get_event_participants, health_check, websocket_handler},
    signal,
    state::AppState,
};

/// Server bind configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

/// Build the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route(
            "/api/events/{event_id}/participants",
            get(get_event_participants),
        )
        .route("/ws", get(websocket_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the relay server until a shutdown signal arrives.
pub async fn run(config: ServerConfig, repository: Arc<dyn ChatRepository>) -> std::io::Result<()> {
    let state = Arc::new(AppState::new(repository));
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(signal::shutdown_signal())
        .await
}
