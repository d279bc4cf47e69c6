//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use baller_shared::time::timestamp_ms_to_rfc3339;

use crate::{
    domain::EventId,
    infrastructure::dto::{http::EventParticipantDto, websocket::UserSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Transient presence snapshot of an event's chat room.
///
/// An event with no live room yields an empty list. Presence is never
/// authoritative for persistence.
pub async fn get_event_participants(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<i64>,
) -> Json<Vec<EventParticipantDto>> {
    let members = state.registry.members(EventId::new(event_id)).await;

    let participants = members
        .iter()
        .map(|participant| EventParticipantDto {
            user: UserSummaryDto::from(&participant.user),
            connected_at: timestamp_ms_to_rfc3339(participant.connected_at.value()),
        })
        .collect();

    Json(participants)
}
