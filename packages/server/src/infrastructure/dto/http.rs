//! HTTP API response DTOs for the event chat relay.

use serde::{Deserialize, Serialize};

use super::websocket::UserSummaryDto;

/// Live participant entry for the presence endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventParticipantDto {
    pub user: UserSummaryDto,
    pub connected_at: String, // ISO 8601
}
