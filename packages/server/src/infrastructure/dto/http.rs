//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::LobbyEntryDto;

/// Room summary for `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub waiting_patients: usize,
    /// RFC 3339 (UTC)
    pub created_at: String,
}

/// Room detail for `GET /api/rooms/{room_id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub id: String,
    pub patients: Vec<LobbyEntryDto>,
    pub created_at: String,
}

/// RTCIceServer-compatible descriptor for `GET /api/ice-servers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceServerDto {
    pub urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
}
