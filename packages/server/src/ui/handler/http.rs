//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::http::{ErrorResponseDto, IceServerDto, RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
    usecase::GetRoomDetailError,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Relay (TURN) servers the browser should add to its peer connection
pub async fn get_ice_servers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<IceServerDto>>, (StatusCode, Json<ErrorResponseDto>)> {
    match state.get_ice_servers_usecase.execute().await {
        Ok(servers) => Ok(Json(servers.into_iter().map(IceServerDto::from).collect())),
        Err(_) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponseDto {
                error: "Failed to get ICE servers".to_string(),
            }),
        )),
    }
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let lobbies = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(lobbies.into_iter().map(RoomSummaryDto::from).collect())
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    match state.get_room_detail_usecase.execute(room_id).await {
        Ok(lobby) => Ok(Json(RoomDetailDto::from(lobby))),
        Err(GetRoomDetailError::RoomNotFound) => Err(StatusCode::NOT_FOUND),
    }
}
