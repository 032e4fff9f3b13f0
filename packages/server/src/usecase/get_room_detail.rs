//! UseCase: ルーム詳細の取得

use std::sync::Arc;

use crate::domain::{Lobby, LobbyRepository, RoomId};

use super::error::GetRoomDetailError;

pub struct GetRoomDetailUseCase {
    repository: Arc<dyn LobbyRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn LobbyRepository>) -> Self {
        Self { repository }
    }

    /// 不正なルーム ID は存在しないルームと同じ扱い
    pub async fn execute(&self, room_id: String) -> Result<Lobby, GetRoomDetailError> {
        let room_id = RoomId::new(room_id).map_err(|_| GetRoomDetailError::RoomNotFound)?;
        self.repository
            .get_lobby(&room_id)
            .await
            .ok_or(GetRoomDetailError::RoomNotFound)
    }
}
