//! UseCase: ルーム一覧の取得

use std::sync::Arc;

use crate::domain::{Lobby, LobbyRepository};

pub struct GetRoomsUseCase {
    repository: Arc<dyn LobbyRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn LobbyRepository>) -> Self {
        Self { repository }
    }

    /// ルーム ID 順の全ルーム
    pub async fn execute(&self) -> Vec<Lobby> {
        self.repository.get_lobbies().await
    }
}
