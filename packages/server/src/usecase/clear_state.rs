//! UseCase: サーバー状態の全消去
//!
//! シャットダウン時に全ての接続・待合室を破棄します。

use std::sync::Arc;

use crate::domain::{LobbyRepository, MessagePusher, ParticipantRepository};

pub struct ClearStateUseCase {
    participant_repository: Arc<dyn ParticipantRepository>,
    lobby_repository: Arc<dyn LobbyRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ClearStateUseCase {
    pub fn new(
        participant_repository: Arc<dyn ParticipantRepository>,
        lobby_repository: Arc<dyn LobbyRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            participant_repository,
            lobby_repository,
            message_pusher,
        }
    }

    pub async fn execute(&self) {
        let participants = self.participant_repository.count().await;
        self.message_pusher.clear().await;
        self.participant_repository.clear().await;
        self.lobby_repository.clear().await;
        tracing::info!("Cleared server state ({} participant(s))", participants);
    }
}
