//! 待合室の変更を医師へ通知する
//!
//! 通知は常に全量スナップショット。スナップショットの読み出しと送信は
//! 1 つのロックの中で行うため、医師が最後に受け取るのは必ず最新の状態になる。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, LobbyEntry, LobbyRepository, MessagePusher, Notification,
    ParticipantRepository, RoomId,
};

pub struct LobbyNotifier {
    participant_repository: Arc<dyn ParticipantRepository>,
    lobby_repository: Arc<dyn LobbyRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    publish_lock: Mutex<()>,
}

impl LobbyNotifier {
    pub fn new(
        participant_repository: Arc<dyn ParticipantRepository>,
        lobby_repository: Arc<dyn LobbyRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            participant_repository,
            lobby_repository,
            message_pusher,
            publish_lock: Mutex::new(()),
        }
    }

    /// ルームに参加している全ての医師へ現在のスナップショットを送る
    pub async fn publish(&self, room_id: &RoomId) -> Vec<LobbyEntry> {
        let _guard = self.publish_lock.lock().await;
        let entries = self.lobby_repository.snapshot(room_id).await;
        let doctors = self
            .participant_repository
            .find_doctors_in_room(room_id)
            .await;

        if doctors.is_empty() {
            tracing::debug!("No doctor in room '{}' to notify", room_id);
            return entries;
        }

        let notification = Notification::LobbyUpdated {
            entries: entries.clone(),
        };
        if let Err(e) = self.message_pusher.broadcast(&doctors, &notification).await {
            tracing::warn!("Failed to push lobby of room '{}': {}", room_id, e);
        } else {
            tracing::info!(
                "Lobby of room '{}' ({} waiting) pushed to {} doctor(s)",
                room_id,
                entries.len(),
                doctors.len()
            );
        }
        entries
    }

    /// 特定の医師にだけ現在のスナップショットを送る
    pub async fn publish_to(&self, room_id: &RoomId, doctor_id: &ConnectionId) -> Vec<LobbyEntry> {
        let _guard = self.publish_lock.lock().await;
        let entries = self.lobby_repository.snapshot(room_id).await;
        let notification = Notification::LobbyUpdated {
            entries: entries.clone(),
        };
        if let Err(e) = self.message_pusher.push_to(doctor_id, &notification).await {
            tracing::warn!(
                "Failed to push lobby of room '{}' to '{}': {}",
                room_id,
                doctor_id,
                e
            );
        }
        entries
    }
}
