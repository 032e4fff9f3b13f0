//! UseCase テスト用の共通フィクスチャ
//!
//! 実際の InMemory Repository と WebSocketMessagePusher を組み合わせ、
//! クライアントに届いた JSON イベントを mpsc の受信側から読み出して検証する。

use std::sync::Arc;

use telecare_shared::time::FixedClock;
use tokio::sync::mpsc;

use crate::{
    domain::{
        ConnectionId, DisplayName, MessagePusher, Participant, ParticipantRepository, Role, RoomId,
        Timestamp,
    },
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryLobbyRepository, InMemoryParticipantRepository},
    },
};

use super::LobbyNotifier;

pub const NOW: i64 = 1_700_000_000_000;

pub struct TestContext {
    pub participants: Arc<InMemoryParticipantRepository>,
    pub lobbies: Arc<InMemoryLobbyRepository>,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub notifier: Arc<LobbyNotifier>,
    pub clock: Arc<FixedClock>,
}

impl TestContext {
    pub fn new() -> Self {
        let participants = Arc::new(InMemoryParticipantRepository::new());
        let lobbies = Arc::new(InMemoryLobbyRepository::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let notifier = Arc::new(LobbyNotifier::new(
            participants.clone(),
            lobbies.clone(),
            pusher.clone(),
        ));
        Self {
            participants,
            lobbies,
            pusher,
            notifier,
            clock: Arc::new(FixedClock::new(NOW)),
        }
    }

    /// 固定の接続 ID で参加者を登録し、その参加者宛ての受信側を返す
    pub async fn connect(&self, value: &str) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        let connected_at = Timestamp::new(NOW + self.participants.count().await as i64);
        self.participants
            .register(Participant::new(id(value), connected_at))
            .await
            .unwrap();
        self.pusher.register_client(id(value), tx).await;
        rx
    }

    pub async fn set_doctor(&self, value: &str, room_value: &str) {
        self.participants
            .set_role(
                &id(value),
                Role::Doctor {
                    room_id: room(room_value),
                },
            )
            .await;
    }

    pub async fn partner_of(&self, value: &str) -> Option<ConnectionId> {
        self.participants
            .get(&id(value))
            .await
            .and_then(|p| p.call_partner)
    }
}

pub fn id(value: &str) -> ConnectionId {
    ConnectionId::new(value.to_string()).unwrap()
}

pub fn room(value: &str) -> RoomId {
    RoomId::new(value.to_string()).unwrap()
}

pub fn name(value: &str) -> DisplayName {
    DisplayName::new(value.to_string()).unwrap()
}

/// 受信済みのイベントを全て取り出す
pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<serde_json::Value> {
    let mut events = Vec::new();
    while let Ok(text) = rx.try_recv() {
        events.push(serde_json::from_str(&text).unwrap());
    }
    events
}

/// イベント名だけを取り出す
pub fn event_names(events: &[serde_json::Value]) -> Vec<String> {
    events
        .iter()
        .map(|e| e["event"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// lobby-updated イベントの socketId 一覧
pub fn lobby_ids(event: &serde_json::Value) -> Vec<String> {
    event["data"]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .map(|e| e["socketId"].as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}
