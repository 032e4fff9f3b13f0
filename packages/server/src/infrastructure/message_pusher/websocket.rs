//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を接続 ID で管理
//! - ドメインの `Notification` を JSON のイベントに変換して送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! チャンネルの受信側は接続ごとの送信タスクがソケットへ書き出します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, Notification, PusherChannel},
    infrastructure::dto::websocket::ServerEvent,
};

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender
    ///
    /// Key: 接続 ID
    /// Value: PusherChannel
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 通知を送信用のテキストフレームに変換
    pub fn encode(notification: &Notification) -> Result<String, MessagePushError> {
        serde_json::to_string(&ServerEvent::from(notification))
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Client '{}' registered to MessagePusher", connection_id);
        clients.insert(connection_id, sender);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!("Client '{}' unregistered from MessagePusher", connection_id);
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(notification)?;
        let clients = self.clients.lock().await;

        if let Some(sender) = clients.get(connection_id) {
            sender
                .send(content)
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            tracing::debug!(
                "Pushed '{}' to client '{}'",
                notification.kind(),
                connection_id
            );
            Ok(())
        } else {
            Err(MessagePushError::ClientNotFound(
                connection_id.as_str().to_string(),
            ))
        }
    }

    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(notification)?;
        let clients = self.clients.lock().await;

        for target in targets {
            if let Some(sender) = clients.get(target) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(content.clone()) {
                    tracing::warn!("Failed to push message to client '{}': {}", target, e);
                } else {
                    tracing::debug!(
                        "Broadcasted '{}' to client '{}'",
                        notification.kind(),
                        target
                    );
                }
            } else {
                tracing::warn!("Client '{}' not found during broadcast, skipping", target);
            }
        }

        Ok(())
    }

    async fn clear(&self) {
        let mut clients = self.clients.lock().await;
        clients.clear();
    }
}
