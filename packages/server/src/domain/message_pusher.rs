//! MessagePusher trait 定義
//!
//! クライアントへの通知のインターフェース。
//! 具体的な実装（WebSocket）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, Notification};

/// クライアントへの送信チャンネル（シリアライズ済みのテキストフレーム）
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// クライアントの送信チャンネルを登録解除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定のクライアントに通知
    ///
    /// 宛先が存在しない場合は `MessagePushError::ClientNotFound`
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;

    /// 複数のクライアントに通知（一部の失敗は許容する）
    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        notification: &Notification,
    ) -> Result<(), MessagePushError>;

    /// 登録済みの全チャンネルを破棄
    async fn clear(&self);
}
