//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 接続 ID の払い出し、レジストリと MessagePusher への登録
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続は役割 Unknown で登録され、connected イベントを受け取る
//! - 正常系：接続ごとに異なる ID が払い出される

use std::sync::Arc;

use telecare_shared::time::Clock;

use crate::domain::{
    ConnectionId, ConnectionIdFactory, MessagePusher, Notification, Participant,
    ParticipantRepository, PusherChannel, Timestamp,
};

use super::error::ConnectError;

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// 接続レジストリ
    repository: Arc<dyn ParticipantRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn ParticipantRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(ConnectionId)` - 払い出した接続 ID
    /// * `Err(ConnectError)` - 接続失敗
    pub async fn execute(&self, sender: PusherChannel) -> Result<ConnectionId, ConnectError> {
        let connection_id = ConnectionIdFactory::generate();
        let connected_at = Timestamp::new(self.clock.now_millis());

        // 1. レジストリに登録（役割は Unknown）
        self.repository
            .register(Participant::new(connection_id.clone(), connected_at))
            .await
            .map_err(|_| ConnectError::DuplicateConnectionId(connection_id.as_str().to_string()))?;

        // 2. MessagePusher に送信チャンネルを登録
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;

        // 3. 払い出した ID を本人に通知
        let notification = Notification::Connected {
            connection_id: connection_id.clone(),
        };
        if let Err(e) = self
            .message_pusher
            .push_to(&connection_id, &notification)
            .await
        {
            tracing::warn!("Failed to send connected event to '{}': {}", connection_id, e);
        }

        Ok(connection_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::Role,
        usecase::test_support::{NOW, TestContext, drain, event_names},
    };
    use tokio::sync::mpsc;

    fn create_usecase(ctx: &TestContext) -> ConnectParticipantUseCase {
        ConnectParticipantUseCase::new(
            ctx.participants.clone(),
            ctx.pusher.clone(),
            ctx.clock.clone(),
        )
    }

    #[tokio::test]
    async fn test_connect_participant_success() {
        // テスト項目: 新規接続が役割 Unknown で登録され、connected イベントを受け取る
        // given (前提条件):
        let ctx = TestContext::new();
        let usecase = create_usecase(&ctx);
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        let connection_id = usecase.execute(tx).await.unwrap();

        // then (期待する結果):
        let participant = ctx.participants.get(&connection_id).await.unwrap();
        assert_eq!(participant.role, Role::Unknown);
        assert_eq!(participant.connected_at, Timestamp::new(NOW));

        let events = drain(&mut rx);
        assert_eq!(event_names(&events), vec!["connected"]);
        assert_eq!(events[0]["data"]["connectionId"], connection_id.as_str());
    }

    #[tokio::test]
    async fn test_connect_assigns_distinct_ids() {
        // テスト項目: 接続ごとに異なる接続 ID が払い出される
        // given (前提条件):
        let ctx = TestContext::new();
        let usecase = create_usecase(&ctx);
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        // when (操作):
        let id1 = usecase.execute(tx1).await.unwrap();
        let id2 = usecase.execute(tx2).await.unwrap();

        // then (期待する結果):
        assert_ne!(id1, id2);
        assert_eq!(ctx.participants.count().await, 2);
    }
}
