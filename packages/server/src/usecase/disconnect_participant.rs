//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - レジストリ・MessagePusher・待合室からの削除と、医師への通知
//!
//! ### なぜこのテストが必要か
//! - 切断した患者が待合室に残り続けないことを保証する
//! - 通話中の切断で相手側が通話終了を知れることを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：待機中の患者の切断（医師に lobby-updated が 1 回）
//! - 正常系：通話中の切断（相手に call-ended）
//! - 正常系：医師の切断（待合室は変わらない）
//! - 異常系：存在しない参加者の切断試行

use std::sync::Arc;

use crate::domain::{
    ConnectionId, LobbyRepository, MessagePusher, Notification, Participant,
    ParticipantRepository,
};

use super::{error::DisconnectError, lobby_notifier::LobbyNotifier};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    participant_repository: Arc<dyn ParticipantRepository>,
    lobby_repository: Arc<dyn LobbyRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    lobby_notifier: Arc<LobbyNotifier>,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        participant_repository: Arc<dyn ParticipantRepository>,
        lobby_repository: Arc<dyn LobbyRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        lobby_notifier: Arc<LobbyNotifier>,
    ) -> Self {
        Self {
            participant_repository,
            lobby_repository,
            message_pusher,
            lobby_notifier,
        }
    }

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Participant)` - 削除した参加者（削除直前の状態）
    /// * `Err(DisconnectError)` - 参加者が存在しない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Participant, DisconnectError> {
        // 1. 送信チャンネルを先に外す（以降の通知は本人に届かない）
        self.message_pusher.unregister_client(connection_id).await;

        // 2. レジストリから削除
        let participant = self
            .participant_repository
            .remove(connection_id)
            .await
            .ok_or_else(|| {
                DisconnectError::ParticipantNotFound(connection_id.as_str().to_string())
            })?;

        // 3. 待合室に並んでいた場合は外して医師へ通知
        if let Some(room_id) = participant.role.waiting_room()
            && self
                .lobby_repository
                .remove(room_id, connection_id)
                .await
                .is_some()
        {
            self.lobby_notifier.publish(room_id).await;
        }

        // 4. 通話中だった相手に通話終了を通知
        if let Some(partner) = &participant.call_partner
            && let Err(e) = self
                .message_pusher
                .push_to(partner, &Notification::CallEnded)
                .await
        {
            tracing::debug!("Skipped call-ended for '{}': {}", partner, e);
        }

        tracing::info!("Participant '{}' disconnected", connection_id);
        Ok(participant)
    }
}
