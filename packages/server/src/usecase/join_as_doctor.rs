//! UseCase: 医師のルーム参加
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinAsDoctorUseCase::execute() メソッド
//! - 医師の役割設定、待合室の作成、現在の待合室の通知
//!
//! ### どのような状況を想定しているか
//! - 正常系：空のルームへの参加（空のスナップショットを受け取る）
//! - 正常系：医師より先に患者がチェックインしていたルームへの参加
//! - エッジケース：患者として待っていた接続が医師として参加し直す（後勝ち）
//! - 異常系：切断済みの接続からの参加

use std::sync::Arc;

use telecare_shared::time::Clock;

use crate::domain::{
    ConnectionId, LobbyEntry, LobbyRepository, ParticipantRepository, Role, RoomId, Timestamp,
};

use super::{error::LobbyError, lobby_notifier::LobbyNotifier};

/// 医師のルーム参加のユースケース
pub struct JoinAsDoctorUseCase {
    participant_repository: Arc<dyn ParticipantRepository>,
    lobby_repository: Arc<dyn LobbyRepository>,
    lobby_notifier: Arc<LobbyNotifier>,
    clock: Arc<dyn Clock>,
}

impl JoinAsDoctorUseCase {
    pub fn new(
        participant_repository: Arc<dyn ParticipantRepository>,
        lobby_repository: Arc<dyn LobbyRepository>,
        lobby_notifier: Arc<LobbyNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            participant_repository,
            lobby_repository,
            lobby_notifier,
            clock,
        }
    }

    /// 医師としてルームに参加し、参加した医師本人に待合室を通知する
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<LobbyEntry>)` - 通知したスナップショット
    /// * `Err(LobbyError)` - 接続が既に存在しない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
    ) -> Result<Vec<LobbyEntry>, LobbyError> {
        // 1. 役割を医師に設定（後勝ち）
        let previous = self
            .participant_repository
            .set_role(
                connection_id,
                Role::Doctor {
                    room_id: room_id.clone(),
                },
            )
            .await
            .ok_or_else(|| LobbyError::ParticipantNotFound(connection_id.as_str().to_string()))?;

        // 2. 患者として待っていた場合は待合室から外す
        if let Some(waiting_room) = previous.waiting_room()
            && self
                .lobby_repository
                .remove(waiting_room, connection_id)
                .await
                .is_some()
        {
            self.lobby_notifier.publish(waiting_room).await;
        }

        // 3. 待合室を用意し、本人に現在の待ち行列を送る
        self.lobby_repository
            .ensure_room(&room_id, Timestamp::new(self.clock.now_millis()))
            .await;
        let entries = self.lobby_notifier.publish_to(&room_id, connection_id).await;

        tracing::info!(
            "Doctor '{}' joined room '{}' ({} waiting)",
            connection_id,
            room_id,
            entries.len()
        );
        Ok(entries)
    }
}
