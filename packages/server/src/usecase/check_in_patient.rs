//! UseCase: 患者のチェックイン
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CheckInPatientUseCase::execute() メソッド
//! - 待合室への追加と、ルームの医師への全量スナップショット通知
//!
//! ### どのような状況を想定しているか
//! - 正常系：医師のいるルームへのチェックイン（医師に 1 回通知）
//! - 正常系：医師のいないルームへのチェックイン（ルームが暗黙に作られる）
//! - エッジケース：同名の患者（重複排除しない）
//! - エッジケース：同じ接続の再チェックイン（別ルームへ移動）

use std::sync::Arc;

use telecare_shared::time::Clock;

use crate::domain::{
    ConnectionId, DisplayName, LobbyEntry, LobbyRepository, ParticipantRepository, Role, RoomId,
    Timestamp,
};

use super::{error::LobbyError, lobby_notifier::LobbyNotifier};

/// 患者チェックインのユースケース
pub struct CheckInPatientUseCase {
    participant_repository: Arc<dyn ParticipantRepository>,
    lobby_repository: Arc<dyn LobbyRepository>,
    lobby_notifier: Arc<LobbyNotifier>,
    clock: Arc<dyn Clock>,
}

impl CheckInPatientUseCase {
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

    /// 患者としてルームの待合室に並び、ルームの医師へ通知する
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<LobbyEntry>)` - チェックイン後の待合室
    /// * `Err(LobbyError)` - 接続が既に存在しない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
        name: DisplayName,
    ) -> Result<Vec<LobbyEntry>, LobbyError> {
        // 1. 役割を患者に設定（後勝ち）
        let previous = self
            .participant_repository
            .set_role(
                connection_id,
                Role::Patient {
                    room_id: room_id.clone(),
                    name: name.clone(),
                },
            )
            .await
            .ok_or_else(|| LobbyError::ParticipantNotFound(connection_id.as_str().to_string()))?;

        // 2. 別のルームで待っていた場合はそちらから外す
        if let Some(waiting_room) = previous.waiting_room()
            && waiting_room != &room_id
            && self
                .lobby_repository
                .remove(waiting_room, connection_id)
                .await
                .is_some()
        {
            self.lobby_notifier.publish(waiting_room).await;
        }

        // 3. 待ち行列に追加して医師へ通知
        let entry = LobbyEntry::new(
            connection_id.clone(),
            name.clone(),
            Timestamp::new(self.clock.now_millis()),
        );
        self.lobby_repository.check_in(&room_id, entry).await;
        let entries = self.lobby_notifier.publish(&room_id).await;

        tracing::info!(
            "Patient '{}' ({}) is waiting in room '{}'",
            name.as_str(),
            connection_id,
            room_id
        );
        Ok(entries)
    }
}
