//! InMemory 待合室ディレクトリ実装
//!
//! ドメイン層が定義する LobbyRepository trait の具体的な実装。
//! ルームは最初の参照（医師の参加・患者のチェックイン）で暗黙に作成され、
//! 空になっても削除しません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, Lobby, LobbyEntry, LobbyRepository, RoomId, Timestamp};

/// インメモリ待合室ディレクトリ
#[derive(Default)]
pub struct InMemoryLobbyRepository {
    /// Key: ルーム ID, Value: 待合室
    lobbies: Mutex<HashMap<RoomId, Lobby>>,
}

impl InMemoryLobbyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LobbyRepository for InMemoryLobbyRepository {
    async fn ensure_room(&self, room_id: &RoomId, created_at: Timestamp) -> Vec<LobbyEntry> {
        let mut lobbies = self.lobbies.lock().await;
        lobbies
            .entry(room_id.clone())
            .or_insert_with(|| Lobby::new(room_id.clone(), created_at))
            .snapshot()
    }

    async fn check_in(&self, room_id: &RoomId, entry: LobbyEntry) -> Vec<LobbyEntry> {
        let mut lobbies = self.lobbies.lock().await;
        let lobby = lobbies
            .entry(room_id.clone())
            .or_insert_with(|| Lobby::new(room_id.clone(), entry.checked_in_at));
        lobby.check_in(entry);
        lobby.snapshot()
    }

    async fn snapshot(&self, room_id: &RoomId) -> Vec<LobbyEntry> {
        let lobbies = self.lobbies.lock().await;
        lobbies
            .get(room_id)
            .map(Lobby::snapshot)
            .unwrap_or_default()
    }

    async fn remove(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Option<Vec<LobbyEntry>> {
        let mut lobbies = self.lobbies.lock().await;
        let lobby = lobbies.get_mut(room_id)?;
        lobby.remove(connection_id).then(|| lobby.snapshot())
    }

    async fn get_lobbies(&self) -> Vec<Lobby> {
        let lobbies = self.lobbies.lock().await;
        let mut result: Vec<Lobby> = lobbies.values().cloned().collect();
        result.sort_by(|a, b| a.room_id.as_str().cmp(b.room_id.as_str()));
        result
    }

    async fn get_lobby(&self, room_id: &RoomId) -> Option<Lobby> {
        let lobbies = self.lobbies.lock().await;
        lobbies.get(room_id).cloned()
    }

    async fn clear(&self) {
        let mut lobbies = self.lobbies.lock().await;
        lobbies.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DisplayName;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - 待合室の作成（冪等）・チェックイン・スナップショット・削除
    //
    // 【どのようなシナリオをテストするか】
    // 1. N 回のチェックイン後、スナップショットが N 件・チェックイン順
    // 2. 存在しない接続 ID の削除は no-op
    // 3. 医師の参加前にチェックインした患者が ensure_room で見える
    // ========================================

    fn id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    fn room(value: &str) -> RoomId {
        RoomId::new(value.to_string()).unwrap()
    }

    fn entry(connection_id: &str, name: &str, at: i64) -> LobbyEntry {
        LobbyEntry::new(
            id(connection_id),
            DisplayName::new(name.to_string()).unwrap(),
            Timestamp::new(at),
        )
    }

    fn ids(entries: &[LobbyEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.connection_id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_ensure_room_is_idempotent() {
        // テスト項目: ensure_room を何度呼んでも待合室は 1 つで、作成時刻は最初のまま
        // given (前提条件):
        let repo = InMemoryLobbyRepository::new();

        // when (操作):
        let first = repo.ensure_room(&room("R1"), Timestamp::new(100)).await;
        let second = repo.ensure_room(&room("R1"), Timestamp::new(200)).await;

        // then (期待する結果):
        assert!(first.is_empty());
        assert!(second.is_empty());
        let lobbies = repo.get_lobbies().await;
        assert_eq!(lobbies.len(), 1);
        assert_eq!(lobbies[0].created_at, Timestamp::new(100));
    }

    #[tokio::test]
    async fn test_snapshot_after_n_check_ins_is_in_order() {
        // テスト項目: N 回チェックインするとスナップショットは N 件・チェックイン順
        // given (前提条件):
        let repo = InMemoryLobbyRepository::new();
        let names = ["p0", "p1", "p2", "p3", "p4"];

        // when (操作):
        for (i, name) in names.iter().enumerate() {
            repo.check_in(&room("R1"), entry(name, "Same Name", i as i64))
                .await;
        }
        let snapshot = repo.snapshot(&room("R1")).await;

        // then (期待する結果):
        assert_eq!(snapshot.len(), names.len());
        assert_eq!(ids(&snapshot), names.to_vec());
    }

    #[tokio::test]
    async fn test_check_in_returns_post_mutation_snapshot() {
        // テスト項目: check_in は変更後のスナップショットを返す
        // given (前提条件):
        let repo = InMemoryLobbyRepository::new();
        repo.check_in(&room("R1"), entry("a", "Ann", 1)).await;

        // when (操作):
        let snapshot = repo.check_in(&room("R1"), entry("b", "Bob", 2)).await;

        // then (期待する結果):
        assert_eq!(ids(&snapshot), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_check_in_before_doctor_is_visible_on_ensure_room() {
        // テスト項目: 医師の参加前にチェックインした患者が ensure_room の結果に含まれる
        // given (前提条件):
        let repo = InMemoryLobbyRepository::new();
        repo.check_in(&room("R1"), entry("a", "Ann", 1)).await;
        repo.check_in(&room("R1"), entry("b", "Bob", 2)).await;

        // when (操作):
        let snapshot = repo.ensure_room(&room("R1"), Timestamp::new(3)).await;

        // then (期待する結果):
        assert_eq!(ids(&snapshot), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_remove_existing_entry() {
        // テスト項目: 該当エントリだけが削除され、変更後のスナップショットが返る
        // given (前提条件):
        let repo = InMemoryLobbyRepository::new();
        repo.check_in(&room("R1"), entry("a", "Ann", 1)).await;
        repo.check_in(&room("R1"), entry("b", "Bob", 2)).await;
        repo.check_in(&room("R1"), entry("c", "Cid", 3)).await;

        // when (操作):
        let result = repo.remove(&room("R1"), &id("b")).await;

        // then (期待する結果):
        assert_eq!(result.as_deref().map(ids), Some(vec!["a", "c"]));
        assert_eq!(ids(&repo.snapshot(&room("R1")).await), vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_remove_absent_entry_is_noop() {
        // テスト項目: 存在しない接続 ID・ルームの削除は None で、待合室は変わらない
        // given (前提条件):
        let repo = InMemoryLobbyRepository::new();
        repo.check_in(&room("R1"), entry("a", "Ann", 1)).await;

        // when (操作):
        let absent_entry = repo.remove(&room("R1"), &id("zzz")).await;
        let absent_room = repo.remove(&room("R9"), &id("a")).await;

        // then (期待する結果):
        assert_eq!(absent_entry, None);
        assert_eq!(absent_room, None);
        assert_eq!(ids(&repo.snapshot(&room("R1")).await), vec!["a"]);
    }

    #[tokio::test]
    async fn test_empty_room_persists_after_last_removal() {
        // テスト項目: 最後の患者が抜けても待合室（空）は残る
        // given (前提条件):
        let repo = InMemoryLobbyRepository::new();
        repo.check_in(&room("R1"), entry("a", "Ann", 1)).await;

        // when (操作):
        let result = repo.remove(&room("R1"), &id("a")).await;

        // then (期待する結果):
        assert_eq!(result, Some(vec![]));
        assert!(repo.get_lobby(&room("R1")).await.is_some());
    }

    #[tokio::test]
    async fn test_get_lobbies_sorted_and_clear() {
        // テスト項目: 待合室一覧はルーム ID 順で、clear で全て破棄される
        // given (前提条件):
        let repo = InMemoryLobbyRepository::new();
        repo.ensure_room(&room("R2"), Timestamp::new(1)).await;
        repo.ensure_room(&room("R1"), Timestamp::new(2)).await;

        // when (操作):
        let lobbies = repo.get_lobbies().await;
        repo.clear().await;

        // then (期待する結果):
        let room_ids: Vec<&str> = lobbies.iter().map(|l| l.room_id.as_str()).collect();
        assert_eq!(room_ids, vec!["R1", "R2"]);
        assert!(repo.get_lobbies().await.is_empty());
    }
}
