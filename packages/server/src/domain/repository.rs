//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! - `ParticipantRepository`: 接続レジストリ（接続 ID → 参加者）
//! - `LobbyRepository`: 待合室ディレクトリ（ルーム ID → 待ち行列）
//!
//! どちらも存在しない ID に対する操作は no-op とし、エラーにはしません
//! （切断とメッセージ処理の順序が前後しても安全に扱うため）。

use async_trait::async_trait;

use super::{ConnectionId, Lobby, LobbyEntry, Participant, RepositoryError, Role, RoomId, Timestamp};

/// `pair` の結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairOutcome {
    /// 新しいペアリングによって通話相手を失った参加者
    pub displaced: Vec<ConnectionId>,
}

/// 接続レジストリ
///
/// `call_partner` は常に対称に保つ（A → B なら B → A）。
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// 参加者を登録（同じ接続 ID が既にあればエラー）
    async fn register(&self, participant: Participant) -> Result<(), RepositoryError>;

    /// 参加者を取得
    async fn get(&self, connection_id: &ConnectionId) -> Option<Participant>;

    /// 役割を設定し、直前の役割を返す（後勝ち）。存在しなければ None
    async fn set_role(&self, connection_id: &ConnectionId, role: Role) -> Option<Role>;

    /// 参加者を削除し、削除した参加者を返す
    ///
    /// 通話相手がいれば、相手側の `call_partner` も同時に解除する。
    async fn remove(&self, connection_id: &ConnectionId) -> Option<Participant>;

    /// 2 人を通話相手として結びつける
    ///
    /// どちらかが既に別の相手と結ばれていれば、その相手の `call_partner` を解除し
    /// `PairOutcome::displaced` として返す。
    async fn pair(
        &self,
        a: &ConnectionId,
        b: &ConnectionId,
    ) -> Result<PairOutcome, RepositoryError>;

    /// 通話相手との結びつきを両側で解除し、直前の相手を返す
    async fn unpair(&self, connection_id: &ConnectionId) -> Option<ConnectionId>;

    /// `a` と `b` が互いに通話相手である場合に限り、両側で解除する。解除した場合は true
    async fn unpair_between(&self, a: &ConnectionId, b: &ConnectionId) -> bool;

    /// ルームに参加している医師の接続 ID 一覧
    async fn find_doctors_in_room(&self, room_id: &RoomId) -> Vec<ConnectionId>;

    /// 接続中の参加者数
    async fn count(&self) -> usize;

    /// 全ての参加者を破棄
    async fn clear(&self);
}

/// 待合室ディレクトリ
///
/// 変更系の操作は変更後のスナップショットを返す。
#[async_trait]
pub trait LobbyRepository: Send + Sync {
    /// ルームの待合室がなければ空で作成し、現在のスナップショットを返す（冪等）
    async fn ensure_room(&self, room_id: &RoomId, created_at: Timestamp) -> Vec<LobbyEntry>;

    /// 待ち行列の末尾にエントリを追加する（ルームがなければ作成）
    async fn check_in(&self, room_id: &RoomId, entry: LobbyEntry) -> Vec<LobbyEntry>;

    /// チェックイン順のスナップショット（ルームがなければ空）
    async fn snapshot(&self, room_id: &RoomId) -> Vec<LobbyEntry>;

    /// 接続 ID のエントリを削除する
    ///
    /// 実際に削除した場合のみ `Some(変更後のスナップショット)` を返す。
    async fn remove(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Option<Vec<LobbyEntry>>;

    /// 全ての待合室（ルーム ID 順）
    async fn get_lobbies(&self) -> Vec<Lobby>;

    /// 指定ルームの待合室
    async fn get_lobby(&self, room_id: &RoomId) -> Option<Lobby>;

    /// 全ての待合室を破棄
    async fn clear(&self);
}
