//! エンティティ
//!
//! - `Participant`: 接続中の参加者（接続レジストリの 1 レコード）
//! - `Lobby`: ルームごとの待合室（患者の待ち行列）

use super::value_object::{ConnectionId, DisplayName, RoomId, Timestamp};

/// 参加者の役割
///
/// 接続直後は `Unknown`。医師の参加・患者のチェックインで確定する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Unknown,
    Doctor { room_id: RoomId },
    Patient { room_id: RoomId, name: DisplayName },
}

impl Role {
    /// 医師・待機中の患者が紐づくルーム
    pub fn room_id(&self) -> Option<&RoomId> {
        match self {
            Role::Unknown => None,
            Role::Doctor { room_id } | Role::Patient { room_id, .. } => Some(room_id),
        }
    }

    pub fn is_doctor_of(&self, room: &RoomId) -> bool {
        matches!(self, Role::Doctor { room_id } if room_id == room)
    }

    /// 患者としてロビーに並んでいるルーム
    pub fn waiting_room(&self) -> Option<&RoomId> {
        match self {
            Role::Patient { room_id, .. } => Some(room_id),
            _ => None,
        }
    }
}

/// 接続中の参加者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ConnectionId,
    pub role: Role,
    /// 通話相手（通話中のみ Some。相手側も必ずこちらを指す）
    pub call_partner: Option<ConnectionId>,
    pub connected_at: Timestamp,
}

impl Participant {
    pub fn new(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            role: Role::Unknown,
            call_partner: None,
            connected_at,
        }
    }
}

/// 待合室の 1 エントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyEntry {
    pub connection_id: ConnectionId,
    pub display_name: DisplayName,
    pub checked_in_at: Timestamp,
}

impl LobbyEntry {
    pub fn new(
        connection_id: ConnectionId,
        display_name: DisplayName,
        checked_in_at: Timestamp,
    ) -> Self {
        Self {
            connection_id,
            display_name,
            checked_in_at,
        }
    }
}

/// ルームの待合室
///
/// エントリはチェックイン順に並ぶ。同じ接続 ID のエントリは高々 1 つ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lobby {
    pub room_id: RoomId,
    pub entries: Vec<LobbyEntry>,
    pub created_at: Timestamp,
}

impl Lobby {
    pub fn new(room_id: RoomId, created_at: Timestamp) -> Self {
        Self {
            room_id,
            entries: Vec::new(),
            created_at,
        }
    }

    /// エントリを末尾に追加する
    ///
    /// 同じ接続 ID が既に並んでいる場合は位置を保ったまま表示名だけ更新する。
    /// 表示名による重複排除はしない。
    pub fn check_in(&mut self, entry: LobbyEntry) {
        match self
            .entries
            .iter_mut()
            .find(|e| e.connection_id == entry.connection_id)
        {
            Some(existing) => existing.display_name = entry.display_name,
            None => self.entries.push(entry),
        }
    }

    /// 接続 ID に一致するエントリを削除する。削除した場合は true
    pub fn remove(&mut self, connection_id: &ConnectionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| &e.connection_id != connection_id);
        self.entries.len() != before
    }

    /// チェックイン順のスナップショット
    pub fn snapshot(&self) -> Vec<LobbyEntry> {
        self.entries.clone()
    }
}
