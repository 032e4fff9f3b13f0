//! サーバーからクライアントへ送る通知（ドメインイベント）
//!
//! 送信形式（JSON）への変換は Infrastructure 層の DTO が担当します。

use super::{
    entity::LobbyEntry,
    value_object::{ConnectionId, SignalPayload},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// 接続直後に自分の接続 ID を知らせる
    Connected { connection_id: ConnectionId },
    /// 待合室の全量スナップショット（差分ではない）
    LobbyUpdated { entries: Vec<LobbyEntry> },
    /// 医師からの着信（offer）
    CallIncoming {
        from_doctor: ConnectionId,
        offer: SignalPayload,
    },
    /// 患者からの応答（answer）
    CallAnswered {
        from_patient: ConnectionId,
        answer: SignalPayload,
    },
    IceCandidate {
        from: ConnectionId,
        candidate: SignalPayload,
    },
    CallDeclined,
    CallEnded,
}

impl Notification {
    /// ログ出力用のイベント名
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::Connected { .. } => "connected",
            Notification::LobbyUpdated { .. } => "lobby-updated",
            Notification::CallIncoming { .. } => "call-incoming-from-doctor",
            Notification::CallAnswered { .. } => "call-answered-by-patient",
            Notification::IceCandidate { .. } => "receive-ice-candidate",
            Notification::CallDeclined => "call-declined-by-patient",
            Notification::CallEnded => "call-ended",
        }
    }
}
