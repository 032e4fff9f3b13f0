//! UseCase 層のエラー型

use thiserror::Error;

/// 参加者接続のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("connection id '{0}' is already in use")]
    DuplicateConnectionId(String),
}

/// 参加者切断のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error("participant '{0}' is not connected")]
    ParticipantNotFound(String),
}

/// 医師の参加・患者のチェックインのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LobbyError {
    #[error("participant '{0}' is not connected")]
    ParticipantNotFound(String),
}

/// ルーム詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("room not found")]
    RoomNotFound,
}

/// ICE サーバー情報取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetIceServersError {
    #[error("failed to get ICE servers: {0}")]
    ProviderFailed(String),
}
