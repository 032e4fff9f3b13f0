//! ドメイン層のエラー型

use thiserror::Error;

/// 値オブジェクトの生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("connection id must not be empty")]
    EmptyConnectionId,

    #[error("room id must not be empty")]
    EmptyRoomId,

    #[error("room id must be at most {max} characters")]
    RoomIdTooLong { max: usize },

    #[error("display name must not be empty")]
    EmptyDisplayName,

    #[error("display name must be at most {max} characters")]
    DisplayNameTooLong { max: usize },

    #[error("signal payload must not be null")]
    NullPayload,
}

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("connection '{0}' is already registered")]
    DuplicateConnection(String),

    #[error("participant '{0}' not found")]
    ParticipantNotFound(String),

    #[error("participant '{0}' cannot be paired with itself")]
    SelfPairing(String),
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// ICE サーバー情報取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IceServerError {
    #[error("request to credential provider failed: {0}")]
    Request(String),

    #[error("credential provider returned status {0}")]
    UnexpectedStatus(u16),

    #[error("invalid response from credential provider: {0}")]
    InvalidResponse(String),
}
