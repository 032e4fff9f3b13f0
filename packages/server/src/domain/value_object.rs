//! 値オブジェクト
//!
//! 生成時にバリデーションを行い、不正な値がドメイン層に入り込まないようにします。

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValueObjectError;

/// RoomId の最大文字数
pub const ROOM_ID_MAX_LENGTH: usize = 128;

/// DisplayName の最大文字数
pub const DISPLAY_NAME_MAX_LENGTH: usize = 100;

/// 接続 ID
///
/// 接続ごとにサーバーが払い出す不透明な識別子。再接続すると別の ID になる。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyConnectionId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

// UUID の文字列表現は空にならない
impl From<Uuid> for ConnectionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// ルーム ID（医師が指定する文字列）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    /// 値はそのまま保持する（空白だけの ID は不正）
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyRoomId);
        }
        if value.chars().count() > ROOM_ID_MAX_LENGTH {
            return Err(ValueObjectError::RoomIdTooLong {
                max: ROOM_ID_MAX_LENGTH,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 患者の表示名（一意である必要はない）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyDisplayName);
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX_LENGTH {
            return Err(ValueObjectError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// シグナリングのペイロード（SDP offer / answer, ICE candidate）
///
/// サーバーは中身を解釈せず、そのまま転送する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalPayload(serde_json::Value);

impl SignalPayload {
    pub fn new(value: serde_json::Value) -> Result<Self, ValueObjectError> {
        if value.is_null() {
            return Err(ValueObjectError::NullPayload);
        }
        Ok(Self(value))
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

/// Unix タイムスタンプ（UTC, ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
