//! ファクトリ

use uuid::Uuid;

use super::value_object::ConnectionId;

/// 接続 ID の払い出し
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// UUID v4 から新しい接続 ID を生成する
    pub fn generate() -> ConnectionId {
        ConnectionId::from(Uuid::new_v4())
    }
}
