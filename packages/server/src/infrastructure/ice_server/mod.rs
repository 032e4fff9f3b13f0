//! ICE サーバー情報の取得元
//!
//! - `twilio`: Twilio Network Traversal Service で一時的な TURN 認証情報を発行
//! - `empty`: 認証情報が未設定の場合（クライアントは公開 STUN のみ使う）

mod empty;
mod twilio;

pub use empty::EmptyIceServerProvider;
pub use twilio::TwilioIceServerProvider;
