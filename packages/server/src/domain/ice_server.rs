//! ICE サーバー（STUN/TURN）情報の取得
//!
//! ネットワーク環境によって P2P 接続が張れない場合にクライアントが使う
//! 追加のリレーサーバー情報を外部サービスから取得します。

use async_trait::async_trait;

use super::IceServerError;

/// ICE サーバーの記述（RTCIceServer 相当）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IceServer {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IceServerProvider: Send + Sync {
    async fn fetch_ice_servers(&self) -> Result<Vec<IceServer>, IceServerError>;
}
