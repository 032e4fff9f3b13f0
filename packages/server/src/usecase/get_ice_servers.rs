//! UseCase: ICE サーバー情報の取得
//!
//! ## テスト実装の作業記録
//!
//! ### どのような状況を想定しているか
//! - 正常系：取得元が返したリストをそのまま返す
//! - 異常系：取得元のエラーは ProviderFailed に変換する

use std::sync::Arc;

use crate::domain::{IceServer, IceServerProvider};

use super::error::GetIceServersError;

pub struct GetIceServersUseCase {
    provider: Arc<dyn IceServerProvider>,
}

impl GetIceServersUseCase {
    pub fn new(provider: Arc<dyn IceServerProvider>) -> Self {
        Self { provider }
    }

    pub async fn execute(&self) -> Result<Vec<IceServer>, GetIceServersError> {
        match self.provider.fetch_ice_servers().await {
            Ok(servers) => {
                tracing::debug!("Fetched {} ICE server(s)", servers.len());
                Ok(servers)
            }
            Err(e) => {
                tracing::error!("Failed to get ICE servers: {}", e);
                Err(GetIceServersError::ProviderFailed(e.to_string()))
            }
        }
    }
}
