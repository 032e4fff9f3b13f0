use async_trait::async_trait;

use crate::domain::{IceServer, IceServerError, IceServerProvider};

/// 追加の ICE サーバーを返さない Provider
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyIceServerProvider;

#[async_trait]
impl IceServerProvider for EmptyIceServerProvider {
    async fn fetch_ice_servers(&self) -> Result<Vec<IceServer>, IceServerError> {
        Ok(Vec::new())
    }
}
