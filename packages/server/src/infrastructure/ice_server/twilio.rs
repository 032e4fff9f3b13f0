//! Twilio Network Traversal Service を使った IceServerProvider 実装
//!
//! `POST /2010-04-01/Accounts/{AccountSid}/Tokens.json` を Basic 認証で呼び出し、
//! レスポンスの `ice_servers` を返します。

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{IceServer, IceServerError, IceServerProvider};

const TWILIO_API_BASE_URL: &str = "https://api.twilio.com";

/// Twilio のトークン発行レスポンス（必要なフィールドのみ）
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    ice_servers: Vec<TwilioIceServer>,
}

#[derive(Debug, Deserialize)]
struct TwilioIceServer {
    url: Option<String>,
    urls: Option<String>,
    username: Option<String>,
    credential: Option<String>,
}

impl TokenResponse {
    fn into_ice_servers(self) -> Vec<IceServer> {
        self.ice_servers
            .into_iter()
            .filter_map(|server| {
                let url = server.urls.or(server.url)?;
                Some(IceServer {
                    urls: vec![url],
                    username: server.username,
                    credential: server.credential,
                })
            })
            .collect()
    }
}

pub struct TwilioIceServerProvider {
    client: reqwest::Client,
    account_sid: String,
    auth_token: String,
    base_url: String,
}

impl TwilioIceServerProvider {
    pub fn new(account_sid: String, auth_token: String) -> Self {
        Self::with_base_url(account_sid, auth_token, TWILIO_API_BASE_URL.to_string())
    }

    /// API のベース URL を差し替える（テスト用のローカルサーバーなど）
    pub fn with_base_url(account_sid: String, auth_token: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            account_sid,
            auth_token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn tokens_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Tokens.json",
            self.base_url, self.account_sid
        )
    }
}

#[async_trait]
impl IceServerProvider for TwilioIceServerProvider {
    async fn fetch_ice_servers(&self) -> Result<Vec<IceServer>, IceServerError> {
        let response = self
            .client
            .post(self.tokens_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .send()
            .await
            .map_err(|e| IceServerError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IceServerError::UnexpectedStatus(status.as_u16()));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| IceServerError::InvalidResponse(e.to_string()))?;

        let servers = token.into_ice_servers();
        tracing::debug!("Issued {} ICE servers from Twilio", servers.len());
        Ok(servers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        http::{HeaderMap, StatusCode, header},
        routing::post,
    };
    use serde_json::json;

    const SAMPLE_RESPONSE: &str = r#"{
        "account_sid": "ACxxxx",
        "ttl": "86400",
        "ice_servers": [
            {"url": "stun:global.stun.twilio.com:3478", "urls": "stun:global.stun.twilio.com:3478"},
            {"url": "turn:global.turn.twilio.com:3478?transport=udp", "username": "user", "credential": "secret"},
            {"username": "orphan"}
        ]
    }"#;

    /// Twilio の代わりにローカルで応答するサーバーを起動し、ベース URL を返す
    async fn spawn_fake_twilio(status: StatusCode) -> String {
        let app = Router::new().route(
            "/2010-04-01/Accounts/{sid}/Tokens.json",
            post(move |headers: HeaderMap| async move {
                let authorized = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .is_some_and(|v| v.starts_with("Basic "));
                if !authorized {
                    return (StatusCode::UNAUTHORIZED, Json(json!({})));
                }
                let body: serde_json::Value = serde_json::from_str(SAMPLE_RESPONSE).unwrap();
                (status, Json(body))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_token_response_into_ice_servers() {
        // テスト項目: urls / url のどちらかを持つエントリだけが ICE サーバーになる
        // given (前提条件):
        let token: TokenResponse = serde_json::from_str(SAMPLE_RESPONSE).unwrap();

        // when (操作):
        let servers = token.into_ice_servers();

        // then (期待する結果):
        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].urls, vec!["stun:global.stun.twilio.com:3478"]);
        assert_eq!(servers[0].username, None);
        assert_eq!(
            servers[1].urls,
            vec!["turn:global.turn.twilio.com:3478?transport=udp"]
        );
        assert_eq!(servers[1].username.as_deref(), Some("user"));
        assert_eq!(servers[1].credential.as_deref(), Some("secret"));
    }

    #[test]
    fn test_tokens_url() {
        // テスト項目: アカウント SID を含むトークン発行 URL が組み立てられる
        // given (前提条件):
        let provider = TwilioIceServerProvider::with_base_url(
            "AC123".to_string(),
            "token".to_string(),
            "http://localhost:9999/".to_string(),
        );

        // when (操作):
        let url = provider.tokens_url();

        // then (期待する結果):
        assert_eq!(
            url,
            "http://localhost:9999/2010-04-01/Accounts/AC123/Tokens.json"
        );
    }

    #[tokio::test]
    async fn test_fetch_ice_servers_success() {
        // テスト項目: Basic 認証付きでトークンを発行し、ICE サーバー一覧を返す
        // given (前提条件):
        let base_url = spawn_fake_twilio(StatusCode::CREATED).await;
        let provider =
            TwilioIceServerProvider::with_base_url("AC123".to_string(), "token".to_string(), base_url);

        // when (操作):
        let result = provider.fetch_ice_servers().await;

        // then (期待する結果):
        let servers = result.unwrap();
        assert_eq!(servers.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_ice_servers_unexpected_status() {
        // テスト項目: 2xx 以外の応答は UnexpectedStatus になる
        // given (前提条件):
        let base_url = spawn_fake_twilio(StatusCode::INTERNAL_SERVER_ERROR).await;
        let provider =
            TwilioIceServerProvider::with_base_url("AC123".to_string(), "token".to_string(), base_url);

        // when (操作):
        let result = provider.fetch_ice_servers().await;

        // then (期待する結果):
        assert_eq!(result, Err(IceServerError::UnexpectedStatus(500)));
    }
}
