//! API client for the dashboard backend.
//!
//! Thin reqwest wrapper enforcing a bounded request timeout, optional bearer
//! auth, and a closed error taxonomy the polling layer maps onto per-category
//! error flags.

mod actions;

pub use actions::*;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Default outbound request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client error types.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid response body: {0}")]
    Validation(String),
}

/// HTTP client bound to a single backend origin.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl ApiClient {
    /// Create a client for the given origin, e.g. `http://localhost:8000`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: None,
        })
    }

    /// Attach a bearer token to every outbound request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Drop the stored bearer token. Callers do this on `Unauthorized` so a
    /// revoked token is not re-sent.
    pub fn clear_token(&mut self) {
        self.auth_token = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// GET `path` and decode the JSON body into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .apply_auth(self.http.get(self.url(path)))
            .send()
            .await
            .map_err(map_transport_error)?;

        let response = check_status(response).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Validation(e.to_string()))
    }

    /// POST `body` as JSON to `path`, discarding any response body.
    pub async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ClientError> {
        let response = self
            .apply_auth(self.http.post(self.url(path)).json(body))
            .send()
            .await
            .map_err(map_transport_error)?;

        check_status(response).await?;
        Ok(())
    }

    /// POST to `path` with no body.
    pub async fn post_empty(&self, path: &str) -> Result<(), ClientError> {
        let response = self
            .apply_auth(self.http.post(self.url(path)))
            .send()
            .await
            .map_err(map_transport_error)?;

        check_status(response).await?;
        Ok(())
    }
}

fn map_transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout(REQUEST_TIMEOUT)
    } else {
        ClientError::Network(e.to_string())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Http {
        status: status.as_u16(),
        message: extract_error_message(&body),
    })
}

/// Pull a human-readable message out of an error body, preferring the
/// conventional `message` then `detail` JSON fields over the raw text.
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "detail"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }

    if body.is_empty() {
        "an unexpected error occurred".to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.url("/api/activity"), "http://localhost:8000/api/activity");
    }

    #[test]
    fn test_extract_error_message_prefers_message_field() {
        assert_eq!(
            extract_error_message(r#"{"message":"boom","detail":"other"}"#),
            "boom"
        );
        assert_eq!(extract_error_message(r#"{"detail":"not found"}"#), "not found");
        assert_eq!(extract_error_message("plain text"), "plain text");
        assert_eq!(extract_error_message(""), "an unexpected error occurred");
    }

    #[tokio::test]
    async fn test_get_json_maps_connection_refused_to_network() {
        // Port 9 (discard) is assumed closed.
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let result: Result<serde_json::Value, _> = client.get_json("/api/activity").await;

        match result {
            Err(ClientError::Network(_)) | Err(ClientError::Timeout(_)) => {}
            other => panic!("expected transport error, got {:?}", other.map(|_| ())),
        }
    }

    use axum::http::HeaderMap;
    use axum::response::Json;
    use axum::routing::get;
    use axum::Router;
    use tokio::net::TcpListener;

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_bearer_token_attached_until_cleared() {
        let router = Router::new().route(
            "/api/echo",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                Json(serde_json::json!({ "auth": auth }))
            }),
        );
        let base = serve(router).await;

        let mut client = ApiClient::new(&base).unwrap().with_token("sekrit");
        let echoed: serde_json::Value = client.get_json("/api/echo").await.unwrap();
        assert_eq!(echoed["auth"], "Bearer sekrit");

        client.clear_token();
        let echoed: serde_json::Value = client.get_json("/api/echo").await.unwrap();
        assert_eq!(echoed["auth"], "");
    }

    #[tokio::test]
    async fn test_http_error_carries_extracted_message() {
        let router = Router::new().route(
            "/api/boom",
            get(|| async {
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "message": "kaboom" })),
                )
            }),
        );
        let base = serve(router).await;

        let client = ApiClient::new(&base).unwrap();
        let err = client.get_json::<serde_json::Value>("/api/boom").await.unwrap_err();
        match err {
            ClientError::Http { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "kaboom");
            }
            other => panic!("expected Http error, got {}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_validation_error() {
        let router = Router::new().route("/api/garbage", get(|| async { "not json" }));
        let base = serve(router).await;

        let client = ApiClient::new(&base).unwrap();
        let err = client
            .get_json::<crate::mock::SystemStatus>("/api/garbage")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }
}
