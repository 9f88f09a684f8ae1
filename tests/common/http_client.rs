//! HTTP client helpers for tests.

use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

/// Status, content type and parsed JSON body of one response.
#[derive(Debug)]
pub struct JsonReply {
    pub status: u16,
    pub content_type: String,
    pub body: serde_json::Value,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    pub async fn health(&self) -> Result<JsonReply, TestClientError> {
        self.request(reqwest::Method::GET, "/health", None).await
    }

    pub async fn rerank(&self, body: &serde_json::Value) -> Result<JsonReply, TestClientError> {
        self.request(reqwest::Method::POST, "/rerank", Some(body.to_string()))
            .await
    }

    pub async fn rerank_raw(&self, body: impl Into<String>) -> Result<JsonReply, TestClientError> {
        self.request(reqwest::Method::POST, "/rerank", Some(body.into()))
            .await
    }

    pub async fn request(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<String>,
    ) -> Result<JsonReply, TestClientError> {
        let mut builder = self
            .client
            .request(method, self.url(path))
            .header("Content-Type", "application/json");
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let resp = builder.send().await?;

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get("content-type")
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let text = resp.text().await?;
        let body = serde_json::from_str(&text)
            .map_err(|e| TestClientError::NotJson(format!("{e}: {text}")))?;

        Ok(JsonReply {
            status,
            content_type,
            body,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("response body is not JSON: {0}")]
    NotJson(String),
}
