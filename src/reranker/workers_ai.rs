use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::error::RerankerError;
use super::types::{RerankInput, RerankResult};
use super::RerankBackend;
use crate::constants::{DEFAULT_API_BASE, DEFAULT_RERANK_MODEL};

#[derive(Debug, Clone)]
pub struct WorkersAiConfig {
    pub account_id: String,
    pub api_token: String,
    pub model: String,
    pub api_base: String,
}

impl WorkersAiConfig {
    pub fn new(account_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            api_token: api_token.into(),
            model: DEFAULT_RERANK_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// `{api_base}/accounts/{account_id}/ai/run/{model}`
    pub fn run_url(&self) -> String {
        format!(
            "{}/accounts/{}/ai/run/{}",
            self.api_base.trim_end_matches('/'),
            self.account_id,
            self.model
        )
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.account_id.trim().is_empty() {
            return Err("account_id cannot be empty".to_string());
        }
        if self.api_token.trim().is_empty() {
            return Err("api_token cannot be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model cannot be empty".to_string());
        }
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(format!(
                "api_base must be an http(s) URL, got '{}'",
                self.api_base
            ));
        }
        Ok(())
    }
}

/// Calls a Workers AI reranking model over the Cloudflare REST API.
#[derive(Clone)]
pub struct WorkersAiReranker {
    config: WorkersAiConfig,
    run_url: String,
    client: Client,
}

impl std::fmt::Debug for WorkersAiReranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkersAiReranker")
            .field("account_id", &self.config.account_id)
            .field("model", &self.config.model)
            .field("run_url", &self.run_url)
            .finish()
    }
}

impl WorkersAiReranker {
    pub fn new(config: WorkersAiConfig) -> Result<Self, RerankerError> {
        if let Err(reason) = config.validate() {
            return Err(RerankerError::InvalidConfig { reason });
        }

        let client = Client::builder().build()?;
        let run_url = config.run_url();
        Ok(Self {
            config,
            run_url,
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

impl RerankBackend for WorkersAiReranker {
    fn name(&self) -> &'static str {
        "workers-ai"
    }

    #[instrument(skip(self, input), fields(model = %self.config.model, contexts = input.contexts.len()))]
    async fn rerank(&self, input: RerankInput) -> Result<RerankResult, RerankerError> {
        let res = self
            .client
            .post(&self.run_url)
            .bearer_auth(&self.config.api_token)
            .json(&input)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(RerankerError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = res.bytes().await?;
        let envelope: WorkersAiEnvelope =
            serde_json::from_slice(&bytes).map_err(|e| RerankerError::InvalidResponse {
                reason: e.to_string(),
            })?;

        let result = envelope.into_result()?;
        debug!("Workers AI rerank succeeded");
        Ok(RerankResult(result))
    }
}

#[derive(Debug, Deserialize)]
struct WorkersAiEnvelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    errors: Vec<WorkersAiMessage>,
}

#[derive(Debug, Deserialize)]
struct WorkersAiMessage {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: String,
}

impl WorkersAiEnvelope {
    fn into_result(self) -> Result<Value, RerankerError> {
        if self.success == Some(false) {
            let reason = if self.errors.is_empty() {
                "no error details".to_string()
            } else {
                self.errors
                    .iter()
                    .map(|e| match e.code {
                        Some(code) => format!("{} ({})", e.message, code),
                        None => e.message.clone(),
                    })
                    .collect::<Vec<_>>()
                    .join("; ")
            };
            return Err(RerankerError::Rejected { reason });
        }

        self.result.ok_or_else(|| RerankerError::InvalidResponse {
            reason: "envelope has no `result`".to_string(),
        })
    }
}
