use parking_lot::Mutex;
use serde_json::{Value, json};

use super::error::RerankerError;
use super::types::{RerankInput, RerankResult};
use super::RerankBackend;

/// In-memory backend that records every dispatched payload.
///
/// Without a configured response it answers in the Workers AI shape,
/// `{"response": [{"id": i, "score": s}, ..]}`, one entry per context in input
/// order, truncated to `top_k` when it is a positive integer.
#[derive(Default)]
pub struct MockReranker {
    calls: Mutex<Vec<RerankInput>>,
    response: Option<Value>,
    fail: bool,
}

impl MockReranker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(response: Value) -> Self {
        Self {
            response: Some(response),
            ..Self::default()
        }
    }

    /// Every call returns an upstream error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RerankInput> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn last_call(&self) -> Option<RerankInput> {
        self.calls.lock().last().cloned()
    }

    fn default_response(input: &RerankInput) -> Value {
        let limit = input
            .top_k
            .as_ref()
            .and_then(|k| k.as_u64())
            .filter(|k| *k > 0)
            .map_or(input.contexts.len(), |k| k as usize);

        let scores: Vec<Value> = input
            .contexts
            .iter()
            .enumerate()
            .take(limit)
            .map(|(id, _)| json!({ "id": id, "score": 1.0 / (id as f64 + 1.0) }))
            .collect();

        json!({ "response": scores })
    }
}

impl RerankBackend for MockReranker {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn rerank(&self, input: RerankInput) -> Result<RerankResult, RerankerError> {
        let response = match &self.response {
            Some(value) => value.clone(),
            None => Self::default_response(&input),
        };
        self.calls.lock().push(input);

        if self.fail {
            return Err(RerankerError::Api {
                status: 503,
                body: "mock reranker unavailable".to_string(),
            });
        }

        Ok(RerankResult(response))
    }
}
