use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// One candidate passage. Fields besides `text` ride along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub text: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Context {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            extra: Map::new(),
        }
    }
}

/// Validated payload handed to a [`RerankBackend`](super::RerankBackend).
///
/// Serializes to the shape the hosted model expects:
/// `{"query": .., "contexts": [..], "top_k": ..}` with `top_k` omitted when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankInput {
    pub query: String,

    pub contexts: Vec<Context>,

    /// Forwarded exactly as the client sent it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<Number>,
}

/// Opaque backend output, relayed to the client as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RerankResult(pub Value);

impl RerankResult {
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for RerankResult {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
