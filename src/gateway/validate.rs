//! Request body validation for `POST /rerank`.
//!
//! Rules run in a fixed order and the first failure wins:
//!
//! 1. [`parse_json`]
//! 2. [`require_query`]
//! 3. [`require_contexts`]
//! 4. [`require_context_text`]
//! 5. [`optional_top_k`] (never fails)

use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::constants::MIN_CONTEXTS;
use crate::reranker::{Context, RerankInput};

/// Why a rerank body was rejected. `Display` is the exact client-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid JSON body")]
    InvalidJson,

    #[error("Missing 'query'.")]
    MissingQuery,

    #[error("Provide at least 2 contexts: [{{text}}, ...]")]
    TooFewContexts,

    #[error("Each context must be {{ text: string }}")]
    MalformedContext,
}

/// Runs every rule against a raw body and builds the dispatch payload.
pub fn validate_rerank_body(raw: &[u8]) -> Result<RerankInput, ValidationError> {
    let body = parse_json(raw)?;
    let query = require_query(&body)?;
    let contexts = require_contexts(&body)?;
    let contexts = require_context_text(contexts)?;
    let top_k = optional_top_k(&body);

    Ok(RerankInput {
        query,
        contexts,
        top_k,
    })
}

/// Numbers outside the `f64` range fail here rather than becoming infinite.
pub(crate) fn parse_json(raw: &[u8]) -> Result<Value, ValidationError> {
    serde_json::from_slice(raw).map_err(|_| ValidationError::InvalidJson)
}

/// Returns the trimmed query. A non-object body has no `query`.
pub(crate) fn require_query(body: &Value) -> Result<String, ValidationError> {
    let query = body
        .get("query")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim_matches(is_query_whitespace);
    if query.is_empty() {
        return Err(ValidationError::MissingQuery);
    }
    Ok(query.to_string())
}

/// ECMAScript `WhiteSpace` plus `LineTerminator`: Unicode `White_Space`
/// without U+0085 NEXT LINE, plus U+FEFF BYTE ORDER MARK.
fn is_query_whitespace(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{0085}')
}

/// A missing or non-array `contexts` counts as empty.
pub(crate) fn require_contexts(body: &Value) -> Result<&[Value], ValidationError> {
    let contexts = body
        .get("contexts")
        .and_then(Value::as_array)
        .map_or(&[][..], Vec::as_slice);

    if contexts.len() < MIN_CONTEXTS {
        return Err(ValidationError::TooFewContexts);
    }
    Ok(contexts)
}

/// Every element must be an object with a non-empty string `text`.
/// Order and any other fields are kept.
pub(crate) fn require_context_text(contexts: &[Value]) -> Result<Vec<Context>, ValidationError> {
    contexts.iter().map(context_from_value).collect()
}

fn context_from_value(value: &Value) -> Result<Context, ValidationError> {
    let object = value.as_object().ok_or(ValidationError::MalformedContext)?;

    let text = match object.get("text") {
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        _ => return Err(ValidationError::MalformedContext),
    };

    let extra: Map<String, Value> = object
        .iter()
        .filter(|(key, _)| key.as_str() != "text")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(Context { text, extra })
}

/// `topK` passes through only when it is a JSON number. No default is applied.
pub(crate) fn optional_top_k(body: &Value) -> Option<Number> {
    match body.get("topK") {
        Some(Value::Number(n)) => Some(n.clone()),
        _ => None,
    }
}
