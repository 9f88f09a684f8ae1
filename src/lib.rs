//! Rerank gateway library crate (used by the server binary and integration tests).
//!
//! A stateless HTTP front door for a hosted cross-encoder reranker. Each
//! `POST /rerank` body is validated against an ordered set of rules, shaped into
//! a [`RerankInput`], handed to a [`RerankBackend`], and the backend's output is
//! relayed to the client untouched.
//!
//! ## Modules
//! - [`gateway`]: Axum router, handlers, validation rules, error responses
//! - [`reranker`]: the [`RerankBackend`] seam and its Workers AI implementation
//! - [`config`]: environment-backed server configuration
//! - [`constants`]: routes, defaults, content type
//!
//! ## Test/Mock Support
//! [`MockReranker`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod gateway;
pub mod reranker;

pub use config::{Config, ConfigError};
pub use gateway::{
    GatewayError, HandlerState, ValidationError, create_router_with_state, validate_rerank_body,
};
#[cfg(any(test, feature = "mock"))]
pub use reranker::MockReranker;
pub use reranker::{
    Context, RerankBackend, RerankInput, RerankResult, RerankerError, WorkersAiConfig,
    WorkersAiReranker,
};
