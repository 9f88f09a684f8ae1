//! Reranker backends.
//!
//! The gateway never scores anything itself. It hands a validated
//! [`RerankInput`] to a [`RerankBackend`] and relays whatever comes back.
//!
//! - [`WorkersAiReranker`]: Cloudflare Workers AI REST API (production).
//! - `MockReranker`: records calls, returns canned output (tests / `mock` feature).

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod types;
pub mod workers_ai;


pub use error::RerankerError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockReranker;
pub use types::{Context, RerankInput, RerankResult};
pub use workers_ai::{WorkersAiConfig, WorkersAiReranker};

/// A scoring capability the gateway can dispatch to.
pub trait RerankBackend: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Scores `input.contexts` against `input.query`.
    ///
    /// Called exactly once per accepted request. Failures are returned as-is;
    /// the gateway does not retry.
    fn rerank(
        &self,
        input: RerankInput,
    ) -> impl std::future::Future<Output = Result<RerankResult, RerankerError>> + Send;
}
