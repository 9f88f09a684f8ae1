use std::sync::Arc;

use crate::reranker::RerankBackend;

/// Shared, read-only handler state: just the injected backend.
pub struct HandlerState<R: RerankBackend + 'static> {
    pub reranker: Arc<R>,
}

impl<R: RerankBackend + 'static> Clone for HandlerState<R> {
    fn clone(&self) -> Self {
        Self {
            reranker: Arc::clone(&self.reranker),
        }
    }
}

impl<R: RerankBackend + 'static> HandlerState<R> {
    pub fn new(reranker: R) -> Self {
        Self {
            reranker: Arc::new(reranker),
        }
    }

    /// Shares a backend the caller keeps a handle to (tests inspect mocks this way).
    pub fn from_shared(reranker: Arc<R>) -> Self {
        Self { reranker }
    }
}
