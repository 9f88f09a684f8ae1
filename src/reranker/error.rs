use thiserror::Error;

#[derive(Debug, Error)]
pub enum RerankerError {
    #[error("reranker request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("reranker returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("reranker reported failure: {reason}")]
    Rejected { reason: String },

    #[error("invalid reranker response: {reason}")]
    InvalidResponse { reason: String },

    #[error("invalid reranker configuration: {reason}")]
    InvalidConfig { reason: String },
}
