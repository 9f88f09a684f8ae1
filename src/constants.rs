//! Cross-cutting, shared constants.

/// Liveness check route.
pub const HEALTH_PATH: &str = "/health";

/// Rerank dispatch route.
pub const RERANK_PATH: &str = "/rerank";

/// Content type attached to every body the gateway produces.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Workers AI model used when `RERANK_MODEL` is not set.
pub const DEFAULT_RERANK_MODEL: &str = "@cf/baai/bge-reranker-base";

/// Cloudflare REST API root used when `RERANK_API_BASE` is not set.
pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Minimum number of contexts a rerank request must carry.
pub const MIN_CONTEXTS: usize = 2;

pub const DEFAULT_PORT: u16 = 8080;

pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 1;
