//! HTTP gateway (Axum) in front of the reranker.
//!
//! Routes are matched on exact strings:
//!
//! | Method | Path      | Behaviour                                   |
//! |--------|-----------|---------------------------------------------|
//! | GET    | `/health` | `200 {"ok":true}`                           |
//! | POST   | `/rerank` | validate, dispatch, relay backend output    |
//! | other  | `/rerank` | `405 {"error":"Method not allowed. Use POST."}` |
//! | any    | other     | `404 {"error":"Not found"}`                 |
//!
//! Request bodies have no size cap. A body that fails to stream is answered
//! with the extractor's status and a JSON `{"error"}` body.

pub mod error;
pub mod handler;
pub mod response;
pub mod state;
pub mod validate;


use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::{ErrorResponse, GatewayError};
pub use handler::{
    HealthResponse, health_handler, method_not_allowed_handler, not_found_handler, rerank_handler,
};
pub use response::json_response;
pub use state::HandlerState;
pub use validate::{ValidationError, validate_rerank_body};

use crate::constants::{HEALTH_PATH, RERANK_PATH};
use crate::reranker::RerankBackend;

pub fn create_router_with_state<R>(state: HandlerState<R>) -> Router
where
    R: RerankBackend + 'static,
{
    Router::new()
        .route(HEALTH_PATH, get(health_handler).fallback(not_found_handler))
        .route(
            RERANK_PATH,
            post(rerank_handler::<R>).fallback(method_not_allowed_handler),
        )
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
