use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error, instrument};

use crate::gateway::error::GatewayError;
use crate::gateway::response::json_response;
use crate::gateway::state::HandlerState;
use crate::gateway::validate::validate_rerank_body;
use crate::reranker::RerankBackend;

/// `POST /rerank`: validate, dispatch once, relay the backend output verbatim.
#[instrument(skip(state, body), fields(backend = state.reranker.name(), contexts = tracing::field::Empty))]
pub async fn rerank_handler<R>(
    State(state): State<HandlerState<R>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, GatewayError>
where
    R: RerankBackend + 'static,
{
    let body = body.map_err(|e| {
        debug!(status = %e.status(), "Failed to read rerank body: {}", e.body_text());
        GatewayError::BodyRead {
            status: e.status(),
            message: e.body_text(),
        }
    })?;

    let input = validate_rerank_body(&body).map_err(|e| {
        debug!(reason = %e, "Rejected rerank request");
        GatewayError::Validation(e)
    })?;
    tracing::Span::current().record("contexts", input.contexts.len());

    debug!(top_k = ?input.top_k, "Dispatching rerank request");

    let result = state.reranker.rerank(input).await.map_err(|e| {
        error!("Reranker error: {}", e);
        GatewayError::Reranker(e)
    })?;

    Ok(json_response(StatusCode::OK, &result))
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

#[instrument]
pub async fn health_handler() -> Response {
    json_response(StatusCode::OK, &HealthResponse { ok: true })
}

pub async fn not_found_handler() -> Response {
    GatewayError::NotFound.into_response()
}

pub async fn method_not_allowed_handler() -> Response {
    GatewayError::MethodNotAllowed.into_response()
}
