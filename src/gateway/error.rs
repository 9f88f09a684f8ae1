use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::gateway::response::json_response;
use crate::gateway::validate::ValidationError;
use crate::reranker::RerankerError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{message}")]
    BodyRead { status: StatusCode, message: String },

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed. Use POST.")]
    MethodNotAllowed,

    #[error("reranker failed: {0}")]
    Reranker(#[from] RerankerError),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::BodyRead { status, .. } => *status,
            GatewayError::NotFound => StatusCode::NOT_FOUND,
            GatewayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::Reranker(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = match &self {
            GatewayError::Reranker(_) => "Upstream reranker request failed".to_string(),
            _ => self.to_string(),
        };

        let mut response = json_response(
            status,
            &ErrorResponse {
                error: error_message,
            },
        );

        if matches!(self, GatewayError::MethodNotAllowed) {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("POST"));
        }

        response
    }
}
