use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::constants::JSON_CONTENT_TYPE;

const SERIALIZATION_FAILURE_BODY: &str = r#"{"error":"Internal Server Error"}"#;

/// Serializes `body` with the gateway's JSON content type.
///
/// `axum::Json` only sets `application/json`; clients here get the charset too.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => (status, json_content_type(), bytes).into_response(),
        Err(e) => {
            error!("Failed to serialize response body: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json_content_type(),
                SERIALIZATION_FAILURE_BODY,
            )
                .into_response()
        }
    }
}

fn json_content_type() -> [(header::HeaderName, HeaderValue); 1] {
    [(
        header::CONTENT_TYPE,
        HeaderValue::from_static(JSON_CONTENT_TYPE),
    )]
}
