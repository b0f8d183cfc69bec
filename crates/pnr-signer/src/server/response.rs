use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::SignerError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Trait implementation to convert this error into an axum http response
impl IntoResponse for SignerError {
    fn into_response(self) -> Response {
        let status = if self.is_caller_fault() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let body = ErrorBody {
            error: self.code(),
            message: Some(self.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

pub async fn method_not_allowed() -> Response {
    let body = ErrorBody {
        error: "METHOD_NOT_ALLOWED",
        message: None,
    };
    (StatusCode::METHOD_NOT_ALLOWED, Json(body)).into_response()
}
