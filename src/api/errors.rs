//! Maps `LookupError` onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::utils::error::LookupError;

impl LookupError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            LookupError::InvalidCountryCode { .. } => StatusCode::BAD_REQUEST,
            LookupError::ValidationError { .. } => StatusCode::BAD_REQUEST,

            // 404 Not Found
            LookupError::NotFound { .. } => StatusCode::NOT_FOUND,

            // 502 Bad Gateway
            LookupError::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,

            // 500 Internal Server Error
            LookupError::IoError(_)
            | LookupError::SerializationError(_)
            | LookupError::ConfigError { .. }
            | LookupError::InvalidConfigValueError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&LookupError> for ErrorResponse {
    fn from(err: &LookupError) -> Self {
        let status = err.status_code();
        // Local failures stay in the logs.
        let error = if status.is_server_error() && status != StatusCode::BAD_GATEWAY {
            "Internal server error, please try again later".to_string()
        } else {
            err.to_string()
        };

        Self {
            code: status.as_u16(),
            error,
        }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
