//! Error types for kwi-server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Conflict (409) - e.g., email already on the waitlist
    #[error("Conflict: {0}")]
    Conflict(String),

    /// kwi-common error
    #[error("Common error: {0}")]
    Common(#[from] kwi_common::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use kwi_common::Error as CommonError;

        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::Common(err) => match err {
                CommonError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
                CommonError::NoData(msg) => (StatusCode::NOT_FOUND, "NO_DATA", msg),
                CommonError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
                other => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "COMMON_ERROR",
                    other.to_string(),
                ),
            },
        };

        if status.is_server_error() {
            error!("Request failed: {}", message);
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_errors_map_to_status() {
        let cases = [
            (kwi_common::Error::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (kwi_common::Error::NoData("x".into()), StatusCode::NOT_FOUND),
            (kwi_common::Error::Conflict("x".into()), StatusCode::CONFLICT),
            (kwi_common::Error::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_api_errors_map_to_status() {
        let bad = ApiError::BadRequest("x".into()).into_response();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

        let conflict = ApiError::Conflict("x".into()).into_response();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);
    }
}
