//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::session::SessionError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Request body could not be read or parsed as JSON
    #[error("{message}")]
    Body { status: StatusCode, message: String },

    /// Session lookup or limit error
    #[error("{0}")]
    Session(#[from] SessionError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Body { status, .. } => {
                let code = match *status {
                    StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
                    StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
                    StatusCode::UNPROCESSABLE_ENTITY => "INVALID_BODY",
                    _ => "INVALID_JSON",
                };
                (*status, code)
            }
            ApiError::Session(SessionError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND")
            }
            ApiError::Session(SessionError::TooManySessions(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "TOO_MANY_SESSIONS")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "API error occurred"
            );
        } else {
            tracing::debug!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "API request rejected"
            );
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_errors_map_to_status() {
        let err = ApiError::from(SessionError::NotFound("abc".to_string()));
        assert_eq!(err.status_and_code().0, StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Session not found: abc");

        let err = ApiError::from(SessionError::TooManySessions(3));
        assert_eq!(err.status_and_code().1, "TOO_MANY_SESSIONS");
    }

    #[test]
    fn test_body_error_keeps_status() {
        let err = ApiError::Body {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: "too big".to_string(),
        };
        assert_eq!(
            err.status_and_code(),
            (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE")
        );
        assert_eq!(err.to_string(), "too big");
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::Validation("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
