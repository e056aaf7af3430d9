//! Error types for nuoidev-vote
//!
//! Business rejections of a vote attempt are not errors; they live in
//! [`crate::voting::VoteRejection`] and carry the voter's remaining quota.
//! This type covers everything else a handler can fail with.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Shared library error
    #[error("{0}")]
    Common(#[from] nuoidev_common::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Common(err) => match err {
                nuoidev_common::Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
                nuoidev_common::Error::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
                // Storage and other unexpected failures stay generic
                other => {
                    tracing::error!("Internal failure: {}", other);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
