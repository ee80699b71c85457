//! Custom error types for the roster API

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the roster API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or invalid request payload
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Credentials did not match any account
    #[error("Unauthorized")]
    Unauthorized,

    /// Requested record does not exist
    #[error("{0}")]
    NotFound(String),

    /// A conflicting record already exists
    #[error("{0}")]
    Conflict(String),

    /// Document store failure
    #[error("Store error: {0}")]
    Store(#[from] common::error::StoreError),

    /// Internal server error
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Invalid employee ID or password".to_string(),
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to access the datastore".to_string(),
            ),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
