//! Application Error Types
//!
//! Centralized error handling with Axum integration. Every failure that crosses
//! the repository or service boundary is an [`AppError`], which knows the
//! HTTP-like status code it reports as.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

impl AppError {
    /// Status code this error reports as.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the user.
    ///
    /// Internal and database failures are logged and replaced with a generic
    /// message so store details never reach a response.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Something went wrong, please try again".into()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "Something went wrong, please try again".into()
            }
            other => other.to_string(),
        }
    }

    /// Shorthand for the not-found error of an entity id.
    pub fn not_found(entity: &str, id: i64) -> Self {
        AppError::NotFound(format!("{} with id {} was not found", entity, id))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            code: status.as_u16(),
            message: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}
