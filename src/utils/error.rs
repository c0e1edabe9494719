//! Application error surface
//!
//! [`AppError`] is the generic HTTP error type; its response body is
//! `{ "code": "...", "detail": "..." }`. The checkout flow has its own
//! field/line-addressable 400 bodies and only falls back to [`AppError`]
//! for store and internal failures.
//!
//! # Error codes
//!
//! | Code  | Meaning                      | Status |
//! |-------|------------------------------|--------|
//! | E3001 | Authentication required      | 401    |
//! | E3002 | Invalid token                | 401    |
//! | E3003 | Token expired                | 401    |
//! | E0003 | Resource not found           | 404    |
//! | E0004 | Resource conflict            | 409    |
//! | E9001 | Internal server error        | 500    |
//! | E9002 | Database error               | 500    |
//! | E9003 | Store busy, safe to retry    | 503    |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Error code (E-prefixed, stable across releases)
    pub code: String,
    /// Human-readable detail
    pub detail: String,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication errors (401) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    // ========== Business errors (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource conflict: {0}")]
    Conflict(String),

    // ========== System errors (5xx) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    /// Transient store contention (lock wait expired). Retryable.
    #[error("Store busy: {0}")]
    Busy(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, detail) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "E3001", "Please login first"),
            AppError::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "E3002", "Invalid token"),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "E3003", "Token expired"),

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.as_str()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.as_str()),

            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error",
                )
            }
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "E9002", "Database error")
            }
            AppError::Busy(msg) => {
                tracing::warn!(target: "database", error = %msg, "Store busy, request can be retried");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "E9003",
                    "Service busy, please retry",
                )
            }
        };

        let body = Json(ErrorBody {
            code: code.to_string(),
            detail: detail.to_string(),
        });

        (status, body).into_response()
    }
}

// ========== Helper constructors ==========

impl AppError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn token_expired() -> Self {
        Self::TokenExpired
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::InvalidToken(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn busy(msg: impl Into<String>) -> Self {
        Self::Busy(msg.into())
    }
}
