//! Health check route
//!
//! | Path        | Method | Auth |
//! |-------------|--------|------|
//! | /api/health | GET    | none |

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::core::ServerState;

/// Health router - public (no authentication)
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
