//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`orders`] - checkout, last-address lookup, status transitions

pub mod health;
pub mod orders;

use axum::{Router, middleware};

use crate::auth::require_auth;
use crate::core::ServerState;

/// HTTP request log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the application router
///
/// `require_auth` is applied at router level and skips public routes
/// internally; `log_request` sits outside so rejected requests are
/// logged too.
pub fn build_app(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(middleware::from_fn(log_request))
}
