//! Order API Module
//!
//! # Routes
//!
//! | Path                       | Method | Description                    |
//! |----------------------------|--------|--------------------------------|
//! | `/api/orders`              | POST   | checkout a cart                |
//! | `/api/orders/last-address` | GET    | most recent shipping fields    |
//! | `/api/orders/{id}/pay`     | POST   | mark a pending order paid      |
//! | `/api/orders/{id}/cancel`  | POST   | cancel a pending order         |
//!
//! All routes require authentication; every read and transition is
//! scoped to the order's owner.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/last-address", get(handler::last_address))
        .route("/{id}/pay", post(handler::pay))
        .route("/{id}/cancel", post(handler::cancel))
}
