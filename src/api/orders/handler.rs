//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Order;
use crate::db::repository::order;
use crate::orders::status::{self, OrderAction};
use crate::orders::{self, CheckoutError, CheckoutRequest, OrderReceipt};
use crate::utils::{AppError, AppResult};

/// Create an order from the submitted cart
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    body: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderReceipt>), CheckoutError> {
    let Json(req) = body?;
    let receipt = orders::create_order(&state.db, &user.id, &req).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// Shipping fields of the user's most recent order, 204 when none exists
pub async fn last_address(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Response> {
    let address = order::last_address(&state.db.pool, &user.id).await?;

    Ok(match address {
        Some(address) => Json(address).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// Mark a pending order as paid
pub async fn pay(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    transition_order(&state, &user, &id, OrderAction::Pay).await
}

/// Cancel a pending order
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    transition_order(&state, &user, &id, OrderAction::Cancel).await
}

/// Load the order, check the move is legal, then apply it with a
/// status-guarded update so a concurrent transition cannot be overwritten
async fn transition_order(
    state: &ServerState,
    user: &CurrentUser,
    id: &str,
    action: OrderAction,
) -> AppResult<Json<Order>> {
    let current = order::find_by_id_for_user(&state.db.pool, id, &user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;

    let next = status::transition(current.status, action)
        .map_err(|e| AppError::conflict(e.to_string()))?;

    let updated = order::update_status(&state.db.pool, id, &user.id, current.status, next).await?;
    if !updated {
        return Err(AppError::conflict(format!("Order {id} changed concurrently")));
    }

    tracing::info!(order_id = %id, user_id = %user.id, %action, "Order status updated");

    Ok(Json(Order {
        status: next,
        ..current
    }))
}
