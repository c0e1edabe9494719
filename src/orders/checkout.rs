//! Order transaction engine
//!
//! Turns a cart submission into either a persisted order or a refusal
//! with zero side effects. The whole write path runs inside one
//! immediate transaction: stock is read under the write lock, validated,
//! and decremented before anyone else can touch it, so two checkouts
//! racing for the last unit can never both win.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cart::{self, CartLine};
use super::error::{CheckoutError, LineError};
use super::validate;
use crate::db::DbService;
use crate::db::models::{Order, OrderItemCreate, OrderStatus};
use crate::db::repository::{RepoError, inventory, order};
use crate::utils::time::now_millis;

/// Checkout request body
///
/// Shipping fields are optional at the type level so that a missing
/// field reports "required" through validation instead of failing JSON
/// deserialization with an opaque 422.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub items: Vec<CartLine>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
}

/// Created-order response body
#[derive(Debug, Clone, Serialize)]
pub struct OrderReceipt {
    pub id: String,
    pub status: OrderStatus,
    pub total_amount: i64,
    pub created_at: i64,
    pub items: Vec<ReceiptLine>,
}

/// One line of the created order, priced from the locked snapshot
#[derive(Debug, Clone, Serialize)]
pub struct ReceiptLine {
    pub product_id: i64,
    pub title: String,
    pub qty: i64,
    pub unit_price: i64,
    pub subtotal: i64,
}

/// Create an order from a cart submission.
///
/// Field validation runs first, before any database access. Merged cart
/// lines are then checked against stock read under the write lock; any
/// failed line aborts the whole checkout and reports every failed line.
/// Only a fully valid cart writes anything: the order row, one snapshot
/// item per line, and the stock decrements all land in one commit.
///
/// Prices and titles come from the locked snapshots, never from the
/// client; quantity is the only client-supplied number that survives.
pub async fn create_order(
    db: &DbService,
    user_id: &str,
    req: &CheckoutRequest,
) -> Result<OrderReceipt, CheckoutError> {
    let shipping = validate::validate_request(req).map_err(CheckoutError::Fields)?;

    let merged = match cart::merge_lines(&req.items) {
        Some(merged) => merged,
        None => {
            let mut errors = validate::FieldErrors::new();
            errors.insert("items".to_string(), vec!["qty is too large".to_string()]);
            return Err(CheckoutError::Fields(errors));
        }
    };
    let ids: BTreeSet<i64> = merged.keys().copied().collect();

    let mut tx = db.begin_immediate().await?;
    let snapshots = inventory::lock_and_fetch(&mut tx, &ids).await?;

    let mut line_errors = Vec::new();
    let mut accepted: Vec<(&inventory::ProductSnapshot, i64)> = Vec::new();
    for (product_id, qty) in &merged {
        match snapshots.get(product_id) {
            None => line_errors.push(LineError::not_found(*product_id)),
            Some(snapshot) if snapshot.stock < *qty => {
                line_errors.push(LineError::insufficient(
                    snapshot.id,
                    &snapshot.title,
                    snapshot.stock,
                ));
            }
            Some(snapshot) => accepted.push((snapshot, *qty)),
        }
    }

    // Any failed line aborts the whole checkout. Roll back explicitly so
    // the write lock is released before we serialize the refusal.
    if !line_errors.is_empty() {
        if let Err(e) = tx.rollback().await {
            tracing::warn!(error = %e, "Rollback after cart line errors failed");
        }
        tracing::info!(user_id, lines = line_errors.len(), "Checkout rejected on cart lines");
        return Err(CheckoutError::Lines(line_errors));
    }

    let total_amount: i64 = accepted.iter().map(|(s, qty)| s.price * qty).sum();
    let order_row = Order {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        status: OrderStatus::Pending,
        full_name: shipping.full_name,
        phone: shipping.phone,
        address: shipping.address,
        city: shipping.city,
        postal_code: shipping.postal_code,
        total_amount,
        created_at: now_millis(),
    };
    order::insert(&mut tx, &order_row).await?;

    let mut items = Vec::with_capacity(accepted.len());
    for (snapshot, qty) in accepted {
        let item = OrderItemCreate {
            product_id: snapshot.id,
            title: snapshot.title.clone(),
            unit_price: snapshot.price,
            qty,
            subtotal: snapshot.price * qty,
        };
        order::insert_item(&mut tx, &order_row.id, &item).await?;
        inventory::decrement(&mut tx, snapshot.id, qty).await?;

        items.push(ReceiptLine {
            product_id: item.product_id,
            title: item.title,
            qty: item.qty,
            unit_price: item.unit_price,
            subtotal: item.subtotal,
        });
    }

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(
        order_id = %order_row.id,
        user_id = %order_row.user_id,
        total_amount,
        lines = items.len(),
        "Order created"
    );

    Ok(OrderReceipt {
        id: order_row.id,
        status: order_row.status,
        total_amount,
        created_at: order_row.created_at,
        items,
    })
}
