//! Order Model
//!
//! An order is an immutable snapshot taken at checkout time. Line items copy
//! the product title and unit price so that later catalog edits never change
//! what the customer agreed to pay.

use serde::{Deserialize, Serialize};

// =============================================================================
// Order status
// =============================================================================

/// Order lifecycle status
///
/// `pending` is the only state with outgoing transitions; `paid` and
/// `canceled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Canceled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Canceled => "canceled",
        };
        write!(f, "{s}")
    }
}

// =============================================================================
// Order (main table)
// =============================================================================

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub status: OrderStatus,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub total_amount: i64,
    pub created_at: i64,
}

// =============================================================================
// Order item
// =============================================================================

/// Order line item (snapshot of a product at checkout time)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: String,
    pub product_id: i64,
    pub title: String,
    pub unit_price: i64,
    pub qty: i64,
    pub subtotal: i64,
}

/// Create order item payload (id assigned by the store)
#[derive(Debug, Clone)]
pub struct OrderItemCreate {
    pub product_id: i64,
    pub title: String,
    pub unit_price: i64,
    pub qty: i64,
    pub subtotal: i64,
}

// =============================================================================
// Shipping address
// =============================================================================

/// Shipping fields of an order
///
/// Also the validated output of checkout field validation and the payload of
/// the last-address lookup, so the three uses cannot drift apart.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShippingAddress {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}
