//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
///
/// `price` is stored in the smallest currency unit. `in_stock` is a derived
/// flag kept in sync with `stock` by every write that touches inventory.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub price: i64,
    pub stock: i64,
    pub in_stock: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub title: String,
    pub price: i64,
    pub stock: i64,
}
