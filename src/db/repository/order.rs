//! Order database operations

use sqlx::{SqliteConnection, SqlitePool};

use super::RepoResult;
use crate::db::models::{Order, OrderItem, OrderItemCreate, OrderStatus, ShippingAddress};

// ── Checkout writes (inside the checkout transaction) ──

pub async fn insert(conn: &mut SqliteConnection, order: &Order) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO orders (
            id, user_id, status, full_name, phone, address, city,
            postal_code, total_amount, created_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&order.id)
    .bind(&order.user_id)
    .bind(order.status)
    .bind(&order.full_name)
    .bind(&order.phone)
    .bind(&order.address)
    .bind(&order.city)
    .bind(&order.postal_code)
    .bind(order.total_amount)
    .bind(order.created_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub async fn insert_item(
    conn: &mut SqliteConnection,
    order_id: &str,
    item: &OrderItemCreate,
) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO order_item (order_id, product_id, title, unit_price, qty, subtotal)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(order_id)
    .bind(item.product_id)
    .bind(&item.title)
    .bind(item.unit_price)
    .bind(item.qty)
    .bind(item.subtotal)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

// ── Reads ──

/// Find an order by id, scoped to its owner.
///
/// Someone else's order id behaves exactly like a nonexistent one.
pub async fn find_by_id_for_user(
    pool: &SqlitePool,
    id: &str,
    user_id: &str,
) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(
        r#"
        SELECT id, user_id, status, full_name, phone, address, city,
               postal_code, total_amount, created_at
        FROM orders
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(order)
}

pub async fn find_items(pool: &SqlitePool, order_id: &str) -> RepoResult<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(
        r#"
        SELECT id, order_id, product_id, title, unit_price, qty, subtotal
        FROM order_item
        WHERE order_id = ?
        ORDER BY id
        "#,
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

/// Shipping fields of the user's most recent order, if any.
pub async fn last_address(pool: &SqlitePool, user_id: &str) -> RepoResult<Option<ShippingAddress>> {
    let address = sqlx::query_as::<_, ShippingAddress>(
        r#"
        SELECT full_name, phone, address, city, postal_code
        FROM orders
        WHERE user_id = ?
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(address)
}

// ── Status transitions ──

/// Move an order from `from` to `to`, scoped to its owner.
///
/// The `status = ?` guard makes the transition first-writer-wins: returns
/// `false` when the order is missing, owned by someone else, or no longer
/// in the `from` state.
pub async fn update_status(
    pool: &SqlitePool,
    id: &str,
    user_id: &str,
    from: OrderStatus,
    to: OrderStatus,
) -> RepoResult<bool> {
    let result = sqlx::query("UPDATE orders SET status = ? WHERE id = ? AND user_id = ? AND status = ?")
        .bind(to)
        .bind(id)
        .bind(user_id)
        .bind(from)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
