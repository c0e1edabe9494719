//! Inventory store operations
//!
//! The two primitives the checkout engine builds on. Both take
//! `&mut SqliteConnection` and must be called inside an immediate (write)
//! transaction: on SQLite the write lock is database-wide and is taken by
//! the transaction itself, so a fetch here reads stock no other writer can
//! change before our commit.

use std::collections::{BTreeMap, BTreeSet};

use sqlx::SqliteConnection;

use super::{RepoError, RepoResult};
use crate::utils::time::now_millis;

/// Product fields the checkout engine needs, read under the write lock
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductSnapshot {
    pub id: i64,
    pub title: String,
    pub price: i64,
    pub stock: i64,
}

/// Fetch the products for `ids` under the current write transaction.
///
/// Ids absent from the result simply do not exist. Takes a `BTreeSet` so
/// the ids are visited in ascending order; on stores with per-row locks
/// that ordering is what keeps concurrent checkouts deadlock-free.
pub async fn lock_and_fetch(
    conn: &mut SqliteConnection,
    ids: &BTreeSet<i64>,
) -> RepoResult<BTreeMap<i64, ProductSnapshot>> {
    if ids.is_empty() {
        return Ok(BTreeMap::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!("SELECT id, title, price, stock FROM product WHERE id IN ({placeholders})");

    let mut query = sqlx::query_as::<_, ProductSnapshot>(&sql);
    for id in ids {
        query = query.bind(*id);
    }

    let rows = query.fetch_all(&mut *conn).await?;
    Ok(rows.into_iter().map(|p| (p.id, p)).collect())
}

/// Decrement stock for one product, keeping `in_stock` in sync.
///
/// The `stock >= qty` guard re-checks availability at write time. The
/// engine only calls this after validating stock inside the same
/// transaction, so a zero-row update means write exclusion was lost and
/// is reported as an invariant violation rather than a user error.
pub async fn decrement(conn: &mut SqliteConnection, product_id: i64, qty: i64) -> RepoResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE product
        SET stock = stock - ?1,
            in_stock = CASE WHEN stock - ?1 > 0 THEN 1 ELSE 0 END,
            updated_at = ?2
        WHERE id = ?3 AND stock >= ?1
        "#,
    )
    .bind(qty)
    .bind(now_millis())
    .bind(product_id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::InvariantViolation(format!(
            "stock decrement matched no row for product {product_id} (qty {qty})"
        )));
    }

    Ok(())
}
