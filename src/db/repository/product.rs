//! Product database operations

use sqlx::SqlitePool;

use super::RepoResult;
use crate::db::models::{Product, ProductCreate};
use crate::utils::{ids::snowflake_id, time::now_millis};

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    let id = snowflake_id();
    let now = now_millis();

    sqlx::query(
        r#"
        INSERT INTO product (id, title, price, stock, in_stock, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(&data.title)
    .bind(data.price)
    .bind(data.stock)
    .bind(data.stock > 0)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    let product = sqlx::query_as::<_, Product>(
        "SELECT id, title, price, stock, in_stock, created_at, updated_at FROM product WHERE id = ?",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(product)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        "SELECT id, title, price, stock, in_stock, created_at, updated_at FROM product WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}
