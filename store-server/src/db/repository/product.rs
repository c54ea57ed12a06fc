//! Product Repository
//!
//! Inventory access for the checkout core. `stock_quantity` is the only
//! contended mutable field; both the decrement (placement) and the increment
//! (cancellation) run inside the caller's transaction.

use super::{RepoError, RepoResult};
use shared::models::Product;
use sqlx::sqlite::SqliteConnection;
use sqlx::SqlitePool;

const PRODUCT_SELECT: &str = "SELECT id, name, description, price, category, article, is_active, is_bestseller, stock_quantity, created_at FROM product";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("{PRODUCT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Fetch one product on the caller's connection (validator and placement re-checks)
pub async fn fetch_current(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("{PRODUCT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

/// Conditionally decrement stock inside the placement transaction.
///
/// The re-check and the write are a single atomic statement: zero affected
/// rows means the product is gone, inactive, or a concurrent order consumed
/// the stock between the validation read and this write. Stock can never go
/// below zero through this path.
pub async fn decrement_stock(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    product_id: i64,
    quantity: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE product SET stock_quantity = stock_quantity - ?1 WHERE id = ?2 AND is_active = 1 AND stock_quantity >= ?1",
    )
    .bind(quantity)
    .bind(product_id)
    .execute(&mut **tx)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Return stock inside a cancellation/deletion transaction.
pub async fn restore_stock(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    product_id: i64,
    quantity: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE product SET stock_quantity = stock_quantity + ?1 WHERE id = ?2")
        .bind(quantity)
        .bind(product_id)
        .execute(&mut **tx)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Set the absolute stock level (external admin collaborator entry point).
/// Goes through the same pool/locking discipline as the order paths.
pub async fn set_stock(pool: &SqlitePool, product_id: i64, stock_quantity: i64) -> RepoResult<()> {
    if stock_quantity < 0 {
        return Err(RepoError::Validation(
            "stock_quantity must not be negative".into(),
        ));
    }
    let rows = sqlx::query("UPDATE product SET stock_quantity = ?1 WHERE id = ?2")
        .bind(stock_quantity)
        .bind(product_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {product_id} not found")));
    }
    Ok(())
}
