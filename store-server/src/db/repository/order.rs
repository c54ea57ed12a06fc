//! Order Repository
//!
//! Insert operations run only inside the placement transaction; reads and the
//! status/cancellation operations are pool-level. Item rows are owned by
//! their order and cascade-deleted with it.

use super::{RepoError, RepoResult, product};
use shared::models::{Order, OrderDetail, OrderItem, OrderStatus};
use sqlx::SqlitePool;

const ORDER_SELECT: &str = "SELECT id, user_id, customer_name, customer_email, customer_phone, shipping_address, delivery_method, payment_method, comment, order_date, status, total_amount FROM orders";

const ITEM_SELECT: &str = "SELECT id, order_id, product_id, product_name, quantity, unit_price, total_price FROM order_item";

/// Insert the order row (placement transaction only)
pub async fn insert_order(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    order: &Order,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO orders (id, user_id, customer_name, customer_email, customer_phone, shipping_address, delivery_method, payment_method, comment, order_date, status, total_amount) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
    )
    .bind(order.id)
    .bind(&order.user_id)
    .bind(&order.customer_name)
    .bind(&order.customer_email)
    .bind(&order.customer_phone)
    .bind(&order.shipping_address)
    .bind(order.delivery_method)
    .bind(order.payment_method)
    .bind(&order.comment)
    .bind(order.order_date)
    .bind(order.status)
    .bind(order.total_amount)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Insert one item row (placement transaction only)
pub async fn insert_item(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    item: &OrderItem,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO order_item (id, order_id, product_id, product_name, quantity, unit_price, total_price) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(item.id)
    .bind(item.order_id)
    .bind(item.product_id)
    .bind(&item.product_name)
    .bind(item.quantity)
    .bind(item.unit_price)
    .bind(item.total_price)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Order plus its item rows, for the confirmation view.
/// An unknown id is a hard NotFound before any mutation.
pub async fn find_detail(pool: &SqlitePool, id: i64) -> RepoResult<OrderDetail> {
    let order = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))?;

    let sql = format!("{ITEM_SELECT} WHERE order_id = ? ORDER BY id");
    let items = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(id)
        .fetch_all(pool)
        .await?;

    Ok(OrderDetail { order, items })
}

/// The single post-creation mutation on an order row.
pub async fn update_status(pool: &SqlitePool, id: i64, status: OrderStatus) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE orders SET status = ?1 WHERE id = ?2")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    Ok(())
}

/// Delete an order, returning each item's quantity to stock.
///
/// Runs as one transaction so a cancellation cannot interleave with a
/// concurrent placement on the same products: restore every item's stock,
/// then delete the order row (items cascade).
pub async fn delete_restoring_stock(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    let sql = format!("{ITEM_SELECT} WHERE order_id = ?");
    let items = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

    let exists = sqlx::query("SELECT 1 FROM orders WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .is_some();
    if !exists {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }

    for item in &items {
        // FK RESTRICT on order_item.product_id guarantees the product row
        // still exists while the item does.
        product::restore_stock(&mut tx, item.product_id, item.quantity).await?;
    }

    sqlx::query("DELETE FROM orders WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(order_id = id, items = items.len(), "Order deleted, stock restored");
    Ok(())
}
