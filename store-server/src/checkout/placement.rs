//! Order Placement Transaction
//!
//! Converts a cart into a persisted order and inventory decrement as one
//! atomic unit. On any failure nothing is committed and the cart is preserved
//! unchanged; the cart is cleared only after a successful commit.
//!
//! The in-transaction re-validation and the stock decrement are fused into a
//! single conditional update per line
//! (`... SET stock_quantity = stock_quantity - ? WHERE ... stock_quantity >= ?`).
//! The first such update acquires SQLite's writer lock, so concurrent
//! placements serialize there: the losing order re-evaluates against
//! committed state and is rejected outright with `InsufficientStock`. Stock
//! can never go negative and there is no oversell-then-clamp window.
//!
//! A single attempt moves through
//! `Started → Validating → (Rejected | Persisting) → (Committed → CartCleared) | RolledBack`.
//! There is no retry loop here; retry, if any, is the caller's decision.

use crate::cart::CartStore;
use crate::checkout::{money, pricing, validator};
use crate::db::repository::{RepoError, order, product};
use shared::models::{
    LineRejection, Order, OrderItem, OrderStatus, PlaceOrder, PlacedOrder,
};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacementError {
    /// Submitted with an empty cart; no transaction is opened.
    #[error("cart is empty")]
    EmptyCart,

    /// One or more lines failed re-validation inside the transaction;
    /// everything was rolled back and the cart kept.
    #[error("stock changed during placement")]
    StockChanged(Vec<LineRejection>),

    /// Storage-layer failure; the transaction was rolled back. Carries the
    /// constraint classification for diagnostics.
    #[error(transparent)]
    Persistence(#[from] RepoError),
}

/// Place an order from the cart identified by `cart_id`.
///
/// Customer fields in `req` must already have passed field-level validation
/// at the boundary. On success returns the new order id and the computed
/// total, and the cart has been cleared.
pub async fn place_order(
    pool: &SqlitePool,
    carts: &CartStore,
    cart_id: &str,
    req: &PlaceOrder,
) -> Result<PlacedOrder, PlacementError> {
    let lines = carts.get(cart_id);
    if lines.is_empty() {
        return Err(PlacementError::EmptyCart);
    }

    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    // Re-validate every line by decrementing conditionally. Every line is
    // visited even after a failure so the caller gets the full rejection
    // list; the rollback below undoes any decrement that did land.
    let mut rejections = Vec::new();
    for line in &lines {
        let decremented = product::decrement_stock(&mut tx, line.product_id, line.quantity).await?;
        if !decremented {
            let current = product::fetch_current(&mut tx, line.product_id).await?;
            let rejection = validator::check_line(line, current.as_ref()).unwrap_or_else(|| {
                LineRejection::InsufficientStock {
                    product_id: line.product_id,
                    product_name: line.product_name.clone(),
                    available: current.map(|p| p.stock_quantity).unwrap_or(0),
                }
            });
            rejections.push(rejection);
        }
    }
    if !rejections.is_empty() {
        tx.rollback().await.map_err(RepoError::from)?;
        return Err(PlacementError::StockChanged(rejections));
    }

    // Totals: all arithmetic in Decimal, rounded once at the end.
    let delivery_fee = pricing::delivery_fee(req.delivery_method);
    let subtotal = money::subtotal(&lines);
    let total_amount = money::to_f64(subtotal + delivery_fee);

    let order_row = Order {
        id: snowflake_id(),
        user_id: req.user_id.clone(),
        customer_name: req.customer_name.trim().to_string(),
        customer_email: req.customer_email.trim().to_string(),
        customer_phone: req.customer_phone.trim().to_string(),
        shipping_address: req.shipping_address.trim().to_string(),
        delivery_method: req.delivery_method,
        payment_method: req.payment_method,
        comment: req.comment.trim().to_string(),
        order_date: now_millis(),
        status: OrderStatus::New,
        total_amount,
    };
    order::insert_order(&mut tx, &order_row).await?;

    for line in &lines {
        let item = OrderItem {
            id: snowflake_id(),
            order_id: order_row.id,
            product_id: line.product_id,
            product_name: line.product_name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            total_price: money::to_f64(money::line_total(line)),
        };
        order::insert_item(&mut tx, &item).await?;
    }

    // Commit first; the cart is cleared only after a successful commit.
    tx.commit().await.map_err(RepoError::from)?;
    carts.clear(cart_id);

    tracing::info!(
        order_id = order_row.id,
        items = lines.len(),
        total = total_amount,
        "Order placed"
    );

    Ok(PlacedOrder {
        order_id: order_row.id,
        total_amount,
    })
}
