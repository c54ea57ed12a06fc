//! Cart API Handlers
//!
//! The cart lives in the in-memory session store; products are read from the
//! catalog only to snapshot name/price and to cap quantities against stock.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::models::{CartAdd, CartQuote, CartSetQuantity, CartView, DeliveryMethod};
use shared::util::now_millis;

use crate::api::extract::CartId;
use crate::cart;
use crate::checkout::{money, pricing};
use crate::core::ServerState;
use crate::db::repository::product;
use crate::utils::{AppError, AppResult};

fn cart_view(lines: Vec<shared::models::CartLine>) -> CartView {
    let sub_total = money::to_f64(money::subtotal(&lines));
    CartView { lines, sub_total }
}

/// GET /api/cart - current cart with subtotal
pub async fn view(State(state): State<ServerState>, cart_id: CartId) -> AppResult<Json<CartView>> {
    Ok(Json(cart_view(state.carts.get(&cart_id.0))))
}

/// POST /api/cart/items - add a product (merges an existing line)
pub async fn add_item(
    State(state): State<ServerState>,
    cart_id: CartId,
    Json(payload): Json<CartAdd>,
) -> AppResult<Json<CartView>> {
    let product = product::find_by_id(&state.pool, payload.product_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {}", payload.product_id)))?;
    if !product.is_active {
        return Err(AppError::conflict(format!(
            "Product '{}' is unavailable",
            product.name
        )));
    }

    let mut lines = state.carts.get(&cart_id.0);
    cart::add_line(&mut lines, &product, payload.quantity, now_millis())?;
    state.carts.save(&cart_id.0, lines.clone());

    Ok(Json(cart_view(lines)))
}

/// PUT /api/cart/items/{id} - set quantity (zero removes the line)
pub async fn set_quantity(
    State(state): State<ServerState>,
    cart_id: CartId,
    Path(line_id): Path<i64>,
    Json(payload): Json<CartSetQuantity>,
) -> AppResult<Json<CartView>> {
    let mut lines = state.carts.get(&cart_id.0);
    let line = lines
        .iter()
        .find(|l| l.id == line_id)
        .ok_or_else(|| AppError::not_found(format!("Cart line {line_id}")))?;

    // Re-check against current stock before raising a quantity
    let stock = product::find_by_id(&state.pool, line.product_id)
        .await?
        .map(|p| p.stock_quantity)
        .unwrap_or(0);

    cart::set_quantity(&mut lines, line_id, payload.quantity, stock)?;
    state.carts.save(&cart_id.0, lines.clone());

    Ok(Json(cart_view(lines)))
}

/// DELETE /api/cart/items/{id} - remove one line
pub async fn remove_item(
    State(state): State<ServerState>,
    cart_id: CartId,
    Path(line_id): Path<i64>,
) -> AppResult<Json<CartView>> {
    let mut lines = state.carts.get(&cart_id.0);
    if !cart::remove_line(&mut lines, line_id) {
        return Err(AppError::not_found(format!("Cart line {line_id}")));
    }
    state.carts.save(&cart_id.0, lines.clone());
    Ok(Json(cart_view(lines)))
}

/// DELETE /api/cart - drop the whole cart
pub async fn clear(State(state): State<ServerState>, cart_id: CartId) -> AppResult<Json<CartView>> {
    state.carts.clear(&cart_id.0);
    Ok(Json(cart_view(Vec::new())))
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub delivery_method: DeliveryMethod,
}

/// POST /api/cart/quote - totals for a delivery method, no storage touched
pub async fn quote(
    State(state): State<ServerState>,
    cart_id: CartId,
    Json(payload): Json<QuoteRequest>,
) -> AppResult<Json<CartQuote>> {
    let lines = state.carts.get(&cart_id.0);
    let sub_total = money::subtotal(&lines);
    let delivery_fee = pricing::delivery_fee(payload.delivery_method);
    Ok(Json(CartQuote {
        sub_total: money::to_f64(sub_total),
        delivery_fee: money::to_f64(delivery_fee),
        total: money::to_f64(sub_total + delivery_fee),
    }))
}
