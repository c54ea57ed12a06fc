//! Checkout API Handler
//!
//! The HTTP boundary of the placement transaction. Field-level validation of
//! the customer details happens here: it is a precondition of the core, not
//! part of it. Business rejections come back structured; persistence failures
//! are logged in full and answered with a generic message.

use axum::{Json, extract::State};
use shared::models::{PlaceOrder, PlacedOrder};

use crate::api::extract::CartId;
use crate::checkout::{self, validator};
use crate::core::ServerState;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_COMMENT_LEN, MAX_NAME_LEN, validate_email, validate_phone,
    validate_required_text, validate_text_len,
};
use crate::utils::{AppError, AppResult};

fn validate_customer_details(req: &PlaceOrder) -> Result<(), AppError> {
    validate_required_text(&req.customer_name, "customer_name", MAX_NAME_LEN)?;
    validate_email(&req.customer_email, "customer_email")?;
    validate_phone(&req.customer_phone, "customer_phone")?;
    validate_required_text(&req.shipping_address, "shipping_address", MAX_ADDRESS_LEN)?;
    validate_text_len(&req.comment, "comment", MAX_COMMENT_LEN)?;
    Ok(())
}

/// POST /api/checkout - place an order from the session cart
pub async fn place_order(
    State(state): State<ServerState>,
    cart_id: CartId,
    Json(payload): Json<PlaceOrder>,
) -> AppResult<Json<PlacedOrder>> {
    validate_customer_details(&payload)?;

    // Cart-level pre-check (snapshot reads, no locks) so every problem is
    // reported at once; the transaction re-guards each line atomically.
    let lines = state.carts.get(&cart_id.0);
    if !lines.is_empty() {
        let rejections = validator::validate_cart(&state.pool, &lines).await?;
        if !rejections.is_empty() {
            return Err(AppError::Rejected(rejections));
        }
    }

    let placed = checkout::place_order(&state.pool, &state.carts, &cart_id.0, &payload).await?;
    Ok(Json(placed))
}
