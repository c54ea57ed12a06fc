//! Order API Handlers
//!
//! Confirmation lookup plus the two post-creation operations: status
//! transition and cancellation (which returns stock inside one transaction).

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{OrderDetail, StatusUpdate};

use crate::core::ServerState;
use crate::db::repository::order;
use crate::utils::AppResult;

/// GET /api/orders/{id} - order confirmation view (order + items).
/// A mismatched id is a hard NotFound; nothing is mutated.
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let detail = order::find_detail(&state.pool, id).await?;
    Ok(Json(detail))
}

/// PUT /api/orders/{id}/status - status transition
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<OrderDetail>> {
    order::update_status(&state.pool, id, payload.status).await?;
    let detail = order::find_detail(&state.pool, id).await?;
    Ok(Json(detail))
}

/// DELETE /api/orders/{id} - cancel/delete an order, restoring stock
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    order::delete_restoring_stock(&state.pool, id).await?;
    Ok(Json(true))
}
