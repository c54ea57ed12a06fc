//! Health check endpoint

use crate::core::ServerState;
use axum::{Json, Router, extract::State, routing::get};
use serde_json::json;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

/// GET /api/health - liveness plus a cheap db ping
async fn health(State(state): State<ServerState>) -> Json<serde_json::Value> {
    let db_ok = sqlx::query("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .is_ok();
    Json(json!({
        "status": if db_ok { "ok" } else { "degraded" },
        "carts": state.carts.len(),
    }))
}
