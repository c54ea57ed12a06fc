//! API route modules
//!
//! One module per resource, each exposing `router()` (teacher-style
//! router/handler split):
//!
//! - [`health`] - liveness check
//! - [`cart`] - session cart editing and quotes
//! - [`checkout`] - the order placement transaction
//! - [`orders`] - confirmation lookup, status transition, cancellation

pub mod cart;
pub mod checkout;
pub mod extract;
pub mod health;
pub mod orders;

use crate::core::ServerState;
use axum::Router;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Assemble the full API router
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(cart::router())
        .merge(checkout::router())
        .merge(orders::router())
}
