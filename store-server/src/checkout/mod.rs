//! Checkout core
//!
//! The order-placement pipeline: cart validation against live inventory,
//! delivery-fee pricing, and the atomic transaction that turns a cart into a
//! persisted order while decrementing stock. The cart is cleared only after a
//! successful commit.

pub mod money;
pub mod placement;
pub mod pricing;
pub mod validator;

pub use placement::{PlacementError, place_order};
