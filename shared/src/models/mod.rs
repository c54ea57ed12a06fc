//! Data models
//!
//! Shared between store-server and its API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All persistent IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod cart;
pub mod order;
pub mod product;

// Re-exports
pub use cart::*;
pub use order::*;
pub use product::*;
