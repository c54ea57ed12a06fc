//! Shared types for the storefront
//!
//! Domain models and payload types used across the API boundary.
//! DB row types derive `sqlx::FromRow` behind the `db` feature.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
