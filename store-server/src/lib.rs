//! Storefront checkout server
//!
//! The order-placement core of an online storefront: a session-scoped cart
//! store, validation against live inventory, and the atomic checkout
//! transaction that persists an order, decrements stock, and clears the cart
//! only on success. Catalog editing, user management and all rendering live
//! in external collaborators; this crate exposes a thin JSON API.

pub mod api;
pub mod cart;
pub mod checkout;
pub mod core;
pub mod db;
pub mod utils;

pub use crate::core::{Config, Server, ServerState};

/// Load environment and initialize logging; called once from main.
pub fn setup_environment(config: &Config) {
    utils::logger::init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
}
