//! Cart Models
//!
//! Cart lines are session-scoped snapshots: `product_name` and `unit_price`
//! are copied at add-time and deliberately do not track later catalog changes.

use serde::{Deserialize, Serialize};

/// One product+quantity entry in a shopping cart.
///
/// `id` is unique within one cart, assigned next-available-integer at
/// insertion. The line total (`unit_price * quantity`) is derived on demand
/// and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub added_at: i64,
}

/// Add-to-cart payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartAdd {
    pub product_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

/// Update-quantity payload (quantity <= 0 removes the line)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSetQuantity {
    pub quantity: i64,
}

/// Cart view returned to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub sub_total: f64,
}

/// Totals quote for a delivery method, computed without touching storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartQuote {
    pub sub_total: f64,
    pub delivery_fee: f64,
    pub total: f64,
}
