//! Product Model

use serde::{Deserialize, Serialize};

/// Catalog product row.
///
/// `stock_quantity` is the only field the checkout core writes; everything
/// else belongs to the external catalog editor and is read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    /// Merchant article/SKU code
    pub article: String,
    pub is_active: bool,
    pub is_bestseller: bool,
    pub stock_quantity: i64,
    pub created_at: i64,
}
