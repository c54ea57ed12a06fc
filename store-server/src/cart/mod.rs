//! Shopping cart
//!
//! [`store::CartStore`] keeps session-scoped carts in memory; this module
//! holds the pure line-editing rules shared by the cart handlers. Name and
//! price are snapshotted when a line is added: what the customer saw is what
//! they pay, even if the catalog changes afterwards.

pub mod store;

pub use store::{CART_IDLE_TIMEOUT_MS, CartStore};

use shared::models::{CartLine, Product};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("insufficient stock, available: {available}")]
    InsufficientStock { available: i64 },

    #[error("cart line {0} not found")]
    LineNotFound(i64),
}

/// Next line id: unique within one cart, next-available-integer.
fn next_line_id(lines: &[CartLine]) -> i64 {
    lines.iter().map(|l| l.id).max().unwrap_or(0) + 1
}

/// Add a product to the cart, merging with an existing line for the same
/// product. A non-positive quantity is coerced to 1. The combined quantity
/// must not exceed the product's current stock.
pub fn add_line(
    lines: &mut Vec<CartLine>,
    product: &Product,
    quantity: i64,
    now: i64,
) -> Result<(), CartError> {
    let quantity = quantity.max(1);

    if let Some(existing) = lines.iter_mut().find(|l| l.product_id == product.id) {
        if existing.quantity + quantity > product.stock_quantity {
            return Err(CartError::InsufficientStock {
                available: product.stock_quantity,
            });
        }
        existing.quantity += quantity;
        existing.added_at = now;
        return Ok(());
    }

    if quantity > product.stock_quantity {
        return Err(CartError::InsufficientStock {
            available: product.stock_quantity,
        });
    }

    lines.push(CartLine {
        id: next_line_id(lines),
        product_id: product.id,
        product_name: product.name.clone(),
        unit_price: product.price,
        quantity,
        added_at: now,
    });
    Ok(())
}

/// Set a line's quantity; zero or negative removes the line.
/// `stock` is the product's current stock for the capped check.
pub fn set_quantity(
    lines: &mut Vec<CartLine>,
    line_id: i64,
    quantity: i64,
    stock: i64,
) -> Result<(), CartError> {
    let idx = lines
        .iter()
        .position(|l| l.id == line_id)
        .ok_or(CartError::LineNotFound(line_id))?;

    if quantity <= 0 {
        lines.remove(idx);
        return Ok(());
    }
    if quantity > stock {
        return Err(CartError::InsufficientStock { available: stock });
    }
    lines[idx].quantity = quantity;
    Ok(())
}

/// Remove one line; false if no such line existed.
pub fn remove_line(lines: &mut Vec<CartLine>, line_id: i64) -> bool {
    let before = lines.len();
    lines.retain(|l| l.id != line_id);
    lines.len() != before
}
