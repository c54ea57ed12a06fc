//! Order Validator
//!
//! Checks every cart line against the current product rows and collects
//! structured per-line rejections. All lines are checked, with no
//! short-circuit, so the caller can report every problem at once. A non-empty rejection list
//! never consumes the cart.
//!
//! Reads here are snapshot reads without locks; stock may change between this
//! check and the commit, so the placement transaction re-guards every line
//! with an atomic conditional decrement and reuses [`check_line`] to classify
//! any line the guard refuses.

use crate::db::repository::{RepoResult, product};
use shared::models::{CartLine, LineRejection, Product};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnection;

/// Judge one line against the product row the lookup returned.
pub(crate) fn check_line(line: &CartLine, product: Option<&Product>) -> Option<LineRejection> {
    let Some(product) = product else {
        return Some(LineRejection::ProductNotFound {
            product_id: line.product_id,
            product_name: line.product_name.clone(),
        });
    };
    if !product.is_active {
        return Some(LineRejection::ProductInactive {
            product_id: line.product_id,
            product_name: line.product_name.clone(),
        });
    }
    if product.stock_quantity < line.quantity {
        return Some(LineRejection::InsufficientStock {
            product_id: line.product_id,
            product_name: line.product_name.clone(),
            available: product.stock_quantity,
        });
    }
    None
}

/// Validate cart lines on one connection.
/// Returns the rejection list; empty means the cart is accepted.
pub async fn validate_lines(
    conn: &mut SqliteConnection,
    lines: &[CartLine],
) -> RepoResult<Vec<LineRejection>> {
    let mut rejections = Vec::new();
    for line in lines {
        let product = product::fetch_current(&mut *conn, line.product_id).await?;
        if let Some(rejection) = check_line(line, product.as_ref()) {
            rejections.push(rejection);
        }
    }
    Ok(rejections)
}

/// Pool-level entry point for the cart-level pre-check.
pub async fn validate_cart(
    pool: &SqlitePool,
    lines: &[CartLine],
) -> RepoResult<Vec<LineRejection>> {
    let mut conn = pool.acquire().await?;
    validate_lines(&mut conn, lines).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: i64, quantity: i64) -> CartLine {
        CartLine {
            id: 1,
            product_id,
            product_name: format!("Product {product_id}"),
            unit_price: 10.0,
            quantity,
            added_at: 0,
        }
    }

    fn product(id: i64, stock: i64, is_active: bool) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            description: String::new(),
            price: 10.0,
            category: String::new(),
            article: String::new(),
            is_active,
            is_bestseller: false,
            stock_quantity: stock,
            created_at: 0,
        }
    }

    #[test]
    fn missing_product_is_rejected() {
        let rejection = check_line(&line(99, 1), None).unwrap();
        assert!(matches!(
            rejection,
            LineRejection::ProductNotFound { product_id: 99, .. }
        ));
    }

    #[test]
    fn inactive_product_is_rejected() {
        let p = product(7, 10, false);
        let rejection = check_line(&line(7, 1), Some(&p)).unwrap();
        assert!(matches!(
            rejection,
            LineRejection::ProductInactive { product_id: 7, .. }
        ));
    }

    #[test]
    fn short_stock_reports_available_count() {
        let p = product(7, 1, true);
        let rejection = check_line(&line(7, 3), Some(&p)).unwrap();
        assert_eq!(
            rejection,
            LineRejection::InsufficientStock {
                product_id: 7,
                product_name: "Product 7".into(),
                available: 1,
            }
        );
    }

    #[test]
    fn exact_stock_passes() {
        let p = product(7, 3, true);
        assert!(check_line(&line(7, 3), Some(&p)).is_none());
    }
}
