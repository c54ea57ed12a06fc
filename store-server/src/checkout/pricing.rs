//! Delivery fee policy
//!
//! Pure mapping from delivery method to a flat fee. The match is total over
//! the closed enum: unknown tokens are rejected when the request is parsed
//! and never reach pricing, so there is no silent free-delivery fallback.

use rust_decimal::Decimal;
use shared::models::DeliveryMethod;

/// Flat delivery fee for a method
pub fn delivery_fee(method: DeliveryMethod) -> Decimal {
    match method {
        DeliveryMethod::Pickup => Decimal::ZERO,
        DeliveryMethod::Courier => Decimal::from(300),
        DeliveryMethod::NationalPost => Decimal::from(200),
        DeliveryMethod::ExpressCarrier => Decimal::from(250),
    }
}
