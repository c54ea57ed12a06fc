//! Request extractors

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::utils::AppError;

/// Header carrying the opaque session cart token
pub const CART_ID_HEADER: &str = "x-cart-id";

/// Opaque cart token supplied by the calling layer.
///
/// The core never owns session lifecycle; it just keys the cart store with
/// whatever token the caller presents.
#[derive(Debug, Clone)]
pub struct CartId(pub String);

impl<S> FromRequestParts<S> for CartId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(CART_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| CartId(v.to_string()))
            .ok_or_else(|| AppError::validation(format!("missing {CART_ID_HEADER} header")))
    }
}
