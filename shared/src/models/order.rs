//! Order Models
//!
//! Orders are created once, atomically, together with their items; the only
//! post-creation mutation is the status transition. Item rows snapshot the
//! product name and unit price at placement time.

use serde::{Deserialize, Serialize};

/// Delivery method (closed set; unknown tokens are rejected at the boundary)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum DeliveryMethod {
    Pickup,
    Courier,
    NationalPost,
    ExpressCarrier,
}

/// Payment method (closed set; no gateway integration behind it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PaymentMethod {
    Card,
    CashOnDelivery,
    OnlineTransfer,
}

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderStatus {
    New,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// Order entity
///
/// `user_id` is nullable (guest checkout) and carries no FK so orders survive
/// deletion of the user by the external identity store.
/// Invariant: `total_amount == sum(item.total_price) + delivery fee`, fixed at
/// creation and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub user_id: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub shipping_address: String,
    pub delivery_method: DeliveryMethod,
    pub payment_method: PaymentMethod,
    pub comment: String,
    pub order_date: i64,
    pub status: OrderStatus,
    pub total_amount: f64,
}

/// Order item entity. Immutable after creation; owned by its order
/// (cascade-deleted with it). `product_id` is a non-owning reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
}

/// Order with its items (confirmation/detail view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Checkout payload: customer/shipping fields plus method tokens.
///
/// Field-level validation (required name/email/phone/address, formats, caps)
/// happens at the HTTP boundary before the placement transaction runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrder {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub shipping_address: String,
    pub delivery_method: DeliveryMethod,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub comment: String,
    /// Acting user, when the calling layer has an authenticated session
    pub user_id: Option<String>,
}

/// Placement result returned to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub order_id: i64,
    pub total_amount: f64,
}

/// Status transition payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// Per-line rejection reason from cart validation.
///
/// Carries enough structure (product identity + reason) for the caller to
/// re-render the cart with per-line messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineRejection {
    ProductNotFound {
        product_id: i64,
        product_name: String,
    },
    ProductInactive {
        product_id: i64,
        product_name: String,
    },
    InsufficientStock {
        product_id: i64,
        product_name: String,
        available: i64,
    },
}
