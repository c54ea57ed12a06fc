//! Unified error handling
//!
//! [`AppError`] is the application-level error returned by HTTP handlers;
//! [`AppResponse`] is the JSON envelope failed requests answer with.
//!
//! Persistence failures are logged with full detail here, at the boundary,
//! and mapped to a generic client message. Business rejections keep their
//! structure so the caller can re-render the cart with per-line reasons.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::models::LineRejection;
use tracing::error;

/// API error envelope
///
/// ```json
/// {
///   "code": "E0005",
///   "message": "Some items are no longer available",
///   "data": [ ... ]
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Cart validation produced structured per-line rejections
    #[error("Some items are no longer available")]
    Rejected(Vec<LineRejection>),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg, None),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg, None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg, None),
            AppError::Rejected(rejections) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "E0005",
                "Some items are no longer available".to_string(),
                serde_json::to_value(&rejections).ok(),
            ),
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9002",
                    "Could not complete your order, please try again".to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(AppResponse::<serde_json::Value> {
            code: code.to_string(),
            message,
            data: details,
        });

        (status, body).into_response()
    }
}

impl From<crate::cart::CartError> for AppError {
    fn from(err: crate::cart::CartError) -> Self {
        use crate::cart::CartError;
        match err {
            CartError::InsufficientStock { available } => {
                AppError::Conflict(format!("insufficient stock, available: {available}"))
            }
            CartError::LineNotFound(id) => AppError::NotFound(format!("Cart line {id}")),
        }
    }
}

impl From<crate::checkout::PlacementError> for AppError {
    fn from(err: crate::checkout::PlacementError) -> Self {
        use crate::checkout::PlacementError;
        match err {
            PlacementError::EmptyCart => AppError::Validation("cart is empty".into()),
            PlacementError::StockChanged(rejections) => AppError::Rejected(rejections),
            PlacementError::Persistence(repo_err) => repo_err.into(),
        }
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
