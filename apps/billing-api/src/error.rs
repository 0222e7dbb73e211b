//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow                                           │
//! │                                                                         │
//! │  Handler ──► CartLedger op ──► CoreError::ProductNotFound ──┐           │
//! │                                CoreError::ProductNotInCart ─┼► ApiError │
//! │                                CoreError::AmountOverflow ───┘     │     │
//! │                                                                   ▼     │
//! │                                   404 / 422 + {"code", "detail"} JSON   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Status codes are decided here and nowhere else; billing-core knows
//! nothing about HTTP.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use billing_core::CoreError;
use serde::Serialize;
use tracing::{error, warn};

/// Error returned from HTTP handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "PRODUCT_NOT_FOUND",
///   "detail": "Product not found: unknown-product"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,

    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message
    pub detail: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Add referenced a name the catalog does not have (404)
    ProductNotFound,

    /// Remove targeted a product with no line in the cart (404)
    ProductNotInCart,

    /// Amount out of range (422)
    AmountOverflow,

    /// Internal server error (500)
    Internal,
}

impl ApiError {
    pub fn new(status: StatusCode, code: ErrorCode, detail: impl Into<String>) -> Self {
        ApiError {
            status,
            code,
            detail: detail.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(detail: impl Into<String>) -> Self {
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Internal, detail)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let (status, code) = match &err {
            CoreError::ProductNotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::ProductNotFound),
            CoreError::ProductNotInCart(_) => (StatusCode::NOT_FOUND, ErrorCode::ProductNotInCart),
            CoreError::AmountOverflow { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::AmountOverflow)
            }
        };
        ApiError::new(status, code, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.detail)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(code = ?self.code, detail = %self.detail, "request failed");
        } else {
            warn!(code = ?self.code, detail = %self.detail, "request rejected");
        }
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kinds_map_to_404() {
        let err = ApiError::from(CoreError::ProductNotFound("soap".to_string()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, ErrorCode::ProductNotFound);
        assert_eq!(err.detail, "Product not found: soap");

        let err = ApiError::from(CoreError::ProductNotInCart("towel".to_string()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, ErrorCode::ProductNotInCart);
    }

    #[test]
    fn test_overflow_maps_to_422() {
        let err = ApiError::from(CoreError::AmountOverflow {
            product: "Toys".to_string(),
            qty: i64::MAX,
        });
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_serialization() {
        let err = ApiError::from(CoreError::ProductNotInCart("socks".to_string()));
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "code": "PRODUCT_NOT_IN_CART",
                "detail": "Product not in cart: socks"
            })
        );
    }
}
