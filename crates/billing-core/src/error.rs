//! # Error Types
//!
//! Domain-specific error types for billing-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  billing-core errors (this file)                                       │
//! │  └── CoreError        - Cart ledger failures                           │
//! │                                                                         │
//! │  billing-api errors (app crate)                                        │
//! │  ├── ConfigError      - Startup configuration failures                 │
//! │  └── ApiError         - What the HTTP client sees (serialized)         │
//! │                                                                         │
//! │  Flow: CoreError → ApiError → HTTP 404 / 422                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the product name in every message
//! 3. A failed operation never mutates the ledger

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart ledger errors.
///
/// Only the lookups can fail. Quantities and discount percentages are
/// accepted as given, so there is no validation variant here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Product name is not in the catalog.
    ///
    /// ## When This Occurs
    /// - `add_item` with a name that has no catalog entry
    /// - Names are case-sensitive: `"Towel"` does not match `"towel"`
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No line item in the cart carries this product name.
    ///
    /// ## When This Occurs
    /// - `remove_item` on an empty cart
    /// - `remove_item` after every line for that product was already removed
    #[error("Product not in cart: {0}")]
    ProductNotInCart(String),

    /// A line amount or the running subtotal left the `i64` range.
    #[error("Amount overflow for {product} x {qty}")]
    AmountOverflow { product: String, qty: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ProductNotFound("unknown-product".to_string());
        assert_eq!(err.to_string(), "Product not found: unknown-product");

        let err = CoreError::ProductNotInCart("towel".to_string());
        assert_eq!(err.to_string(), "Product not in cart: towel");
    }

    #[test]
    fn test_overflow_message() {
        let err = CoreError::AmountOverflow {
            product: "Toys".to_string(),
            qty: i64::MAX,
        };
        assert_eq!(
            err.to_string(),
            format!("Amount overflow for Toys x {}", i64::MAX)
        );
    }
}
