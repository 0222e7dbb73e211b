//! # billing-core: Pure Billing Logic
//!
//! This crate is the **heart** of the billing till. It contains the catalog,
//! the cart ledger and the discount + GST bill computation as pure code with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Billing Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Billing page (index.html)                    │   │
//! │  │        Product list ──► Cart table ──► Discount ──► Totals      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP / JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    billing-api (Axum)                           │   │
//! │  │    /products, /cart/add, /cart/discount, /cart/remove, ...      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ billing-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  catalog  │  │  ledger   │  │   │
//! │  │   │  Product  │  │   Money   │  │  Catalog  │  │CartLedger │  │   │
//! │  │   │ LineItem  │  │ rounding  │  │  lookup   │  │   Bill    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO LOCKS • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, LineItem, TaxRate)
//! - [`money`] - Money type with integer minor units
//! - [`catalog`] - Read-only product catalog
//! - [`ledger`] - Cart ledger and bill computation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use billing_core::{Catalog, CartLedger};
//! use rust_decimal::Decimal;
//!
//! let mut cart = CartLedger::new(Arc::new(Catalog::builtin()));
//! cart.add_item("towel", 2).unwrap();
//! cart.add_item("rubber", 1).unwrap();
//!
//! let bill = cart.set_discount(Decimal::from(10));
//! assert_eq!(bill.grand_total, Decimal::new(33264, 2));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod ledger;
pub mod money;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use error::{CoreError, CoreResult};
pub use ledger::{Bill, CartLedger};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Central GST share of the 12% slab.
pub const CGST_RATE: TaxRate = TaxRate::from_bps(600);

/// State GST share of the 12% slab.
pub const SGST_RATE: TaxRate = TaxRate::from_bps(600);

/// Decimal places on every rounded bill figure and on stored prices.
pub const MONEY_DECIMAL_PLACES: u32 = 2;
