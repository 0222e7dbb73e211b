//! # Domain Types
//!
//! Core domain types used throughout the billing workspace.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    LineItem     │   │    TaxRate      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name (key)     │──►│  product        │   │  bps (u32)      │       │
//! │  │  price          │   │  price (frozen) │   │  600 = 6%       │       │
//! │  └─────────────────┘   │  qty            │   └─────────────────┘       │
//! │                        │  amount         │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 600 bps = 6% (one half of the 12% GST slab)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// The rate as a multiplier: 600 bps → 0.06.
    #[inline]
    pub fn as_fraction(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// The name is the identity: lookups are exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name, also the catalog key.
    pub name: String,

    /// Unit price.
    pub price: Money,
}

impl Product {
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Product {
            name: name.into(),
            price,
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One add-to-cart action.
///
/// ## Snapshot Pattern
/// `price` is copied from the catalog when the line is created, and
/// `amount` is fixed at `price × qty`. Removing the line subtracts exactly
/// this `amount` from the subtotal.
///
/// Field names match the JSON the billing page reads:
/// `{"product": "towel", "price": 150.0, "qty": 2, "amount": 300.0}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product: String,
    pub price: Money,
    pub qty: i64,
    pub amount: Money,
}

impl LineItem {
    /// Creates a line for `qty` units of `product`.
    ///
    /// Returns `None` if `price × qty` overflows.
    pub fn from_product(product: &Product, qty: i64) -> Option<Self> {
        let amount = product.price.checked_mul_qty(qty)?;
        Some(LineItem {
            product: product.name.clone(),
            price: product.price,
            qty,
            amount,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
