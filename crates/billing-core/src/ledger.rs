//! # Cart Ledger
//!
//! The cart: ordered line items, an incrementally maintained subtotal and a
//! discount percentage, plus the bill computation.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Ledger Operations                               │
//! │                                                                         │
//! │  Operation            State Change                         Returns     │
//! │  ─────────            ────────────                         ───────     │
//! │                                                                         │
//! │  add_item(name, qty) ─► items.push(line); subtotal += amt ─► Bill      │
//! │                                                                         │
//! │  remove_item(name) ───► first match removed; subtotal -= amt ► Bill    │
//! │                                                                         │
//! │  set_discount(pct) ───► discount_percent = pct ────────────► Bill      │
//! │                                                                         │
//! │  clear() ─────────────► items = []; subtotal = 0; pct = 0 ─► Bill      │
//! │                                                                         │
//! │  compute_bill() ──────► (read only) ───────────────────────► Bill      │
//! │                                                                         │
//! │  A failed operation returns Err and leaves the ledger untouched.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Bill Computation
//! ```text
//! discount_amount     = subtotal × discount_percent / 100
//! discounted_subtotal = subtotal − discount_amount
//! cgst                = discounted_subtotal × 6%
//! sgst                = discounted_subtotal × 6%
//! grand_total         = discounted_subtotal + cgst + sgst
//! ```
//! All intermediate values stay exact; only the five output figures are
//! rounded to two places.
//!
//! ## Permissive Inputs
//! Quantities and discount percentages are not validated. A negative
//! quantity lowers the subtotal, a zero quantity appends a zero-amount line,
//! and a discount outside `0..=100` yields a negative discount or a negative
//! total. Callers that need bounds must check them before calling.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::{round_money, Money};
use crate::types::LineItem;
use crate::{CGST_RATE, SGST_RATE};

// =============================================================================
// Bill
// =============================================================================

/// Snapshot of the cart with discount and GST applied.
///
/// `subtotal` and `discount_percent` are reported as stored; the other
/// money figures are rounded half-to-even to two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub cart: Vec<LineItem>,
    pub subtotal: Money,
    pub discount_percent: Decimal,
    pub discount_amount: Decimal,
    pub discounted_subtotal: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub grand_total: Decimal,
}

// =============================================================================
// Cart Ledger
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - `subtotal` equals the sum of `amount` over `items` after every call
/// - `items` keeps insertion order; duplicate product names are separate lines
#[derive(Debug, Clone)]
pub struct CartLedger {
    catalog: Arc<Catalog>,
    items: Vec<LineItem>,
    subtotal: Money,
    discount_percent: Decimal,
}

impl CartLedger {
    /// Creates an empty, undiscounted cart over `catalog`.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        CartLedger {
            catalog,
            items: Vec::new(),
            subtotal: Money::zero(),
            discount_percent: Decimal::ZERO,
        }
    }

    /// Appends `qty` units of `product_name` as a new line.
    ///
    /// Re-adding a product already in the cart creates a second line; it is
    /// never merged into the first.
    ///
    /// ## Errors
    /// - [`CoreError::ProductNotFound`] if the name is not in the catalog
    /// - [`CoreError::AmountOverflow`] if the line amount or subtotal overflows
    pub fn add_item(&mut self, product_name: &str, qty: i64) -> CoreResult<Bill> {
        let product = self.catalog.lookup(product_name)?;
        let overflow = || CoreError::AmountOverflow {
            product: product_name.to_string(),
            qty,
        };

        let line = LineItem::from_product(&product, qty).ok_or_else(overflow)?;
        let subtotal = self.subtotal.checked_add(line.amount).ok_or_else(overflow)?;

        self.items.push(line);
        self.subtotal = subtotal;
        Ok(self.compute_bill())
    }

    /// Removes the first line whose product name matches exactly.
    ///
    /// Later lines for the same product stay in the cart.
    ///
    /// ## Errors
    /// [`CoreError::ProductNotInCart`] if no line matches.
    pub fn remove_item(&mut self, product_name: &str) -> CoreResult<Bill> {
        let index = self
            .items
            .iter()
            .position(|item| item.product == product_name)
            .ok_or_else(|| CoreError::ProductNotInCart(product_name.to_string()))?;

        let line = &self.items[index];
        let subtotal = self
            .subtotal
            .checked_sub(line.amount)
            .ok_or_else(|| CoreError::AmountOverflow {
                product: line.product.clone(),
                qty: line.qty,
            })?;

        self.items.remove(index);
        self.subtotal = subtotal;
        Ok(self.compute_bill())
    }

    /// Replaces the discount percentage. Any value is accepted.
    pub fn set_discount(&mut self, percent: Decimal) -> Bill {
        self.discount_percent = percent;
        self.compute_bill()
    }

    /// Empties the cart and resets the discount to zero.
    pub fn clear(&mut self) -> Bill {
        self.items.clear();
        self.subtotal = Money::zero();
        self.discount_percent = Decimal::ZERO;
        self.compute_bill()
    }

    /// Computes the bill for the current state. No side effects.
    ///
    /// Decimal operations saturate, so an absurd discount percentage
    /// produces a clamped figure rather than a panic.
    pub fn compute_bill(&self) -> Bill {
        let subtotal = self.subtotal.to_decimal();

        let discount_amount =
            subtotal.saturating_mul(self.discount_percent / Decimal::ONE_HUNDRED);
        let discounted_subtotal = subtotal.saturating_sub(discount_amount);

        let cgst = discounted_subtotal.saturating_mul(CGST_RATE.as_fraction());
        let sgst = discounted_subtotal.saturating_mul(SGST_RATE.as_fraction());
        let grand_total = discounted_subtotal.saturating_add(cgst).saturating_add(sgst);

        Bill {
            cart: self.items.clone(),
            subtotal: self.subtotal,
            discount_percent: self.discount_percent,
            discount_amount: round_money(discount_amount),
            discounted_subtotal: round_money(discounted_subtotal),
            cgst: round_money(cgst),
            sgst: round_money(sgst),
            grand_total: round_money(grand_total),
        }
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
