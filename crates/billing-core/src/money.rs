//! # Money Module
//!
//! Provides the `Money` type for catalog prices, line amounts and the
//! running subtotal.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With binary floats:                                                    │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A running subtotal that is incremented and decremented many times     │
//! │  drifts, so "subtotal == sum of line amounts" stops holding.           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (paise)                             │
//! │    ₹150.00 × 2 = 15000 paise × 2 = 30000 paise, exactly                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Discount and GST produce fractional paise, so the bill computation
//! leaves `Money` for [`Decimal`] via [`Money::to_decimal`] and only rounds
//! the final output fields.
//!
//! ## Usage
//! ```rust
//! use billing_core::money::Money;
//!
//! let price = Money::from_major(150);
//! let amount = price.checked_mul_qty(2).unwrap();
//! assert_eq!(amount.minor_units(), 30000);
//! assert_eq!(amount.to_string(), "300.00");
//! ```

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::MONEY_DECIMAL_PLACES;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in minor units (1/100 of the currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative quantities are accepted by the ledger, so
///   line amounts and the subtotal can go below zero
/// - **Checked arithmetic only**: the ledger turns overflow into an error
///   instead of wrapping
/// - **Serialized as a decimal number**: `15000` minor units goes over the
///   wire as `150.0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ```rust
    /// use billing_core::money::Money;
    ///
    /// let price = Money::from_minor(9850); // 98.50
    /// assert_eq!(price.minor_units(), 9850);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// Only meant for small constants such as the built-in catalog.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Converts a decimal amount, e.g. a price read from config.
    ///
    /// Returns `None` when the value has more than two decimal places or
    /// does not fit in `i64` minor units.
    ///
    /// ```rust
    /// use billing_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(
    ///     Money::from_decimal(Decimal::new(1205, 1)),
    ///     Some(Money::from_minor(12050))
    /// );
    /// assert_eq!(Money::from_decimal(Decimal::new(1, 3)), None);
    /// ```
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        let scaled = value.checked_mul(Decimal::ONE_HUNDRED)?;
        if !scaled.fract().is_zero() {
            return None;
        }
        scaled.to_i64().map(Money)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Exact decimal form, in whole currency units.
    ///
    /// ```rust
    /// use billing_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(Money::from_minor(33000).to_decimal(), Decimal::from(330));
    /// ```
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, MONEY_DECIMAL_PLACES)
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// Negative and zero quantities are allowed; only overflow fails.
    #[inline]
    pub const fn checked_mul_qty(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Subtracts two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_sub(&self, other: Money) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }
}

/// Rounds a bill figure to two decimal places, half to even.
///
/// ## Bankers Rounding
/// ```text
/// 0.125 → 0.12   0.135 → 0.14   17.825 → 17.82
/// ```
/// Ties go to the even neighbour, so repeated bills do not drift upward.
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with two decimals and no currency sign, e.g. `150.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.to_decimal())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.to_decimal().normalize(), serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Money::from_decimal(value).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "amount {value} must have at most {MONEY_DECIMAL_PLACES} decimal places"
            ))
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
