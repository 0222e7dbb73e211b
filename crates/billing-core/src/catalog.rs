//! # Catalog
//!
//! Read-only mapping from product name to unit price.
//!
//! The catalog is built once at startup (built-in list or config file)
//! and shared behind an `Arc`; nothing mutates it afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;

/// Built-in product list: `(name, price in whole units)`.
const BUILTIN_PRODUCTS: &[(&str, i64)] = &[
    ("towel", 150),
    ("baby oil", 250),
    ("Baby Lotion", 120),
    ("Baby Diapers", 450),
    ("Feeding Bottle", 250),
    ("Baby Soap", 60),
    ("Baby Clothes Set", 800),
    ("Toys", 300),
    ("baby shampoo", 98),
    ("gripe water 100ml", 30),
    ("milk powder 1kg", 700),
    ("rubber", 30),
    ("socks", 60),
];

/// Product catalog keyed by exact, case-sensitive name.
///
/// Serializes as a plain `{name: price}` JSON/TOML table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: BTreeMap<String, Money>,
}

impl Catalog {
    /// Builds a catalog from products. A repeated name keeps the last price.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        Catalog {
            products: products.into_iter().map(|p| (p.name, p.price)).collect(),
        }
    }

    /// The till's default product list.
    pub fn builtin() -> Self {
        Catalog::new(
            BUILTIN_PRODUCTS
                .iter()
                .map(|&(name, major)| Product::new(name, Money::from_major(major))),
        )
    }

    /// All products with their unit prices.
    pub fn list_products(&self) -> &BTreeMap<String, Money> {
        &self.products
    }

    /// Looks up a product by exact name.
    ///
    /// ## Errors
    /// [`CoreError::ProductNotFound`] when no entry has this name.
    pub fn lookup(&self, name: &str) -> CoreResult<Product> {
        self.products
            .get_key_value(name)
            .map(|(name, price)| Product::new(name.clone(), *price))
            .ok_or_else(|| CoreError::ProductNotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterates `(name, price)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> {
        self.products.iter().map(|(name, price)| (name.as_str(), *price))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin()
    }
}
