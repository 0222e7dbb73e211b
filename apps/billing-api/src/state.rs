//! # Ledger State
//!
//! The one cart shared by every HTTP request.
//!
//! ## Thread Safety
//! The ledger is wrapped in `Arc<Mutex<T>>` because:
//! 1. Axum runs handlers concurrently on the multi-threaded runtime
//! 2. Every cart operation is a read-modify-write of the subtotal
//! 3. Two adds interleaving outside a lock would lose an increment
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /cart/add ──┐                                                     │
//! │  POST /cart/add ──┼──► lock() ──► CartLedger::add_item ──► unlock()    │
//! │  DELETE /cart ────┘     (one at a time, whole operation inside)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The lock is a `std::sync::Mutex`: ledger calls are short and never
//! await, so the guard is never held across a suspension point.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use billing_core::{Catalog, CartLedger};

/// Shared handle to the process-wide cart.
///
/// Cloning is cheap and every clone sees the same cart.
#[derive(Debug, Clone)]
pub struct LedgerState {
    ledger: Arc<Mutex<CartLedger>>,
}

impl LedgerState {
    /// Creates an empty cart over `catalog`.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        LedgerState {
            ledger: Arc::new(Mutex::new(CartLedger::new(catalog))),
        }
    }

    /// Executes a function with read access to the ledger.
    ///
    /// ```rust,ignore
    /// let bill = ledger_state.with_ledger(CartLedger::compute_bill);
    /// ```
    pub fn with_ledger<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartLedger) -> R,
    {
        f(&self.lock())
    }

    /// Executes a function with exclusive write access to the ledger.
    ///
    /// ```rust,ignore
    /// ledger_state.with_ledger_mut(|ledger| ledger.add_item("towel", 2))?;
    /// ```
    pub fn with_ledger_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartLedger) -> R,
    {
        f(&mut self.lock())
    }

    // CartLedger checks before it mutates, so a panicking holder cannot have
    // left a half-applied update behind.
    fn lock(&self) -> MutexGuard<'_, CartLedger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
