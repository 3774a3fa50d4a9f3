//! # Register State
//!
//! A ledger shared between callers.
//!
//! ## Thread Safety
//! The ledger is wrapped in `Arc<Mutex<T>>` because:
//! 1. The core ledger assumes exclusive access per instance
//! 2. Every ledger operation is short and never blocks
//! 3. One lock around each operation is therefore enough
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Register State Operations                            │
//! │                                                                         │
//! │  Caller Action            RegisterState            Ledger Change        │
//! │  ─────────────            ─────────────            ─────────────        │
//! │                                                                         │
//! │  Scan item ──────────────► add_item() ────────────► total, items, log   │
//! │                                                                         │
//! │  Typed entry ────────────► add_item_text() ───────► (parsed first)      │
//! │                                                                         │
//! │  Set discount ───────────► set_discount() ────────► discount            │
//! │                                                                         │
//! │  Discount key ───────────► apply_discount() ──────► total               │
//! │                                                                         │
//! │  Void key ───────────────► void_last_transaction() ► total, items, log  │
//! │                                                                         │
//! │  View totals ────────────► summary() ─────────────► (read only)         │
//! │                                                                         │
//! │  NOTE: Every call holds the lock for the whole operation.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cashdesk_core::validation::{parse_price, parse_quantity};
use cashdesk_core::{
    DiscountApplication, DiscountInput, DiscountOutcome, Ledger, LedgerSummary, Money,
    TransactionRecord, VoidOutcome,
};
use tracing::debug;

use crate::error::SessionResult;

/// A ledger behind a mutex, cheap to clone and hand to other threads.
#[derive(Debug, Clone, Default)]
pub struct RegisterState {
    ledger: Arc<Mutex<Ledger>>,
}

impl RegisterState {
    pub fn new(ledger: Ledger) -> Self {
        RegisterState {
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Ledger operations never leave partial state behind, so a lock
    /// poisoned by a panicking reader is still safe to reuse.
    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Executes a function with read access to the ledger.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let items = state.with_ledger(|ledger| ledger.items().to_vec());
    /// ```
    pub fn with_ledger<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Ledger) -> R,
    {
        f(&self.lock())
    }

    /// Executes a function with write access to the ledger.
    pub fn with_ledger_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Ledger) -> R,
    {
        f(&mut self.lock())
    }

    pub fn set_discount(&self, input: impl Into<DiscountInput>) -> DiscountOutcome {
        let outcome = self.lock().set_discount(input);
        debug!(
            discount = outcome.discount().percent(),
            rejected = outcome.is_rejected(),
            "Discount configured"
        );
        outcome
    }

    /// Adds an item and returns a copy of its transaction record.
    pub fn add_item(
        &self,
        item: impl Into<String>,
        price: Money,
        quantity: impl Into<Option<i64>>,
    ) -> SessionResult<TransactionRecord> {
        let mut ledger = self.lock();
        let record = ledger.add_item(item, price, quantity)?.clone();
        debug!(
            item = %record.item,
            quantity = record.quantity,
            subtotal = %record.subtotal.amount(),
            total = %ledger.total().amount(),
            "Item added"
        );
        Ok(record)
    }

    /// Adds an item from typed text; a blank quantity means 1.
    pub fn add_item_text(
        &self,
        item: impl Into<String>,
        price: &str,
        quantity: &str,
    ) -> SessionResult<TransactionRecord> {
        let price = parse_price(price)?;
        let quantity = parse_quantity(quantity)?;
        self.add_item(item, price, quantity)
    }

    pub fn apply_discount(&self) -> DiscountApplication {
        let mut ledger = self.lock();
        let applied = ledger.apply_discount();
        debug!(
            discount = ledger.discount().percent(),
            total = %ledger.total().amount(),
            "Discount requested"
        );
        applied
    }

    pub fn void_last_transaction(&self) -> VoidOutcome {
        let mut ledger = self.lock();
        let outcome = ledger.void_last_transaction();
        match &outcome {
            VoidOutcome::Voided(record) => debug!(
                item = %record.item,
                quantity = record.quantity,
                total = %ledger.total().amount(),
                "Transaction voided"
            ),
            VoidOutcome::ResetTotal => debug!("Nothing to void, total reset"),
        }
        outcome
    }

    pub fn summary(&self) -> LedgerSummary {
        self.lock().summary()
    }
}
