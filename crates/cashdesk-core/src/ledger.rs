//! # Ledger
//!
//! The register ledger: running total, purchased units, and an undo stack
//! of transaction records.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger Operations                                    │
//! │                                                                         │
//! │  Operation                 total              items        history     │
//! │  ─────────                 ─────              ─────        ───────     │
//! │                                                                         │
//! │  set_discount(d) ────────► -                  -            -           │
//! │                                                                         │
//! │  add_item(i, p, q) ──────► += p × q           push q × i   push record │
//! │                                                                         │
//! │  apply_discount() ───────► × (100 - d) / 100  -            -           │
//! │                                                                         │
//! │  void_last_transaction() ► -= subtotal        pop q        pop record  │
//! │                            (or := 0 if empty)                           │
//! │                                                                         │
//! │  NOTE: discounts touch the total only. A later void subtracts the      │
//! │        record's ORIGINAL subtotal, not a discounted share of it.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation is always callable. "Nothing to do" cases are reported
//! through the returned outcome and a [`Notice`], never as errors.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::discount::{Discount, DiscountInput, DiscountOutcome};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::notice::{Notice, NoticeSink, SilentSink};
use crate::DEFAULT_QUANTITY;

// =============================================================================
// Transaction Record
// =============================================================================

/// Snapshot of one `add_item` call, kept so the call can be reversed.
///
/// ## Design Notes
/// `subtotal` is computed once, when the item is added, and never
/// recomputed. Discounts applied afterwards do not reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Item label as given by the caller.
    pub item: String,

    /// Unit price at the time of adding (frozen).
    pub price: Money,

    /// Units purchased. May be zero or negative.
    pub quantity: i64,

    /// `price × quantity` (frozen).
    pub subtotal: Money,
}

impl TransactionRecord {
    /// Number of entries this record contributes to the item sequence.
    pub fn unit_count(&self) -> usize {
        unit_count(self.quantity)
    }
}

/// Negative and zero quantities contribute no item entries.
fn unit_count(quantity: i64) -> usize {
    usize::try_from(quantity).unwrap_or(0)
}

// =============================================================================
// Outcomes
// =============================================================================

/// Result of [`Ledger::apply_discount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountApplication {
    /// The discount is zero; the total was left alone.
    NoDiscount,
    /// The total was reduced; carries the new total.
    Applied { total: Money },
}

/// Result of [`Ledger::void_last_transaction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoidOutcome {
    /// The history was empty, so the total was reset to zero.
    ResetTotal,
    /// The most recent record was popped and reversed.
    Voided(TransactionRecord),
}

// =============================================================================
// Ledger
// =============================================================================

/// A point-of-sale ledger.
///
/// ## Invariants
/// - `discount` is always within `[0, 100]` (enforced by [`Discount`])
/// - Unless `items` is edited through [`Ledger::items_mut`], its length
///   equals the sum of `unit_count()` over the history
/// - `add_item` either applies all three mutations or none
#[derive(Clone)]
pub struct Ledger {
    discount: Discount,
    total: Money,
    items: Vec<String>,
    previous_transactions: Vec<TransactionRecord>,
    sink: Arc<dyn NoticeSink>,
}

impl Ledger {
    /// Creates an empty ledger whose notices go nowhere.
    ///
    /// An invalid `discount` is reset to zero (see [`Ledger::set_discount`]).
    pub fn new(discount: impl Into<DiscountInput>) -> Self {
        Self::with_sink(discount, Arc::new(SilentSink))
    }

    /// Creates an empty ledger that publishes notices to `sink`.
    ///
    /// The initial discount goes through the same validation as any later
    /// assignment, so a bad value is announced on `sink` right away.
    pub fn with_sink(discount: impl Into<DiscountInput>, sink: Arc<dyn NoticeSink>) -> Self {
        let mut ledger = Ledger {
            discount: Discount::NONE,
            total: Money::zero(),
            items: Vec::new(),
            previous_transactions: Vec::new(),
            sink,
        };
        ledger.set_discount(discount);
        ledger
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    pub fn discount(&self) -> Discount {
        self.discount
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Item labels, one entry per unit, in purchase order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Mutable access to the item sequence.
    ///
    /// Voids never remove more entries than exist, so edits made here
    /// cannot make a later void fail.
    pub fn items_mut(&mut self) -> &mut Vec<String> {
        &mut self.items
    }

    /// Transaction history, oldest first.
    pub fn previous_transactions(&self) -> &[TransactionRecord] {
        &self.previous_transactions
    }

    /// The record the next void would reverse.
    pub fn last_transaction(&self) -> Option<&TransactionRecord> {
        self.previous_transactions.last()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary::from(self)
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Assigns the discount percentage.
    ///
    /// ## Behavior
    /// ```text
    /// input ──► validate_discount()
    ///              │
    ///              ├── Ok(d)   → discount := d
    ///              │
    ///              └── Err(e)  → discount := 0
    ///                            publish "Not valid discount"
    /// ```
    /// Never fails; the returned outcome says which branch was taken.
    pub fn set_discount(&mut self, input: impl Into<DiscountInput>) -> DiscountOutcome {
        let outcome = DiscountOutcome::resolve(input);
        self.discount = outcome.discount();

        if let DiscountOutcome::Rejected { reason } = &outcome {
            self.sink.publish(&Notice::InvalidDiscount {
                reason: reason.clone(),
            });
        }

        outcome
    }

    /// Records a purchase of `quantity` units (1 when `None`) at `price` each.
    ///
    /// ## Behavior
    /// - `total += price × quantity`
    /// - `quantity` copies of `item` are appended to the item sequence
    /// - a [`TransactionRecord`] is pushed onto the history
    ///
    /// Prices and quantities are not bounded; zero and negative values are
    /// applied arithmetically. Returns the pushed record.
    ///
    /// ## Errors
    /// [`CoreError::AmountOverflow`] when the subtotal or the new total does
    /// not fit the decimal representation. Nothing is mutated in that case.
    pub fn add_item(
        &mut self,
        item: impl Into<String>,
        price: Money,
        quantity: impl Into<Option<i64>>,
    ) -> CoreResult<&TransactionRecord> {
        let item = item.into();
        let quantity = quantity.into().unwrap_or(DEFAULT_QUANTITY);

        let subtotal = price
            .checked_multiply_quantity(quantity)
            .ok_or(CoreError::AmountOverflow {
                operation: "subtotal",
            })?;
        let total = self
            .total
            .checked_add(subtotal)
            .ok_or(CoreError::AmountOverflow { operation: "total" })?;

        self.total = total;
        self.items
            .extend(std::iter::repeat(item.clone()).take(unit_count(quantity)));

        let index = self.previous_transactions.len();
        self.previous_transactions.push(TransactionRecord {
            item,
            price,
            quantity,
            subtotal,
        });

        Ok(&self.previous_transactions[index])
    }

    /// Takes the discount off the CURRENT total.
    ///
    /// Repeated calls compound: 100 at 10% becomes 90, then 81.
    /// With a zero discount nothing changes and "There is no discount to
    /// apply." is published.
    pub fn apply_discount(&mut self) -> DiscountApplication {
        if self.discount.is_zero() {
            self.sink.publish(&Notice::NoDiscountToApply);
            return DiscountApplication::NoDiscount;
        }

        self.total = self.total.apply_percentage_discount(self.discount);
        self.sink.publish(&Notice::DiscountApplied { total: self.total });

        DiscountApplication::Applied { total: self.total }
    }

    /// Reverses the most recent `add_item`.
    ///
    /// ## Behavior
    /// - Empty history: total := 0, items untouched
    /// - Otherwise: pop the record, subtract its subtotal (snapping results
    ///   below 1e-12 to zero) and drop up to `quantity` trailing items
    ///
    /// If the subtraction overflows the total is reset to zero, the same
    /// safe value used for an empty history.
    pub fn void_last_transaction(&mut self) -> VoidOutcome {
        let Some(record) = self.previous_transactions.pop() else {
            self.total = Money::zero();
            return VoidOutcome::ResetTotal;
        };

        self.total = self
            .total
            .checked_sub(record.subtotal)
            .map_or_else(Money::zero, Money::clamp_negligible);

        let removable = record.unit_count().min(self.items.len());
        self.items.truncate(self.items.len() - removable);

        VoidOutcome::Voided(record)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new(Discount::NONE)
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("discount", &self.discount)
            .field("total", &self.total)
            .field("items", &self.items)
            .field("previous_transactions", &self.previous_transactions)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Ledger totals summary for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub discount: Discount,
    pub total: Money,
    pub item_count: usize,
    pub transaction_count: usize,
}

impl From<&Ledger> for LedgerSummary {
    fn from(ledger: &Ledger) -> Self {
        LedgerSummary {
            discount: ledger.discount,
            total: ledger.total,
            item_count: ledger.items.len(),
            transaction_count: ledger.previous_transactions.len(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeLog;
    use crate::ValidationError;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn logged(discount: impl Into<DiscountInput>) -> (Ledger, Arc<NoticeLog>) {
        let log = Arc::new(NoticeLog::new());
        let ledger = Ledger::with_sink(discount, log.clone());
        (ledger, log)
    }

    fn widgets(n: usize) -> Vec<String> {
        vec!["Widget".to_string(); n]
    }

    // -------------------------------------------------------------------------
    // Discount configuration
    // -------------------------------------------------------------------------

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = Ledger::new(20);
        assert_eq!(ledger.discount().percent(), 20);
        assert!(ledger.total().is_zero());
        assert!(ledger.items().is_empty());
        assert!(ledger.previous_transactions().is_empty());
    }

    #[test]
    fn test_invalid_initial_discount_warns_and_defaults_to_zero() {
        for input in [
            DiscountInput::from("string"),
            DiscountInput::from(-5),
            DiscountInput::from(101),
            DiscountInput::Missing,
        ] {
            let (ledger, log) = logged(input);
            assert_eq!(ledger.discount(), Discount::NONE);
            assert_eq!(log.messages(), vec!["Not valid discount".to_string()]);
        }
    }

    #[test]
    fn test_discount_text_with_digit_separators() {
        let (ledger, log) = logged("5_0");
        assert_eq!(ledger.discount().percent(), 50);
        assert!(log.messages().is_empty());

        let (ledger, log) = logged("5__0");
        assert_eq!(ledger.discount(), Discount::NONE);
        assert_eq!(log.messages(), vec!["Not valid discount".to_string()]);
    }

    #[test]
    fn test_set_discount_keeps_valid_values_exactly() {
        let (mut ledger, log) = logged(0);
        for value in 0..=100i64 {
            let outcome = ledger.set_discount(value);
            assert!(!outcome.is_rejected());
            assert_eq!(i64::from(ledger.discount()), value);
        }
        assert!(log.notices().is_empty());
    }

    #[test]
    fn test_set_discount_rejection_resets_previous_value() {
        let (mut ledger, log) = logged(30);
        let outcome = ledger.set_discount(150);

        assert!(matches!(
            outcome,
            DiscountOutcome::Rejected {
                reason: ValidationError::OutOfRange { .. }
            }
        ));
        assert_eq!(ledger.discount(), Discount::NONE);
        assert!(matches!(log.notices().as_slice(), [Notice::InvalidDiscount { .. }]));
    }

    // -------------------------------------------------------------------------
    // add_item
    // -------------------------------------------------------------------------

    #[test]
    fn test_add_item_with_quantity() {
        let mut ledger = Ledger::new(0);
        let record = ledger
            .add_item("Widget", Money::from_major_minor(2, 50), 3)
            .unwrap()
            .clone();

        assert_eq!(record.subtotal, Money::from_cents(750));
        assert_eq!(record.quantity, 3);
        assert_eq!(ledger.total(), Money::from_cents(750));
        assert_eq!(ledger.items(), widgets(3).as_slice());
        assert_eq!(ledger.previous_transactions(), &[record]);
    }

    #[test]
    fn test_add_item_defaults_quantity_to_one() {
        let mut ledger = Ledger::new(0);
        ledger.add_item("eggs", Money::from_cents(98), None).unwrap();

        assert_eq!(ledger.items(), &["eggs".to_string()]);
        assert_eq!(ledger.last_transaction().unwrap().quantity, 1);
        assert_eq!(ledger.total(), Money::from_cents(98));
    }

    #[test]
    fn test_add_item_accepts_zero_and_negative_quantities() {
        let mut ledger = Ledger::new(0);
        ledger.add_item("refund", Money::from_cents(500), -2).unwrap();
        ledger.add_item("sample", Money::from_cents(500), 0).unwrap();

        assert_eq!(ledger.total(), Money::from_cents(-1000));
        assert!(ledger.items().is_empty());
        assert_eq!(ledger.previous_transactions().len(), 2);
    }

    #[test]
    fn test_add_item_overflow_leaves_ledger_untouched() {
        let mut ledger = Ledger::new(0);
        ledger.add_item("a", Money::from_cents(100), 1).unwrap();
        let before = ledger.summary();

        let err = ledger
            .add_item("b", Money::new(Decimal::MAX), 2)
            .unwrap_err();
        assert_eq!(err, CoreError::AmountOverflow { operation: "subtotal" });

        ledger.add_item("c", Money::new(Decimal::MAX), 1).unwrap_err();
        assert_eq!(ledger.summary(), before);
        assert_eq!(ledger.items(), &["a".to_string()]);
    }

    // -------------------------------------------------------------------------
    // apply_discount
    // -------------------------------------------------------------------------

    #[test]
    fn test_apply_discount_compounds() {
        let (mut ledger, log) = logged(10);
        ledger.add_item("TV", Money::from_cents(10000), None).unwrap();

        assert_eq!(
            ledger.apply_discount(),
            DiscountApplication::Applied {
                total: Money::from_cents(9000)
            }
        );
        ledger.apply_discount();
        assert_eq!(ledger.total(), Money::from_cents(8100));

        assert_eq!(
            log.messages(),
            vec![
                "After the discount, the total comes to $90.".to_string(),
                "After the discount, the total comes to $81.".to_string(),
            ]
        );
    }

    #[test]
    fn test_apply_discount_formats_fractional_total() {
        let (mut ledger, log) = logged(20);
        ledger.add_item("macbook air", Money::from_cents(100_000), 1).unwrap();
        ledger.apply_discount();
        assert_eq!(
            log.messages(),
            vec!["After the discount, the total comes to $800.".to_string()]
        );

        let (mut ledger, log) = logged(50);
        ledger.add_item("odd", Money::from_cents(1), 1).unwrap();
        ledger.apply_discount();
        assert_eq!(ledger.total(), Money::new(Decimal::new(5, 3)));
        assert_eq!(
            log.messages(),
            vec!["After the discount, the total comes to $0.".to_string()]
        );

        let (mut ledger, log) = logged(50);
        ledger.add_item("refund", Money::new(Decimal::new(-2, 3)), 1).unwrap();
        ledger.apply_discount();
        assert_eq!(ledger.total(), Money::new(Decimal::new(-1, 3)));
        assert_eq!(
            log.messages(),
            vec!["After the discount, the total comes to $-0.".to_string()]
        );
    }

    #[test]
    fn test_apply_discount_without_discount_is_a_noop() {
        let (mut ledger, log) = logged(0);
        ledger.add_item("apple", Money::from_cents(99), 2).unwrap();

        assert_eq!(ledger.apply_discount(), DiscountApplication::NoDiscount);
        assert_eq!(ledger.total(), Money::from_cents(198));
        assert_eq!(
            log.messages(),
            vec!["There is no discount to apply.".to_string()]
        );
    }

    #[test]
    fn test_apply_discount_leaves_history_alone() {
        let mut ledger = Ledger::new(25);
        ledger.add_item("book", Money::from_cents(2000), 2).unwrap();
        let history = ledger.previous_transactions().to_vec();

        ledger.apply_discount();
        assert_eq!(ledger.previous_transactions(), history.as_slice());
        assert_eq!(ledger.item_count(), 2);
    }

    // -------------------------------------------------------------------------
    // void_last_transaction
    // -------------------------------------------------------------------------

    #[test]
    fn test_void_restores_previous_total_and_items() {
        let mut ledger = Ledger::new(0);
        ledger.add_item("A", Money::from_cents(1000), 2).unwrap();

        let outcome = ledger.void_last_transaction();
        assert!(matches!(outcome, VoidOutcome::Voided(ref r) if r.item == "A"));
        assert!(ledger.total().is_zero());
        assert!(ledger.items().is_empty());
        assert!(ledger.previous_transactions().is_empty());
    }

    #[test]
    fn test_void_walks_back_lifo() {
        let mut ledger = Ledger::new(0);
        ledger.add_item("apple", Money::from_cents(99), 1).unwrap();
        ledger.add_item("tomato", Money::from_cents(176), 3).unwrap();

        ledger.void_last_transaction();
        assert_eq!(ledger.total(), Money::from_cents(99));
        assert_eq!(ledger.items(), &["apple".to_string()]);

        ledger.void_last_transaction();
        assert!(ledger.total().is_zero());
        assert!(ledger.items().is_empty());
    }

    #[test]
    fn test_void_on_empty_history_resets_total() {
        let mut ledger = Ledger::new(50);
        ledger.add_item("lamp", Money::from_cents(1000), 1).unwrap();
        ledger.apply_discount();

        // Undiscounted subtotal is subtracted: 5 - 10.
        ledger.void_last_transaction();
        assert_eq!(ledger.total(), Money::from_cents(-500));

        ledger.items_mut().push("stray".to_string());
        assert_eq!(ledger.void_last_transaction(), VoidOutcome::ResetTotal);
        assert!(ledger.total().is_zero());
        assert_eq!(ledger.items(), &["stray".to_string()]);
    }

    #[test]
    fn test_void_removal_is_bounded_by_items_length() {
        let mut ledger = Ledger::new(0);
        ledger.add_item("Widget", Money::from_cents(100), 3).unwrap();
        ledger.items_mut().truncate(1);

        ledger.void_last_transaction();
        assert!(ledger.items().is_empty());
        assert!(ledger.total().is_zero());
    }

    #[test]
    fn test_void_with_negative_quantity_removes_nothing() {
        let mut ledger = Ledger::new(0);
        ledger.add_item("kept", Money::from_cents(100), 1).unwrap();
        ledger.add_item("return", Money::from_cents(100), -1).unwrap();

        ledger.void_last_transaction();
        assert_eq!(ledger.items(), &["kept".to_string()]);
        assert_eq!(ledger.total(), Money::from_cents(100));
    }

    #[test]
    fn test_void_snaps_negligible_residue_to_zero() {
        let mut ledger = Ledger::new(0);
        ledger.add_item("dust", Money::new(Decimal::new(3, 13)), 1).unwrap();
        ledger.add_item("coffee", Money::from_cents(350), 1).unwrap();

        ledger.void_last_transaction();
        assert_eq!(ledger.total(), Money::zero());
        assert_eq!(ledger.total().amount(), Decimal::ZERO);
    }

    #[test]
    fn test_void_after_tenths_is_exactly_zero() {
        let mut ledger = Ledger::new(0);
        ledger.add_item("a", Money::from_cents(10), 1).unwrap();
        ledger.add_item("b", Money::from_cents(20), 1).unwrap();
        ledger.void_last_transaction();
        ledger.void_last_transaction();
        assert_eq!(ledger.total().amount(), Decimal::ZERO);
    }

    // -------------------------------------------------------------------------
    // Summary
    // -------------------------------------------------------------------------

    #[test]
    fn test_summary_serializes_camel_case() {
        let mut ledger = Ledger::new(15);
        ledger.add_item("Widget", Money::from_cents(250), 3).unwrap();

        let json = serde_json::to_value(ledger.summary()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "discount": 15,
                "total": "7.50",
                "itemCount": 3,
                "transactionCount": 1,
            })
        );
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    proptest! {
        #[test]
        fn prop_total_is_sum_of_subtotals(
            purchases in prop::collection::vec((-100_000i64..100_000, -5i64..20), 0..40)
        ) {
            let mut ledger = Ledger::new(0);
            let mut expected = Money::zero();
            let mut units = 0usize;

            for (cents, qty) in &purchases {
                ledger.add_item("x", Money::from_cents(*cents), *qty).unwrap();
                expected += Money::from_cents(cents * qty);
                units += unit_count(*qty);
            }

            prop_assert_eq!(ledger.total(), expected);
            prop_assert_eq!(ledger.item_count(), units);
        }

        #[test]
        fn prop_voiding_everything_returns_to_empty(
            purchases in prop::collection::vec((0i64..10_000, 0i64..10), 1..20)
        ) {
            let mut ledger = Ledger::new(0);
            for (cents, qty) in &purchases {
                ledger.add_item("x", Money::from_cents(*cents), *qty).unwrap();
            }
            for _ in &purchases {
                let voided = matches!(ledger.void_last_transaction(), VoidOutcome::Voided(_));
                prop_assert!(voided);
            }

            prop_assert!(ledger.total().is_zero());
            prop_assert!(ledger.items().is_empty());
        }
    }
}
