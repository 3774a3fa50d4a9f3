//! # cashdesk-core: Pure Ledger Logic for Cashdesk
//!
//! This crate is the **heart** of Cashdesk. It contains the register ledger
//! and everything it needs, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cashdesk Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Caller (UI, CLI, scripted demo, tests)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        cashdesk-session (config, tracing, RegisterState)        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cashdesk-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  ledger   │  │   money   │  │ discount  │  │  notice   │  │   │
//! │  │   │  Ledger   │  │   Money   │  │ Discount  │  │  Notice   │  │   │
//! │  │   │  Record   │  │  display  │  │  Input    │  │  Sink     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • NO LOGGING • PURE STATE TRANSITIONS      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`ledger`] - The ledger and its transaction records
//! - [`money`] - Fixed-point money type and its display rule
//! - [`discount`] - Discount percentage and the inputs it is coerced from
//! - [`validation`] - Coercion of loosely-typed input (discount, price, quantity)
//! - [`notice`] - Human-readable diagnostics and the sink capability
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use cashdesk_core::{Ledger, Money};
//!
//! let mut ledger = Ledger::new(10);
//! ledger.add_item("Widget", Money::from_major_minor(2, 50), 3).unwrap();
//! assert_eq!(ledger.total(), Money::from_cents(750));
//!
//! ledger.apply_discount();
//! assert_eq!(ledger.total().to_compact_string(), "6.75");
//!
//! ledger.void_last_transaction();
//! assert!(ledger.items().is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod discount;
pub mod error;
pub mod ledger;
pub mod money;
pub mod notice;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use discount::{Discount, DiscountInput, DiscountOutcome};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{DiscountApplication, Ledger, LedgerSummary, TransactionRecord, VoidOutcome};
pub use money::Money;
pub use notice::{Notice, NoticeLog, NoticeSink, SilentSink};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest accepted discount, in percent.
pub const MAX_DISCOUNT_PERCENT: i64 = 100;

/// Quantity recorded when a caller omits it.
pub const DEFAULT_QUANTITY: i64 = 1;

/// Totals whose magnitude falls below this many units after a void are
/// snapped to exactly zero (1e-12, as mantissa and scale).
///
/// ## Why keep it with decimal money?
/// Decimal arithmetic does not drift the way binary floats do, but totals
/// that went through compounding discounts carry long fractional tails.
/// The clamp keeps void results identical to what callers of the
/// original register observed.
pub const ZERO_TOLERANCE: (i64, u32) = (1, 12);
