//! # Notices
//!
//! Human-readable diagnostics the ledger announces while it works.
//!
//! Notices are advisory. Callers that need machine-readable status use the
//! outcome values returned by each ledger operation; notices exist for the
//! person standing at the register.
//!
//! ## Delivery
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Ledger ──publish(&Notice)──► dyn NoticeSink                            │
//! │                                   │                                     │
//! │        ┌──────────────────────────┼──────────────────────────┐          │
//! │        ▼                          ▼                          ▼          │
//! │   SilentSink                 NoticeLog               ConsoleSink /      │
//! │   (default)                  (records)               TracingSink        │
//! │   this crate                 this crate              cashdesk-session   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::sync::{Mutex, PoisonError};

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Notice
// =============================================================================

/// A diagnostic raised by a ledger operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A discount assignment was refused and reset to zero.
    InvalidDiscount { reason: ValidationError },
    /// `apply_discount` was called while the discount is zero.
    NoDiscountToApply,
    /// A discount was applied; carries the new total.
    DiscountApplied { total: Money },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::InvalidDiscount { .. } => write!(f, "Not valid discount"),
            Notice::NoDiscountToApply => write!(f, "There is no discount to apply."),
            Notice::DiscountApplied { total } => {
                write!(f, "After the discount, the total comes to {total}.")
            }
        }
    }
}

// =============================================================================
// Sinks
// =============================================================================

/// Where a ledger sends its notices.
///
/// Implementations must not call back into the ledger.
pub trait NoticeSink: Send + Sync {
    fn publish(&self, notice: &Notice);
}

/// Drops every notice. The default sink of a ledger.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl NoticeSink for SilentSink {
    fn publish(&self, _notice: &Notice) {}
}

/// Keeps every notice in memory, in publication order.
#[derive(Debug, Default)]
pub struct NoticeLog {
    entries: Mutex<Vec<Notice>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded notices.
    pub fn notices(&self) -> Vec<Notice> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the rendered text of the recorded notices.
    pub fn messages(&self) -> Vec<String> {
        self.notices().iter().map(ToString::to_string).collect()
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl NoticeSink for NoticeLog {
    fn publish(&self, notice: &Notice) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
