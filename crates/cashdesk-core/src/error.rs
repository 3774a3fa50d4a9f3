//! # Error Types
//!
//! Domain-specific error types for cashdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cashdesk-core errors (this file)                                      │
//! │  ├── CoreError        - Ledger operation failures                      │
//! │  └── ValidationError  - Input coercion failures                        │
//! │                                                                         │
//! │  cashdesk-session errors (separate crate)                              │
//! │  └── SessionError     - Config loading, wrapped core errors            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SessionError → Caller             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Note on discounts
//! A rejected discount is NOT an error for the caller. The ledger degrades
//! to a zero discount and reports the `ValidationError` inside a
//! [`DiscountOutcome`](crate::DiscountOutcome) instead of returning `Err`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Ledger operation errors.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// An amount no longer fits the fixed-point representation.
    ///
    /// ## When This Occurs
    /// - `price × quantity` exceeds ~7.9e28
    /// - Adding a subtotal to the running total overflows
    ///
    /// The ledger is left untouched when this is returned.
    #[error("Amount overflow while computing {operation}")]
    AmountOverflow { operation: &'static str },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when loosely-typed input (text from a form, a config file,
/// an environment variable) cannot be coerced into a ledger value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required value is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// The value is not a number at all.
    #[error("{field} is not numeric: {value:?}")]
    NotNumeric { field: String, value: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. a fractional quantity).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
