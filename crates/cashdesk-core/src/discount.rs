//! # Discount Module
//!
//! The percentage discount a ledger applies to its running total, and the
//! loosely-typed inputs it can be configured from.
//!
//! ## Configuration Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Caller value (42, 12.9, " 15 ", "ten", None)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DiscountInput ──► validation::validate_discount()                      │
//! │                          │                                              │
//! │          ┌───────────────┴───────────────┐                              │
//! │          ▼                               ▼                              │
//! │  Ok(Discount)                   Err(ValidationError)                    │
//! │          │                               │                              │
//! │          ▼                               ▼                              │
//! │  DiscountOutcome::Accepted     DiscountOutcome::Rejected                │
//! │                                 (discount := 0, "Not valid discount")   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::validate_discount;
use crate::MAX_DISCOUNT_PERCENT;

// =============================================================================
// Discount
// =============================================================================

/// A whole-number percentage in `[0, 100]`.
///
/// The only way to build one is through [`Discount::new`] or the
/// validator, so a `Discount` in hand is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Discount(u8);

impl Discount {
    /// No discount.
    pub const NONE: Discount = Discount(0);

    /// Creates a discount from a percentage, rejecting values outside `[0, 100]`.
    pub fn new(percent: i64) -> Result<Self, ValidationError> {
        if (0..=MAX_DISCOUNT_PERCENT).contains(&percent) {
            Ok(Discount(percent as u8))
        } else {
            Err(ValidationError::OutOfRange {
                field: "discount".to_string(),
                min: 0,
                max: MAX_DISCOUNT_PERCENT,
            })
        }
    }

    /// Returns the percentage.
    #[inline]
    pub const fn percent(&self) -> u8 {
        self.0
    }

    /// Checks whether applying this discount would change anything.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<i64> for Discount {
    type Error = ValidationError;

    fn try_from(percent: i64) -> Result<Self, Self::Error> {
        Discount::new(percent)
    }
}

impl From<Discount> for i64 {
    fn from(discount: Discount) -> Self {
        i64::from(discount.0)
    }
}

// =============================================================================
// Discount Input
// =============================================================================

/// Anything a caller may hand over as "the discount".
///
/// Mirrors integer coercion: integers pass through, floats truncate toward
/// zero, text is trimmed and parsed, a missing value is not numeric.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscountInput {
    Integer(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl From<i64> for DiscountInput {
    fn from(value: i64) -> Self {
        DiscountInput::Integer(value)
    }
}

impl From<i32> for DiscountInput {
    fn from(value: i32) -> Self {
        DiscountInput::Integer(i64::from(value))
    }
}

impl From<u8> for DiscountInput {
    fn from(value: u8) -> Self {
        DiscountInput::Integer(i64::from(value))
    }
}

impl From<u32> for DiscountInput {
    fn from(value: u32) -> Self {
        DiscountInput::Integer(i64::from(value))
    }
}

impl From<f64> for DiscountInput {
    fn from(value: f64) -> Self {
        DiscountInput::Float(value)
    }
}

impl From<&str> for DiscountInput {
    fn from(value: &str) -> Self {
        DiscountInput::Text(value.to_string())
    }
}

impl From<String> for DiscountInput {
    fn from(value: String) -> Self {
        DiscountInput::Text(value)
    }
}

impl From<Discount> for DiscountInput {
    fn from(value: Discount) -> Self {
        DiscountInput::Integer(i64::from(value))
    }
}

impl<T: Into<DiscountInput>> From<Option<T>> for DiscountInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(DiscountInput::Missing, Into::into)
    }
}

// =============================================================================
// Discount Outcome
// =============================================================================

/// What happened to a discount assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscountOutcome {
    /// The value was stored as given.
    Accepted(Discount),
    /// The value was refused and the discount reset to zero.
    Rejected { reason: ValidationError },
}

impl DiscountOutcome {
    /// Runs the validator and folds a failure into a rejection.
    pub fn resolve(input: impl Into<DiscountInput>) -> Self {
        match validate_discount(input.into()) {
            Ok(discount) => DiscountOutcome::Accepted(discount),
            Err(reason) => DiscountOutcome::Rejected { reason },
        }
    }

    /// The discount that ends up stored: the accepted value, or zero.
    pub fn discount(&self) -> Discount {
        match self {
            DiscountOutcome::Accepted(discount) => *discount,
            DiscountOutcome::Rejected { .. } => Discount::NONE,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, DiscountOutcome::Rejected { .. })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_bounds() {
        assert_eq!(Discount::new(0).unwrap().percent(), 0);
        assert_eq!(Discount::new(100).unwrap().percent(), 100);
        assert!(Discount::new(-1).is_err());
        assert!(Discount::new(101).is_err());
    }

    #[test]
    fn test_input_conversions() {
        assert_eq!(DiscountInput::from(20), DiscountInput::Integer(20));
        assert_eq!(DiscountInput::from(12.5), DiscountInput::Float(12.5));
        assert_eq!(DiscountInput::from("15"), DiscountInput::Text("15".to_string()));
        assert_eq!(DiscountInput::from(None::<i64>), DiscountInput::Missing);
        assert_eq!(DiscountInput::from(Some(5)), DiscountInput::Integer(5));
    }

    #[test]
    fn test_outcome_folds_rejection_to_zero() {
        let outcome = DiscountOutcome::resolve(150);
        assert!(outcome.is_rejected());
        assert_eq!(outcome.discount(), Discount::NONE);

        let outcome = DiscountOutcome::resolve("25");
        assert_eq!(outcome, DiscountOutcome::Accepted(Discount::new(25).unwrap()));
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        let discount: Discount = serde_json::from_str("40").unwrap();
        assert_eq!(discount.percent(), 40);
        assert!(serde_json::from_str::<Discount>("140").is_err());
        assert_eq!(serde_json::to_string(&discount).unwrap(), "40");
    }
}
