//! # Validation Module
//!
//! Coercion of loosely-typed input into ledger values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Coercion Policies                                  │
//! │                                                                         │
//! │  discount  ──► validate_discount()  ──► Err is ABSORBED by the ledger  │
//! │                                          (discount := 0 + notice)       │
//! │                                                                         │
//! │  price     ──► parse_price()        ──► Err is RETURNED to the caller  │
//! │  quantity  ──► parse_quantity()     ──► Err is RETURNED to the caller  │
//! │                                                                         │
//! │  The ledger itself only ever sees typed Money / i64 values.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cashdesk_core::validation::{parse_price, parse_quantity};
//! use cashdesk_core::Money;
//!
//! assert_eq!(parse_price(" 2.50 ").unwrap(), Money::from_cents(250));
//! assert_eq!(parse_quantity("").unwrap(), None);
//! assert_eq!(parse_quantity("3").unwrap(), Some(3));
//! ```

use std::num::IntErrorKind;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::discount::{Discount, DiscountInput};
use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_DISCOUNT_PERCENT;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Discount
// =============================================================================

/// Coerces a discount input and checks it lies in `[0, 100]`.
///
/// ## Rules
/// - Integers are taken as-is
/// - Floats truncate toward zero (`12.9` → 12, `-0.5` → 0); NaN is not
///   numeric, infinities are out of range
/// - Text is trimmed and parsed as a signed integer, with `_` allowed
///   between digits (`1_0` → 10); digit strings too large for `i64` are
///   out of range, anything else is not numeric
/// - A missing value is not numeric
///
/// ## Example
/// ```rust
/// use cashdesk_core::validation::validate_discount;
/// use cashdesk_core::DiscountInput;
///
/// assert_eq!(validate_discount(DiscountInput::from(" 15 ")).unwrap().percent(), 15);
/// assert!(validate_discount(DiscountInput::from("ten")).is_err());
/// assert!(validate_discount(DiscountInput::from(101)).is_err());
/// ```
pub fn validate_discount(input: DiscountInput) -> ValidationResult<Discount> {
    let percent = match input {
        DiscountInput::Integer(value) => value,
        DiscountInput::Float(value) => coerce_float(value)?,
        DiscountInput::Text(text) => coerce_text(&text)?,
        DiscountInput::Missing => {
            return Err(ValidationError::NotNumeric {
                field: "discount".to_string(),
                value: "None".to_string(),
            })
        }
    };

    Discount::new(percent)
}

fn coerce_float(value: f64) -> ValidationResult<i64> {
    if value.is_nan() {
        return Err(ValidationError::NotNumeric {
            field: "discount".to_string(),
            value: value.to_string(),
        });
    }

    let truncated = value.trunc();
    // Anything past the i64 range (infinities included) is certainly > 100.
    if truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
        return Err(discount_out_of_range());
    }

    Ok(truncated as i64)
}

fn coerce_text(text: &str) -> ValidationResult<i64> {
    let not_numeric = || ValidationError::NotNumeric {
        field: "discount".to_string(),
        value: text.to_string(),
    };

    let digits = strip_digit_separators(text.trim()).ok_or_else(not_numeric)?;
    digits.parse::<i64>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => discount_out_of_range(),
        _ => not_numeric(),
    })
}

/// Drops `_` digit-group separators (`1_000`). Each one must sit between
/// two ASCII digits; any other underscore makes the text invalid.
fn strip_digit_separators(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());

    for (i, ch) in text.char_indices() {
        if ch != '_' {
            out.push(ch);
            continue;
        }
        let before = i.checked_sub(1).map(|j| bytes[j]);
        let after = bytes.get(i + 1).copied();
        match (before, after) {
            (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => {}
            _ => return None,
        }
    }

    Some(out)
}

fn discount_out_of_range() -> ValidationError {
    ValidationError::OutOfRange {
        field: "discount".to_string(),
        min: 0,
        max: MAX_DISCOUNT_PERCENT,
    }
}

// =============================================================================
// Price & Quantity
// =============================================================================

/// Parses a price typed by a person or read from a file.
///
/// Accepts plain decimals (`"2.50"`, `"-1"`) and scientific notation
/// (`"1e3"`). Surrounding whitespace is ignored.
pub fn parse_price(text: &str) -> ValidationResult<Money> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: "price".to_string(),
        });
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map(Money::new)
        .map_err(|_| ValidationError::NotNumeric {
            field: "price".to_string(),
            value: text.to_string(),
        })
}

/// Parses an optional quantity.
///
/// ## Rules
/// - Blank text means "not given" (`Ok(None)`), which the ledger records as 1
/// - Otherwise the text must be a whole number; zero and negatives are
///   accepted, the ledger does not police them
/// - Fractions are an invalid format rather than silently truncated
pub fn parse_quantity(text: &str) -> ValidationResult<Option<i64>> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.parse::<i64>() {
        Ok(qty) => Ok(Some(qty)),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                Err(ValidationError::OutOfRange {
                    field: "quantity".to_string(),
                    min: i64::MIN,
                    max: i64::MAX,
                })
            }
            _ if Decimal::from_str(trimmed).is_ok() => Err(ValidationError::InvalidFormat {
                field: "quantity".to_string(),
                reason: "must be a whole number".to_string(),
            }),
            _ => Err(ValidationError::NotNumeric {
                field: "quantity".to_string(),
                value: text.to_string(),
            }),
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
