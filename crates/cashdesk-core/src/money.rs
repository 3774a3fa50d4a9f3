//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Fixed-Point Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 - 0.2 - 0.1 = 2.7e-17  ❌ NOT ZERO!                        │
//! │                                                                         │
//! │  Why not integer cents here?                                            │
//! │    Discounts compound on the running total:                             │
//! │    $0.10 × 90% × 90% = $0.081 → cents would round at every step        │
//! │                                                                         │
//! │  OUR SOLUTION: 96-bit decimal (rust_decimal)                            │
//! │    0.1 + 0.2 - 0.2 - 0.1 = 0 exactly                                    │
//! │    28 significant digits carry compounding discounts unrounded          │
//! │    Rounding only happens when a total is DISPLAYED                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cashdesk_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let line = price.checked_multiply_quantity(3).unwrap();
//! assert_eq!(line, Money::from_cents(3297));
//! assert_eq!(line.to_string(), "$32.97");
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Sub};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::discount::Discount;
use crate::error::ValidationError;
use crate::ZERO_TOLERANCE;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in major units (dollars), stored as a fixed-point decimal.
///
/// ## Design Decisions
/// - **Decimal (signed)**: negative values are legal; the ledger does not
///   police prices or quantities
/// - **Single field tuple struct**: zero-cost wrapper over `Decimal`
/// - **Serde**: serialized as a decimal string (`"7.50"`) so no consumer
///   ever parses it back into a float by accident
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  add_item(price) ──► TransactionRecord.price ──► record.subtotal        │
/// │                                                       │                 │
/// │                                                       ▼                 │
/// │                       Ledger.total ◄── += subtotal / -= on void         │
/// │                            │                                            │
/// │                            ▼                                            │
/// │                apply_discount() ──► "the total comes to $90."           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps a decimal amount expressed in major units.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use cashdesk_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.to_compact_string(), "10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    ///
    /// ```rust
    /// use cashdesk_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(2, 50), Money::from_cents(250));
    /// assert_eq!(Money::from_major_minor(-5, 50), Money::from_cents(-550));
    /// ```
    #[inline]
    pub fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money::from_cents(major * 100 - minor)
        } else {
            Money::from_cents(major * 100 + minor)
        }
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Checked addition. `None` on overflow.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Checked subtraction. `None` on overflow.
    #[inline]
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Item: Widget $2.50
    /// Quantity: 3
    ///      │
    ///      ▼
    /// checked_multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Subtotal: $7.50 (frozen into the transaction record)
    /// ```
    #[inline]
    pub fn checked_multiply_quantity(self, qty: i64) -> Option<Money> {
        self.0.checked_mul(Decimal::from(qty)).map(Money)
    }

    /// Takes `discount` percent off this amount.
    ///
    /// The factor `(100 - pct) / 100` is exact in decimal and never above 1,
    /// so the multiplication cannot overflow.
    ///
    /// ```rust
    /// use cashdesk_core::{Discount, Money};
    ///
    /// let ten_off = Discount::new(10).unwrap();
    /// let once = Money::from_cents(10000).apply_percentage_discount(ten_off);
    /// let twice = once.apply_percentage_discount(ten_off);
    /// assert_eq!(once.to_compact_string(), "90");
    /// assert_eq!(twice.to_compact_string(), "81");
    /// ```
    pub fn apply_percentage_discount(&self, discount: Discount) -> Money {
        let factor = Decimal::new(100 - i64::from(discount.percent()), 2);
        Money(self.0 * factor)
    }

    /// Returns exactly zero when the magnitude is below 1e-12, else `self`.
    pub fn clamp_negligible(self) -> Money {
        let (mantissa, scale) = ZERO_TOLERANCE;
        if self.abs().0 < Decimal::new(mantissa, scale) {
            Money::zero()
        } else {
            self
        }
    }

    /// Formats the amount the way the register announces totals.
    ///
    /// ## Rules
    /// - Whole amounts print without decimals: `90`
    /// - Anything else is rounded to two places (banker's rounding), then
    ///   trailing zeros and a dangling point are stripped: `33.33`, `6.5`
    /// - A negative fraction that rounds away keeps its sign: `-0`
    pub fn to_compact_string(&self) -> String {
        if self.0.fract().is_zero() {
            return self.0.trunc().normalize().to_string();
        }

        let shown = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
            .normalize();
        if shown.is_zero() && self.is_negative() {
            return "-0".to_string();
        }
        shown.to_string()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// `$` followed by the compact form; a negative total reads `$-5.5`,
/// matching the announcement text of the register.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.to_compact_string())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Converts a float price, rejecting NaN and infinities.
impl TryFrom<f64> for Money {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Decimal::try_from(value)
            .map(Money)
            .map_err(|_| ValidationError::NotNumeric {
                field: "price".to_string(),
                value: value.to_string(),
            })
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
