//! # Money Module
//!
//! Provides the `Money` type used for every revenue, commission and profit
//! amount in a report.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM IN PAYOUT REPORTS                           │
//! │                                                                         │
//! │  Summing 1,000 haircuts at 35.10 each with f64:                         │
//! │    35099.99999999996  ❌ (report shows R$ 35.100,00, payout file        │
//! │                          says 35099.99)                                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    3510 cents × 1,000 = 3,510,000 cents, exactly                        │
//! │    Rounding happens once per commission, in one documented place       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use barberdesk_core::money::Money;
//!
//! let haircut = Money::from_cents(4500); // 45.00
//! let beard = Money::from_major_minor(25, 0);
//!
//! assert_eq!((haircut + beard).cents(), 7000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::types::CommissionRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: the type itself allows negatives so that
///   `commission_of` can detect and reject them (`InvalidAmount`)
/// - **Single field tuple struct**: zero-cost over i64
/// - **Serialized as a bare integer**: the presentation layer formats it
///
/// ## Where Money Flows
/// ```text
/// Transaction.total_price_cents ──► split_of() ──┬──► CommissionSplit.commission
///                                                └──► CommissionSplit.profit
///
/// Σ splits ──► FinancialSummary { total_revenue, total_commission, total_profit }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use barberdesk_core::money::Money;
    ///
    /// let price = Money::from_cents(4599);
    /// assert_eq!(price.cents(), 4599);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Adds two values, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Applies a percentage rate and rounds half-up to the cent.
    ///
    /// ## Implementation
    /// Integer math on basis points: `(cents * bps + 5000) / 10000`.
    /// The +5000 is the half-cent. Callers pass non-negative amounts
    /// (see `commission::commission_of`), so half-up is unambiguous.
    ///
    /// ## Example
    /// ```rust
    /// use barberdesk_core::money::Money;
    /// use barberdesk_core::types::CommissionRate;
    ///
    /// let total = Money::from_cents(3333);
    /// let rate = CommissionRate::from_percent(40);
    ///
    /// // 33.33 × 40% = 13.332 → 13.33
    /// assert_eq!(total.apply_rate(rate).cents(), 1333);
    /// ```
    pub fn apply_rate(&self, rate: CommissionRate) -> Money {
        // i128 so that large totals times 10000 bps cannot overflow
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-oriented rendering; currency formatting belongs to the presentation layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
