//! # Commission Module
//!
//! Splits one transaction's price between the barber (commission) and the
//! shop (profit).
//!
//! ## The Split
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  total = 45.00, rate = 40%                                              │
//! │                                                                         │
//! │  commission = round_half_up(4500 × 4000 / 10000) = 1800  (18.00)       │
//! │  profit     = 4500 − 1800                        = 2700  (27.00)       │
//! │                                                                         │
//! │  Rounding happens ONCE, on the commission. Profit is the remainder,    │
//! │  so commission + profit == total to the cent, always.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rate Fallback
//! `None` means "no negotiated rate" and resolves to `DEFAULT_COMMISSION_RATE`.
//! A present rate of 0% is a real rate and yields a zero commission.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::CommissionRate;

/// Rate applied when neither the transaction nor the barber carries one.
pub const DEFAULT_COMMISSION_RATE: CommissionRate = CommissionRate::from_percent(50);

/// Commission and profit for one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommissionSplit {
    /// Barber's share.
    pub commission: Money,
    /// Shop's share: total minus commission.
    pub profit: Money,
}

impl CommissionSplit {
    /// The total the split was computed from.
    #[inline]
    pub fn total(&self) -> Money {
        self.commission + self.profit
    }
}

/// Returns the rate that applies, falling back to the default.
#[inline]
pub fn effective_rate(rate: Option<CommissionRate>) -> CommissionRate {
    rate.unwrap_or(DEFAULT_COMMISSION_RATE)
}

/// Computes the barber's commission on `total`.
///
/// ## Errors
/// - `InvalidAmount` if `total` is negative
/// - `InvalidRate` if `rate` is present and outside 0..=10000 bps
///
/// ## Example
/// ```rust
/// use barberdesk_core::commission::commission_of;
/// use barberdesk_core::money::Money;
/// use barberdesk_core::types::CommissionRate;
///
/// let total = Money::from_cents(20000);
/// assert_eq!(commission_of(total, None).unwrap().cents(), 10000);
/// assert_eq!(
///     commission_of(total, Some(CommissionRate::from_percent(30))).unwrap().cents(),
///     6000
/// );
/// ```
pub fn commission_of(total: Money, rate: Option<CommissionRate>) -> CoreResult<Money> {
    if total.is_negative() {
        return Err(CoreError::InvalidAmount {
            cents: total.cents(),
        });
    }

    let rate = effective_rate(rate);
    if !rate.is_within_bounds() {
        return Err(CoreError::InvalidRate { bps: rate.bps() });
    }

    Ok(total.apply_rate(rate))
}

/// Computes commission and profit for `total`.
///
/// Same errors as [`commission_of`].
pub fn split_of(total: Money, rate: Option<CommissionRate>) -> CoreResult<CommissionSplit> {
    let commission = commission_of(total, rate)?;
    Ok(CommissionSplit {
        commission,
        profit: total - commission,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_rate_is_half() {
        assert_eq!(DEFAULT_COMMISSION_RATE.bps(), 5000);
        assert_eq!(
            commission_of(Money::from_cents(20000), None).unwrap(),
            Money::from_cents(10000)
        );
    }

    #[test]
    fn test_zero_and_full_rate() {
        let total = Money::from_cents(15000);
        assert!(commission_of(total, Some(CommissionRate::from_percent(0)))
            .unwrap()
            .is_zero());
        assert_eq!(
            commission_of(total, Some(CommissionRate::from_percent(100))).unwrap(),
            total
        );
    }

    #[test]
    fn test_zero_total() {
        let split = split_of(Money::zero(), Some(CommissionRate::from_percent(40))).unwrap();
        assert!(split.commission.is_zero());
        assert!(split.profit.is_zero());
    }

    #[test]
    fn test_split_of() {
        let split = split_of(Money::from_cents(4500), Some(CommissionRate::from_percent(40))).unwrap();
        assert_eq!(split.commission.cents(), 1800);
        assert_eq!(split.profit.cents(), 2700);
        assert_eq!(split.total().cents(), 4500);
    }

    #[test]
    fn test_split_rounding_goes_to_commission() {
        // 0.05 × 50% = 0.025 → commission 0.03, profit 0.02
        let split = split_of(Money::from_cents(5), None).unwrap();
        assert_eq!(split.commission.cents(), 3);
        assert_eq!(split.profit.cents(), 2);
    }

    #[test]
    fn test_rejects_out_of_range_rate() {
        let total = Money::from_cents(1000);
        assert_eq!(
            commission_of(total, Some(CommissionRate::from_percent(120))),
            Err(CoreError::InvalidRate { bps: 12000 })
        );
        assert_eq!(
            split_of(total, Some(CommissionRate::from_bps(-1))),
            Err(CoreError::InvalidRate { bps: -1 })
        );
    }

    #[test]
    fn test_rejects_negative_total() {
        assert_eq!(
            commission_of(Money::from_cents(-100), None),
            Err(CoreError::InvalidAmount { cents: -100 })
        );
    }

    proptest! {
        #[test]
        fn test_split_always_sums_to_total(
            cents in 0i64..1_000_000_000_000,
            bps in 0i64..=10_000,
        ) {
            let total = Money::from_cents(cents);
            let split = split_of(total, Some(CommissionRate::from_bps(bps))).unwrap();
            prop_assert_eq!(split.commission + split.profit, total);
            prop_assert!(!split.commission.is_negative());
            prop_assert!(!split.profit.is_negative());
        }

        #[test]
        fn test_commission_is_monotonic_in_rate(
            cents in 0i64..100_000_000,
            low in 0i64..=10_000,
            high in 0i64..=10_000,
        ) {
            let (low, high) = if low <= high { (low, high) } else { (high, low) };
            let total = Money::from_cents(cents);
            let a = commission_of(total, Some(CommissionRate::from_bps(low))).unwrap();
            let b = commission_of(total, Some(CommissionRate::from_bps(high))).unwrap();
            prop_assert!(a <= b);
        }
    }
}
