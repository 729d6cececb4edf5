//! # Finance Module
//!
//! Reduces transaction collections into revenue, commission and profit
//! totals.
//!
//! ## Aggregation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  [Transaction] ──► RateLookup ──► split_of() ──► FinancialSummary      │
//! │                    (tx rate?        per row       count                 │
//! │                     barber rate?                  total_revenue         │
//! │                     fallback?)                    total_commission      │
//! │                                                   total_profit          │
//! │                                                                         │
//! │  Revenue is summed from the raw prices, separately from the splits.    │
//! │  is_balanced() checks commission + profit == revenue.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Filtering by barber, unit or period is the caller's job: every
//! transaction passed in is counted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::commission::{effective_rate, split_of, CommissionSplit};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Barber, CommissionRate, Transaction};

// =============================================================================
// Rate Lookup
// =============================================================================

/// Resolves the commission rate for a transaction.
///
/// `None` means "nothing negotiated"; the commission calculator then
/// applies the default rate.
pub trait RateLookup {
    fn rate_for(&self, transaction: &Transaction) -> Option<CommissionRate>;
}

impl<F> RateLookup for F
where
    F: Fn(&Transaction) -> Option<CommissionRate>,
{
    fn rate_for(&self, transaction: &Transaction) -> Option<CommissionRate> {
        self(transaction)
    }
}

/// Rate lookup backed by the barber roster.
///
/// ## Precedence
/// 1. Rate frozen on the transaction
/// 2. The barber's negotiated rate
/// 3. The configured fallback, if any
/// 4. `DEFAULT_COMMISSION_RATE` (applied by `commission_of`)
#[derive(Debug, Clone, Default)]
pub struct BarberRates {
    rates: HashMap<String, CommissionRate>,
    fallback: Option<CommissionRate>,
}

impl BarberRates {
    /// Builds the lookup from a barber list. Barbers without a rate are skipped.
    pub fn from_barbers(barbers: &[Barber]) -> Self {
        let rates = barbers
            .iter()
            .filter_map(|b| b.commission_rate().map(|rate| (b.id.clone(), rate)))
            .collect();

        BarberRates {
            rates,
            fallback: None,
        }
    }

    /// Sets the rate used when neither transaction nor barber has one.
    pub fn with_fallback(mut self, fallback: Option<CommissionRate>) -> Self {
        self.fallback = fallback;
        self
    }

    /// The negotiated rate of one barber, if any.
    pub fn barber_rate(&self, barber_id: &str) -> Option<CommissionRate> {
        self.rates.get(barber_id).copied()
    }

    /// The rate shown next to a barber's name: theirs, else the fallback,
    /// else the default.
    pub fn display_rate(&self, barber_id: &str) -> CommissionRate {
        effective_rate(self.barber_rate(barber_id).or(self.fallback))
    }
}

impl RateLookup for BarberRates {
    fn rate_for(&self, transaction: &Transaction) -> Option<CommissionRate> {
        transaction
            .commission_rate()
            .or_else(|| self.barber_rate(&transaction.barber_id))
            .or(self.fallback)
    }
}

// =============================================================================
// Financial Summary
// =============================================================================

/// Totals over a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FinancialSummary {
    pub count: usize,
    pub total_revenue: Money,
    pub total_commission: Money,
    pub total_profit: Money,
}

impl FinancialSummary {
    /// True when commission and profit add up to the revenue exactly.
    #[inline]
    pub fn is_balanced(&self) -> bool {
        self.total_commission.checked_add(self.total_profit) == Some(self.total_revenue)
    }

    /// Adds one transaction. Leaves the summary untouched on overflow.
    fn record(&mut self, total: Money, split: &CommissionSplit) -> CoreResult<()> {
        let revenue = self.total_revenue.checked_add(total);
        let commission = self.total_commission.checked_add(split.commission);
        let profit = self.total_profit.checked_add(split.profit);

        match (revenue, commission, profit) {
            (Some(revenue), Some(commission), Some(profit)) => {
                self.count += 1;
                self.total_revenue = revenue;
                self.total_commission = commission;
                self.total_profit = profit;
                Ok(())
            }
            _ => Err(CoreError::Overflow),
        }
    }
}

/// Summarizes transactions in a single pass.
///
/// ## Errors
/// Fails on the first transaction whose price is negative or whose
/// resolved rate is out of range, and with `Overflow` when a total no
/// longer fits in `Money`.
///
/// ## Example
/// ```rust
/// use barberdesk_core::finance::summarize;
/// use barberdesk_core::types::{CommissionRate, Transaction};
///
/// let empty: Vec<Transaction> = Vec::new();
/// let summary = summarize(&empty, &|_: &Transaction| None::<CommissionRate>).unwrap();
/// assert_eq!(summary.count, 0);
/// assert!(summary.total_revenue.is_zero());
/// ```
pub fn summarize<R>(transactions: &[Transaction], rates: &R) -> CoreResult<FinancialSummary>
where
    R: RateLookup + ?Sized,
{
    let mut summary = FinancialSummary::default();

    for tx in transactions {
        let total = tx.total_price();
        let split = split_of(total, rates.rate_for(tx))?;
        summary.record(total, &split)?;
    }

    debug_assert!(summary.is_balanced(), "unbalanced summary: {summary:?}");
    Ok(summary)
}

// =============================================================================
// Commission Lines
// =============================================================================

/// One row of the commission detail table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommissionLine {
    pub transaction_id: String,
    pub barber_id: String,
    #[ts(as = "String")]
    pub occurred_at: DateTime<Utc>,
    pub total: Money,
    /// Rate actually applied, after fallback.
    pub rate: CommissionRate,
    pub commission: Money,
    pub profit: Money,
}

/// Computes the detail row of every transaction, in input order.
pub fn commission_lines<R>(transactions: &[Transaction], rates: &R) -> CoreResult<Vec<CommissionLine>>
where
    R: RateLookup + ?Sized,
{
    transactions
        .iter()
        .map(|tx| {
            let rate = rates.rate_for(tx);
            let total = tx.total_price();
            let split = split_of(total, rate)?;
            Ok(CommissionLine {
                transaction_id: tx.id.clone(),
                barber_id: tx.barber_id.clone(),
                occurred_at: tx.occurred_at,
                total,
                rate: effective_rate(rate),
                commission: split.commission,
                profit: split.profit,
            })
        })
        .collect()
}

// =============================================================================
// Per-Barber Breakdown
// =============================================================================

/// Summary of one barber's transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BarberSummary {
    pub barber_id: String,
    pub summary: FinancialSummary,
}

/// Summarizes per barber, in the order barbers first appear.
pub fn summarize_by_barber<R>(transactions: &[Transaction], rates: &R) -> CoreResult<Vec<BarberSummary>>
where
    R: RateLookup + ?Sized,
{
    let mut rows: Vec<BarberSummary> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for tx in transactions {
        let total = tx.total_price();
        let split = split_of(total, rates.rate_for(tx))?;

        let slot = *index.entry(tx.barber_id.as_str()).or_insert_with(|| {
            rows.push(BarberSummary {
                barber_id: tx.barber_id.clone(),
                summary: FinancialSummary::default(),
            });
            rows.len() - 1
        });
        rows[slot].summary.record(total, &split)?;
    }

    Ok(rows)
}

// =============================================================================
// Unit Tests
// =============================================================================
