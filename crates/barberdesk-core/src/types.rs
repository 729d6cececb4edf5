//! # Domain Types
//!
//! Snapshot records handed to the engine by the Data Store.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Unit       │   │     Barber      │   │   Transaction   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  unit_id        │◄──│  barber_id      │       │
//! │  │  name           │   │  commission_bps │   │  total_cents    │       │
//! │  └─────────────────┘   │  is_active      │   │  status         │       │
//! │          ▲             └─────────────────┘   │  occurred_at    │       │
//! │          │                                   └─────────────────┘       │
//! │  ┌───────┴─────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Client      │   │ CommissionRate  │   │TransactionStatus│       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  last_visit_at? │   │  bps (i64)      │   │  Pending        │       │
//! │  │  birth_date?    │   │  5000 = 50%     │   │  Completed      │       │
//! │  │  total_visits   │   └─────────────────┘   │  Cancelled      │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Optional Fields
//! Every nullable column is an `Option`. The meaning of `None` is decided by
//! the consumer, never by a falsy coercion:
//! - `Transaction::commission_rate_bps = None` ⇒ fall back to the barber's rate
//! - `Barber::commission_rate_bps = None` ⇒ fall back to the default (50%)
//! - `Client::last_visit_at = None` ⇒ inactive
//! - `Client::birth_date = None` ⇒ never a birthday match

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Commission Rate
// =============================================================================

/// Commission rate in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01%, so 5000 bps = 50% and 3750 bps = 37.5%.
/// Barbers negotiate rates like 37.5%; bps keep those exact in integer math.
///
/// The constructor does not validate: rates come straight from stored
/// records, and `commission::commission_of` is the one place that rejects
/// anything outside 0..=10000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommissionRate(i64);

impl CommissionRate {
    /// Upper bound: 100%.
    pub const MAX_BPS: i64 = 10_000;

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: i64) -> Self {
        CommissionRate(bps)
    }

    /// Creates a rate from a whole percentage (`from_percent(50)` = 50%).
    #[inline]
    pub const fn from_percent(percent: i64) -> Self {
        CommissionRate(percent * 100)
    }

    /// Creates a rate from a fractional percentage, rounded to the nearest bps.
    pub fn from_percentage(pct: f64) -> Self {
        CommissionRate((pct * 100.0).round() as i64)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> i64 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// True when the rate lies in 0%..=100%.
    #[inline]
    pub const fn is_within_bounds(&self) -> bool {
        self.0 >= 0 && self.0 <= Self::MAX_BPS
    }
}

// =============================================================================
// Unit
// =============================================================================

/// A shop location. Every per-unit metric is partitioned by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Unit {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Barber
// =============================================================================

/// A barber working at a unit.
///
/// Deactivated barbers (`is_active = false`) still own their historical
/// transactions and keep showing up in commission reports for past months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Barber {
    pub id: String,
    pub unit_id: String,
    pub name: String,
    /// Negotiated commission rate in bps; `None` means the default applies.
    pub commission_rate_bps: Option<i64>,
    pub is_active: bool,
}

impl Barber {
    /// Returns the negotiated rate, if any.
    #[inline]
    pub fn commission_rate(&self) -> Option<CommissionRate> {
        self.commission_rate_bps.map(CommissionRate::from_bps)
    }
}

// =============================================================================
// Client
// =============================================================================

/// A client of a unit, with visit history maintained by the Data Store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Client {
    pub id: String,
    pub unit_id: String,
    pub name: String,
    pub phone: Option<String>,
    /// Most recent completed visit; `None` if the client never came in.
    #[ts(as = "Option<String>")]
    pub last_visit_at: Option<DateTime<Utc>>,
    /// Only month and day are meaningful; the year is ignored for matching.
    #[ts(as = "Option<String>")]
    pub birth_date: Option<NaiveDate>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    /// Visit counter. Monotonic, incremented externally on each completion.
    pub total_visits: i64,
}

// =============================================================================
// Transaction Status
// =============================================================================

/// Lifecycle status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Scheduled, not yet performed.
    #[default]
    Pending,
    /// Performed and paid. The only status that counts as revenue.
    Completed,
    /// Cancelled before completion.
    Cancelled,
}

impl TransactionStatus {
    /// Returns the storage name of the status.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A service appointment, the unit of revenue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Transaction {
    pub id: String,
    pub barber_id: String,
    pub unit_id: String,
    /// Price charged, in cents.
    pub total_price_cents: i64,
    pub status: TransactionStatus,
    #[ts(as = "String")]
    pub occurred_at: DateTime<Utc>,
    /// Rate frozen on the appointment, if any; overrides the barber's rate.
    pub commission_rate_bps: Option<i64>,
}

impl Transaction {
    /// Returns the total price as Money.
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }

    /// Returns the rate frozen on this transaction, if any.
    #[inline]
    pub fn commission_rate(&self) -> Option<CommissionRate> {
        self.commission_rate_bps.map(CommissionRate::from_bps)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
