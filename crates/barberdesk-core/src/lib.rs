//! # barberdesk-core: Pure Reporting Logic for Barberdesk
//!
//! This crate turns snapshots of appointments and clients into the numbers
//! the shop owner looks at: revenue per period, commission and profit per
//! barber, client activity per unit. Every function is pure and synchronous.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Barberdesk Reporting                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/reports (ReportService + CLI)               │   │
//! │  │    cash-flow ──► commissions ──► clients                        │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │ 1. fetch snapshots           │ 2. compute             │
//! │  ┌──────────────▼──────────────┐  ┌────────────▼────────────────────┐  │
//! │  │  barberdesk-db (DataStore)  │  │ ★ barberdesk-core (THIS CRATE) ★│  │
//! │  │  SQLite, migrations,        │  │                                 │  │
//! │  │  repositories               │  │  period  commission  finance    │  │
//! │  └─────────────────────────────┘  │  clients  money  validation     │  │
//! │                                   │                                 │  │
//! │                                   │  NO I/O • NO CLOCK • NO STATE   │  │
//! │                                   └─────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`period`] - Named and monthly date ranges (half-open)
//! - [`commission`] - Commission/profit split for one transaction
//! - [`finance`] - Revenue, commission and profit totals
//! - [`clients`] - Client activity, birthday and new-client counts
//! - [`money`] - Integer cents
//! - [`types`] - Unit, Barber, Client, Transaction
//! - [`validation`] - Record invariants
//! - [`error`] - Error types
//!
//! ## Design Principles
//!
//! 1. **Injected Time**: `now` is always an argument; nothing here reads a clock
//! 2. **Integer Money**: cents and basis points, rounding in exactly one place
//! 3. **Explicit Absence**: nullable fields are `Option`, never coerced
//! 4. **Explicit Errors**: bad rates and amounts are typed errors, never clamped
//!
//! ## Example Usage
//!
//! ```rust
//! use barberdesk_core::{resolve_month, split_of, CommissionRate, Money};
//! use chrono::Utc;
//!
//! let march = resolve_month(2024, 2, &Utc).unwrap();
//! assert!(march.start < march.end);
//!
//! let split = split_of(Money::from_cents(4500), Some(CommissionRate::from_percent(40))).unwrap();
//! assert_eq!(split.commission.cents(), 1800);
//! assert_eq!(split.profit.cents(), 2700);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clients;
pub mod commission;
pub mod error;
pub mod finance;
pub mod money;
pub mod period;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use clients::{classify, unit_metrics, ClientMetrics, UnitMetrics, ACTIVE_WINDOW_DAYS};
pub use commission::{commission_of, split_of, CommissionSplit, DEFAULT_COMMISSION_RATE};
pub use error::{CoreError, CoreResult, ValidationError};
pub use finance::{
    commission_lines, summarize, summarize_by_barber, BarberRates, BarberSummary, CommissionLine,
    FinancialSummary, RateLookup,
};
pub use money::Money;
pub use period::{resolve, resolve_month, resolve_named, start_of_month, DateRange, PeriodTag};
pub use types::*;
