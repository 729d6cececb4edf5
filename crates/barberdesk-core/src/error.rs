//! # Error Types
//!
//! Domain-specific error types for barberdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  barberdesk-core errors (this file)                                    │
//! │  ├── CoreError        - Precondition failures of the engine            │
//! │  └── ValidationError  - Record validation failures                     │
//! │                                                                         │
//! │  barberdesk-db errors (separate crate)                                 │
//! │  └── DbError          - Data Store failures                            │
//! │                                                                         │
//! │  apps/reports errors                                                   │
//! │  └── ReportError      - What the CLI reports                           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ReportError → stderr              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is a synchronous, local failure. Retrying a pure function
//! with the same input cannot succeed, so none of these are retried.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Reporting engine errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A commission rate outside 0%..=100%.
    ///
    /// ## When This Occurs
    /// - Barber record edited with a rate above 100
    /// - Negative rate imported from a spreadsheet
    ///
    /// Out-of-range rates are rejected, never clamped: clamping would
    /// silently change a payout.
    #[error("Invalid commission rate: {bps} bps (must be between 0 and 10000)")]
    InvalidRate { bps: i64 },

    /// A negative money amount where revenue is expected.
    #[error("Invalid amount: {cents} cents (must not be negative)")]
    InvalidAmount { cents: i64 },

    /// Unknown named period tag.
    #[error("Invalid period '{0}': expected one of today, week, month")]
    InvalidPeriod(String),

    /// Month index outside 0..=11.
    #[error("Invalid month index {month_index}: must be between 0 and 11")]
    InvalidMonth { month_index: u32 },

    /// Year outside the supported calendar.
    #[error("Invalid year {year}: outside the supported calendar range")]
    InvalidYear { year: i32 },

    /// A running total no longer fits in `Money`.
    #[error("Amount overflow: totals exceed the representable range")]
    Overflow,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Record validation errors.
///
/// Raised when a record handed over by the Data Store breaks an entity
/// invariant (negative price, empty id, ...).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
