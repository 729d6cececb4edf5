//! # Validation Module
//!
//! Invariant checks for the records the Data Store writes and hands back.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Scheduling UI (external)                                     │
//! │  └── Form checks, immediate feedback                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Repository insert (barberdesk-db)                            │
//! │  └── THIS MODULE: entity invariants from the data model                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SQLite CHECK / NOT NULL / FK constraints                     │
//! │                                                                         │
//! │  The engine itself re-checks only what affects money:                  │
//! │  commission_of() rejects bad rates and negative totals.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{Barber, Client, CommissionRate, Transaction, Unit};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of display names (units, barbers, clients).
pub const MAX_NAME_LEN: usize = 120;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates that an identifier is present.
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a display name.
///
/// ## Rules
/// - Must not be empty
/// - At most `MAX_NAME_LEN` characters
///
/// ## Example
/// ```rust
/// use barberdesk_core::validation::validate_name;
///
/// assert!(validate_name("name", "Unidade Centro").is_ok());
/// assert!(validate_name("name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a price in cents. Zero is allowed (courtesy services).
///
/// ```rust
/// use barberdesk_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(4500).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "total_price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates an optional commission rate in basis points (0..=10000).
pub fn validate_commission_rate_bps(bps: Option<i64>) -> ValidationResult<()> {
    match bps {
        Some(bps) if !CommissionRate::from_bps(bps).is_within_bounds() => {
            Err(ValidationError::OutOfRange {
                field: "commission_rate".to_string(),
                min: 0,
                max: CommissionRate::MAX_BPS,
            })
        }
        _ => Ok(()),
    }
}

/// Validates a visit counter (never negative).
pub fn validate_total_visits(visits: i64) -> ValidationResult<()> {
    if visits < 0 {
        return Err(ValidationError::OutOfRange {
            field: "total_visits".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a unit record.
pub fn validate_unit(unit: &Unit) -> ValidationResult<()> {
    validate_id("unit.id", &unit.id)?;
    validate_name("unit.name", &unit.name)
}

/// Validates a barber record.
pub fn validate_barber(barber: &Barber) -> ValidationResult<()> {
    validate_id("barber.id", &barber.id)?;
    validate_id("barber.unit_id", &barber.unit_id)?;
    validate_name("barber.name", &barber.name)?;
    validate_commission_rate_bps(barber.commission_rate_bps)
}

/// Validates a client record.
pub fn validate_client(client: &Client) -> ValidationResult<()> {
    validate_id("client.id", &client.id)?;
    validate_id("client.unit_id", &client.unit_id)?;
    validate_name("client.name", &client.name)?;
    validate_total_visits(client.total_visits)
}

/// Validates a transaction record.
pub fn validate_transaction(tx: &Transaction) -> ValidationResult<()> {
    validate_id("transaction.id", &tx.id)?;
    validate_id("transaction.barber_id", &tx.barber_id)?;
    validate_id("transaction.unit_id", &tx.unit_id)?;
    validate_price_cents(tx.total_price_cents)?;
    validate_commission_rate_bps(tx.commission_rate_bps)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionStatus;
    use chrono::{TimeZone, Utc};

    fn sample_transaction() -> Transaction {
        Transaction {
            id: "t1".to_string(),
            barber_id: "b1".to_string(),
            unit_id: "u1".to_string(),
            total_price_cents: 4500,
            status: TransactionStatus::Completed,
            occurred_at: Utc.with_ymd_and_hms(2024, 3, 10, 14, 0, 0).unwrap(),
            commission_rate_bps: None,
        }
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Barbearia Centro").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", &"A".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_commission_rate_bps() {
        assert!(validate_commission_rate_bps(None).is_ok());
        assert!(validate_commission_rate_bps(Some(0)).is_ok());
        assert!(validate_commission_rate_bps(Some(10_000)).is_ok());
        assert!(validate_commission_rate_bps(Some(10_001)).is_err());
        assert!(validate_commission_rate_bps(Some(-5)).is_err());
    }

    #[test]
    fn test_validate_transaction() {
        assert!(validate_transaction(&sample_transaction()).is_ok());

        let negative = Transaction {
            total_price_cents: -1,
            ..sample_transaction()
        };
        assert!(matches!(
            validate_transaction(&negative),
            Err(ValidationError::OutOfRange { .. })
        ));

        let orphan = Transaction {
            barber_id: " ".to_string(),
            ..sample_transaction()
        };
        assert_eq!(
            validate_transaction(&orphan),
            Err(ValidationError::Required {
                field: "transaction.barber_id".to_string()
            })
        );
    }

    #[test]
    fn test_validate_client_visits() {
        let client = Client {
            id: "c1".to_string(),
            unit_id: "u1".to_string(),
            name: "João".to_string(),
            phone: None,
            last_visit_at: None,
            birth_date: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            total_visits: 0,
        };
        assert!(validate_client(&client).is_ok());

        let broken = Client {
            total_visits: -3,
            ..client
        };
        assert!(validate_client(&broken).is_err());
    }
}
