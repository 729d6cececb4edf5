//! # Transaction Repository
//!
//! The appointment ledger.
//!
//! ## Range Queries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DateRange [start, end)                                                 │
//! │                                                                         │
//! │  WHERE unit_id = ?                                                      │
//! │    AND status = ?            ('completed' for every report)            │
//! │    AND occurred_at >= start  (inclusive)                               │
//! │    AND occurred_at <  end    (exclusive)                               │
//! │    AND (? IS NULL OR barber_id = ?)                                    │
//! │                                                                         │
//! │  Served by idx_transactions_unit_time (unit_id, status, occurred_at)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Instants are stored as UTC RFC 3339 text, so the lexical comparison
//! above is also the chronological one.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use barberdesk_core::validation::validate_transaction;
use barberdesk_core::{DateRange, Transaction, TransactionStatus};

const TRANSACTION_COLUMNS: &str =
    "id, barber_id, unit_id, total_price_cents, status, occurred_at, commission_rate_bps";

/// Repository for transaction database operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Lists a unit's transactions with `status` inside `range`,
    /// optionally restricted to one barber. Ordered by time.
    pub async fn list_in_range(
        &self,
        range: &DateRange,
        unit_id: &str,
        barber_id: Option<&str>,
        status: TransactionStatus,
    ) -> DbResult<Vec<Transaction>> {
        debug!(
            unit_id = %unit_id,
            barber_id = ?barber_id,
            status = %status,
            start = %range.start,
            end = %range.end,
            "Fetching transactions"
        );

        let sql = format!(
            r#"
            SELECT {TRANSACTION_COLUMNS}
            FROM transactions
            WHERE unit_id = ?1
              AND status = ?2
              AND occurred_at >= ?3
              AND occurred_at < ?4
              AND (?5 IS NULL OR barber_id = ?5)
            ORDER BY occurred_at, id
            "#
        );

        let transactions = sqlx::query_as::<_, Transaction>(&sql)
            .bind(unit_id)
            .bind(status)
            .bind(range.start)
            .bind(range.end)
            .bind(barber_id)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = transactions.len(), "Fetched transactions");
        Ok(transactions)
    }

    /// Gets a transaction by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Transaction>> {
        let sql = format!("SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = ?1");
        let transaction = sqlx::query_as::<_, Transaction>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(transaction)
    }

    /// Inserts a new transaction.
    pub async fn insert(&self, tx: &Transaction) -> DbResult<()> {
        validate_transaction(tx)?;
        debug!(id = %tx.id, barber_id = %tx.barber_id, "Inserting transaction");

        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, barber_id, unit_id, total_price_cents,
                status, occurred_at, commission_rate_bps
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&tx.id)
        .bind(&tx.barber_id)
        .bind(&tx.unit_id)
        .bind(tx.total_price_cents)
        .bind(tx.status)
        .bind(tx.occurred_at)
        .bind(tx.commission_rate_bps)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Moves a transaction to a new status.
    pub async fn set_status(&self, id: &str, status: TransactionStatus) -> DbResult<()> {
        debug!(id = %id, status = %status, "Updating transaction status");

        let result = sqlx::query("UPDATE transactions SET status = ?2 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Transaction", id));
        }

        Ok(())
    }

    /// Counts transactions (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
