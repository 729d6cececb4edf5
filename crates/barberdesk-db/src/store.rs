//! # Data Store
//!
//! The read interface the report service fetches snapshots through.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ReportService<S: DataStore>                                            │
//! │       │                                                                 │
//! │       ├── fetch_transactions(range, unit, barber?, status)             │
//! │       ├── fetch_clients(unit_ids)                                      │
//! │       ├── fetch_barbers(unit)                                          │
//! │       └── fetch_units()                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  impl DataStore for Database  ──►  repositories  ──►  SQLite           │
//! │  (tests swap in an in-memory fake)                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fetches are the only place a report suspends. Everything after them is
//! synchronous core math.

use async_trait::async_trait;

use crate::error::DbResult;
use crate::pool::Database;
use barberdesk_core::{Barber, Client, DateRange, Transaction, TransactionStatus, Unit};

/// Snapshot reads needed by the reports.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Transactions of a unit inside `range` with the given status,
    /// optionally restricted to one barber.
    async fn fetch_transactions(
        &self,
        range: &DateRange,
        unit_id: &str,
        barber_id: Option<&str>,
        status: TransactionStatus,
    ) -> DbResult<Vec<Transaction>>;

    /// Clients belonging to any of `unit_ids`.
    async fn fetch_clients(&self, unit_ids: &[String]) -> DbResult<Vec<Client>>;

    /// Every barber of a unit, including deactivated ones.
    async fn fetch_barbers(&self, unit_id: &str) -> DbResult<Vec<Barber>>;

    /// All units.
    async fn fetch_units(&self) -> DbResult<Vec<Unit>>;
}

#[async_trait]
impl DataStore for Database {
    async fn fetch_transactions(
        &self,
        range: &DateRange,
        unit_id: &str,
        barber_id: Option<&str>,
        status: TransactionStatus,
    ) -> DbResult<Vec<Transaction>> {
        self.transactions()
            .list_in_range(range, unit_id, barber_id, status)
            .await
    }

    async fn fetch_clients(&self, unit_ids: &[String]) -> DbResult<Vec<Client>> {
        self.clients().list_by_units(unit_ids).await
    }

    async fn fetch_barbers(&self, unit_id: &str) -> DbResult<Vec<Barber>> {
        self.barbers().list_by_unit(unit_id).await
    }

    async fn fetch_units(&self) -> DbResult<Vec<Unit>> {
        self.units().list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use barberdesk_core::resolve_month;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_database_as_data_store() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.units()
            .insert(&Unit {
                id: "u1".to_string(),
                name: "Centro".to_string(),
            })
            .await
            .unwrap();
        db.barbers()
            .insert(&Barber {
                id: "b1".to_string(),
                unit_id: "u1".to_string(),
                name: "Marcos".to_string(),
                commission_rate_bps: Some(4000),
                is_active: true,
            })
            .await
            .unwrap();
        db.transactions()
            .insert(&Transaction {
                id: "t1".to_string(),
                barber_id: "b1".to_string(),
                unit_id: "u1".to_string(),
                total_price_cents: 5000,
                status: TransactionStatus::Completed,
                occurred_at: Utc.with_ymd_and_hms(2024, 3, 9, 16, 0, 0).unwrap(),
                commission_rate_bps: None,
            })
            .await
            .unwrap();

        let store: &dyn DataStore = &db;
        assert_eq!(store.fetch_units().await.unwrap().len(), 1);
        assert_eq!(store.fetch_barbers("u1").await.unwrap().len(), 1);
        assert!(store.fetch_clients(&["u1".to_string()]).await.unwrap().is_empty());

        let march = resolve_month(2024, 2, &Utc).unwrap();
        let txs = store
            .fetch_transactions(&march, "u1", Some("b1"), TransactionStatus::Completed)
            .await
            .unwrap();
        assert_eq!(txs.len(), 1);
    }
}
