//! # Barberdesk Reports
//!
//! Report service and command-line front end.
//!
//! ## Module Organization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        barberdesk-reports                               │
//! │                                                                         │
//! │  ┌──────────┐   ┌──────────┐   ┌──────────────┐   ┌─────────────────┐  │
//! │  │  config  │   │   cli    │──►│   service    │──►│ barberdesk-core │  │
//! │  │ (toml +  │   │ (args →  │   │ (period →    │   │ (pure math)     │  │
//! │  │  env)    │   │  JSON)   │   │  fetch → agg)│   └─────────────────┘  │
//! │  └──────────┘   └──────────┘   └──────┬───────┘                        │
//! │                                       │ DataStore                       │
//! │                                       ▼                                 │
//! │                               ┌─────────────────┐                       │
//! │                               │  barberdesk-db  │                       │
//! │                               └─────────────────┘                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod service;

pub use cli::{parse_args, run, Command, Invocation};
pub use config::ReportConfig;
pub use error::{ConfigError, ConfigResult, ReportError, ReportResult};
pub use service::{
    BarberCommission, CashFlowReport, ClientReport, CommissionReport, PeriodSummary, ReportService,
};

/// In-memory Data Store for service and CLI tests.
#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;
    use barberdesk_core::{Barber, Client, DateRange, Transaction, TransactionStatus, Unit};
    use barberdesk_db::{DataStore, DbResult};
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    pub struct FakeStore {
        pub units: Vec<Unit>,
        pub barbers: Vec<Barber>,
        pub clients: Vec<Client>,
        pub transactions: Vec<Transaction>,
        pub fetches: AtomicUsize,
    }

    impl FakeStore {
        pub fn transaction_fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DataStore for FakeStore {
        async fn fetch_transactions(
            &self,
            range: &DateRange,
            unit_id: &str,
            barber_id: Option<&str>,
            status: TransactionStatus,
        ) -> DbResult<Vec<Transaction>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .transactions
                .iter()
                .filter(|t| t.unit_id == unit_id && t.status == status)
                .filter(|t| barber_id.map_or(true, |id| t.barber_id == id))
                .filter(|t| range.contains(t.occurred_at))
                .cloned()
                .collect())
        }

        async fn fetch_clients(&self, unit_ids: &[String]) -> DbResult<Vec<Client>> {
            Ok(self
                .clients
                .iter()
                .filter(|c| unit_ids.contains(&c.unit_id))
                .cloned()
                .collect())
        }

        async fn fetch_barbers(&self, unit_id: &str) -> DbResult<Vec<Barber>> {
            Ok(self
                .barbers
                .iter()
                .filter(|b| b.unit_id == unit_id)
                .cloned()
                .collect())
        }

        async fn fetch_units(&self) -> DbResult<Vec<Unit>> {
            Ok(self.units.clone())
        }
    }

    pub fn unit(id: &str, name: &str) -> Unit {
        Unit {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    pub fn barber(id: &str, unit_id: &str, rate_bps: Option<i64>, is_active: bool) -> Barber {
        Barber {
            id: id.to_string(),
            unit_id: unit_id.to_string(),
            name: id.to_uppercase(),
            commission_rate_bps: rate_bps,
            is_active,
        }
    }

    pub fn client(
        id: &str,
        unit_id: &str,
        last_visit_at: Option<DateTime<Utc>>,
        total_visits: i64,
    ) -> Client {
        Client {
            id: id.to_string(),
            unit_id: unit_id.to_string(),
            name: id.to_string(),
            phone: None,
            last_visit_at,
            birth_date: None,
            created_at: Utc.timestamp_opt(0, 0).unwrap(),
            total_visits,
        }
    }

    pub fn tx(
        id: &str,
        barber_id: &str,
        unit_id: &str,
        price_cents: i64,
        occurred_at: DateTime<Utc>,
        status: TransactionStatus,
    ) -> Transaction {
        Transaction {
            id: id.to_string(),
            barber_id: barber_id.to_string(),
            unit_id: unit_id.to_string(),
            total_price_cents: price_cents,
            status,
            occurred_at,
            commission_rate_bps: None,
        }
    }
}
