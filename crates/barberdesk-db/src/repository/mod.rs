//! # Repository Module
//!
//! One repository per entity, each holding a clone of the pool.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ReportService                                                          │
//! │       │  store.fetch_transactions(range, unit, barber, Completed)      │
//! │       ▼                                                                 │
//! │  DataStore for Database (store.rs)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TransactionRepository::list_in_range(...)                             │
//! │       │  SELECT ... WHERE occurred_at >= ?start AND occurred_at < ?end │
//! │       ▼                                                                 │
//! │  SQLite                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inserts validate the record with `barberdesk_core::validation` first;
//! SQLite CHECK constraints catch whatever slips past.
//!
//! ## Available Repositories
//!
//! - [`unit::UnitRepository`] - Shop locations
//! - [`barber::BarberRepository`] - Barber roster and rates
//! - [`client::ClientRepository`] - Clients and visit counters
//! - [`transaction::TransactionRepository`] - Appointment ledger

pub mod barber;
pub mod client;
pub mod transaction;
pub mod unit;

use uuid::Uuid;

/// Generates a new record ID.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
