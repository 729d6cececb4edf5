//! # barberdesk-db: Data Store for Barberdesk Reporting
//!
//! SQLite persistence for units, barbers, clients and appointments, and the
//! [`DataStore`] trait the report service reads through.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Barberdesk Data Flow                               │
//! │                                                                         │
//! │  ReportService (apps/reports)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  barberdesk-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ UnitRepo      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ BarberRepo    │    │ 001_initial  │  │   │
//! │  │   │ DataStore     │    │ ClientRepo    │    │ _schema.sql  │  │   │
//! │  │   │               │    │ TransactionRepo│   │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database (path from ReportConfig)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - One repository per entity
//! - [`store`] - The `DataStore` trait and its SQLite implementation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use barberdesk_db::{DataStore, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("barberdesk.db")).await?;
//! let units = db.fetch_units().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::DataStore;

pub use repository::barber::BarberRepository;
pub use repository::client::ClientRepository;
pub use repository::generate_id;
pub use repository::transaction::TransactionRepository;
pub use repository::unit::UnitRepository;
