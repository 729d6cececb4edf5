//! # Report Errors
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ConfigError ──┐                                                        │
//! │  CoreError  ───┼──► ReportError ──► main() ──► stderr, exit code 1     │
//! │  DbError    ───┘                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use barberdesk_core::CoreError;
use barberdesk_db::DbError;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// The config file could not be read.
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    /// The config file is not valid TOML for `ReportConfig`.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Errors surfaced by the report service and the CLI.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Bad period, month, rate or amount.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The Data Store failed.
    #[error("Data store error: {0}")]
    Store(#[from] DbError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The requested barber is not on the unit's roster.
    #[error("Unknown barber '{barber_id}' in unit '{unit_id}'")]
    UnknownBarber { unit_id: String, barber_id: String },

    /// Bad command line.
    #[error("{0}")]
    Usage(String),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

pub type ReportResult<T> = Result<T, ReportError>;
