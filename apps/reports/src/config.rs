//! # Report Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BARBERDESK_DB_PATH=/srv/barberdesk.db                              │
//! │     BARBERDESK_UTC_OFFSET_MINUTES=-180                                 │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/barberdesk/reports.toml (Linux)                          │
//! │     ~/Library/Application Support/com.barberdesk.reports/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # reports.toml
//! [database]
//! path = "/srv/barberdesk/barberdesk.db"
//! max_connections = 5
//!
//! [reporting]
//! utc_offset_minutes = -180        # civil calendar for midnights and months
//! default_commission_percent = 50  # used when barber and appointment have no rate
//!
//! [logging]
//! level = "info"
//! ```

use barberdesk_core::CommissionRate;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

/// Largest offset accepted, in minutes (UTC±14:00).
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

// =============================================================================
// Database Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> PathBuf {
    directories::ProjectDirs::from("com", "barberdesk", "reports")
        .map(|dirs| dirs.data_dir().join("barberdesk.db"))
        .unwrap_or_else(|| PathBuf::from("barberdesk.db"))
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

// =============================================================================
// Reporting Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportingSettings {
    /// Offset of the shop's civil calendar from UTC, in minutes.
    /// Default: 0
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// Rate used when neither the appointment nor the barber has one.
    /// Default: 50
    #[serde(default = "default_commission_percent")]
    pub default_commission_percent: f64,
}

fn default_commission_percent() -> f64 {
    50.0
}

impl Default for ReportingSettings {
    fn default() -> Self {
        ReportingSettings {
            utc_offset_minutes: 0,
            default_commission_percent: default_commission_percent(),
        }
    }
}

// =============================================================================
// Logging Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info,sqlx=warn".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: default_log_level(),
        }
    }
}

// =============================================================================
// Report Configuration
// =============================================================================

/// Complete configuration of the reports CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub reporting: ReportingSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl ReportConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else the platform default if present)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path)),
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(path)?,
                path => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    fn from_file(path: PathBuf) -> ConfigResult<Self> {
        info!(?path, "Loading report config from file");
        let contents = std::fs::read_to_string(&path)?;
        Self::from_toml(&contents)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database.path must not be empty".into()));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        if self.reporting.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::Invalid(format!(
                "reporting.utc_offset_minutes must be within ±{}, got {}",
                MAX_UTC_OFFSET_MINUTES, self.reporting.utc_offset_minutes
            )));
        }

        let pct = self.reporting.default_commission_percent;
        if !(0.0..=100.0).contains(&pct) {
            return Err(ConfigError::Invalid(format!(
                "reporting.default_commission_percent must be between 0 and 100, got {}",
                pct
            )));
        }

        Ok(())
    }

    /// Applies `BARBERDESK_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("BARBERDESK_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }

        if let Some(max) = lookup("BARBERDESK_DB_MAX_CONNECTIONS") {
            match max.parse::<u32>() {
                Ok(max) => self.database.max_connections = max,
                Err(_) => warn!(value = %max, "Ignoring invalid BARBERDESK_DB_MAX_CONNECTIONS"),
            }
        }

        if let Some(offset) = lookup("BARBERDESK_UTC_OFFSET_MINUTES") {
            match offset.parse::<i32>() {
                Ok(offset) => {
                    debug!(offset, "Overriding UTC offset from environment");
                    self.reporting.utc_offset_minutes = offset;
                }
                Err(_) => warn!(value = %offset, "Ignoring invalid BARBERDESK_UTC_OFFSET_MINUTES"),
            }
        }

        if let Some(pct) = lookup("BARBERDESK_DEFAULT_COMMISSION_PERCENT") {
            match pct.parse::<f64>() {
                Ok(pct) => self.reporting.default_commission_percent = pct,
                Err(_) => {
                    warn!(value = %pct, "Ignoring invalid BARBERDESK_DEFAULT_COMMISSION_PERCENT")
                }
            }
        }

        if let Some(level) = lookup("BARBERDESK_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "barberdesk", "reports")
            .map(|dirs| dirs.config_dir().join("reports.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The shop's civil-calendar zone.
    pub fn zone(&self) -> ConfigResult<FixedOffset> {
        FixedOffset::east_opt(self.reporting.utc_offset_minutes * 60).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "unsupported UTC offset: {} minutes",
                self.reporting.utc_offset_minutes
            ))
        })
    }

    /// The configured fallback commission rate.
    pub fn fallback_rate(&self) -> CommissionRate {
        CommissionRate::from_percentage(self.reporting.default_commission_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.reporting.utc_offset_minutes, 0);
        assert_eq!(config.fallback_rate().bps(), 5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ReportConfig::from_toml(
            r#"
            [reporting]
            utc_offset_minutes = -180
            default_commission_percent = 42.5
            "#,
        )
        .unwrap();

        assert_eq!(config.reporting.utc_offset_minutes, -180);
        assert_eq!(config.fallback_rate().bps(), 4250);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.zone().unwrap(), FixedOffset::west_opt(3 * 3600).unwrap());
    }

    #[test]
    fn test_invalid_toml() {
        let err = ReportConfig::from_toml("[database]\nmax_connections = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation() {
        let mut config = ReportConfig::default();

        config.reporting.default_commission_percent = 120.0;
        assert!(config.validate().is_err());

        config.reporting.default_commission_percent = 40.0;
        config.reporting.utc_offset_minutes = 15 * 60;
        assert!(config.validate().is_err());

        config.reporting.utc_offset_minutes = 330;
        config.database.max_connections = 0;
        assert!(config.validate().is_err());

        config.database.max_connections = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("BARBERDESK_DB_PATH", "/tmp/shop.db"),
            ("BARBERDESK_UTC_OFFSET_MINUTES", "-180"),
            ("BARBERDESK_DB_MAX_CONNECTIONS", "not-a-number"),
            ("BARBERDESK_LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = ReportConfig::default();
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.database.path, PathBuf::from("/tmp/shop.db"));
        assert_eq!(config.reporting.utc_offset_minutes, -180);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = ReportConfig::load(Some(PathBuf::from("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
