//! # Command Line
//!
//! Argument parsing and dispatch for the `reports` binary. Every command
//! prints its report as pretty JSON.

use barberdesk_db::DataStore;
use chrono::{DateTime, TimeZone};
use std::path::PathBuf;

use crate::error::{ReportError, ReportResult};
use crate::service::ReportService;

pub const USAGE: &str = "\
Barberdesk Reports

Usage: reports [--config <PATH>] <COMMAND> [OPTIONS]

Commands:
  cash-flow    --unit <ID>                                  Today, week and month totals
  commissions  --unit <ID> --year <YYYY> --month <1-12> [--barber <ID>]
                                                            Monthly commission report
  clients                                                   Client activity per unit
  help                                                      Show this message

Options:
  -c, --config <PATH>   Config file (default: platform config dir/reports.toml)";

/// A parsed report command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CashFlow {
        unit_id: String,
    },
    Commissions {
        unit_id: String,
        year: i32,
        /// Zero-based.
        month_index: u32,
        barber_id: Option<String>,
    },
    Clients,
    Help,
}

/// Command plus global options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub config_path: Option<PathBuf>,
    pub command: Command,
}

/// Parses arguments, program name excluded.
pub fn parse_args(args: &[String]) -> ReportResult<Invocation> {
    let mut config_path = None;
    let mut command_name: Option<&str> = None;
    let mut unit_id = None;
    let mut year = None;
    let mut month = None;
    let mut barber_id = None;

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "--config" | "-c" => config_path = Some(PathBuf::from(value_of(args, i)?)),
            "--unit" | "-u" => unit_id = Some(value_of(args, i)?.to_string()),
            "--year" | "-y" => year = Some(parse_number::<i32>(args, i)?),
            "--month" | "-m" => month = Some(parse_number::<u32>(args, i)?),
            "--barber" | "-b" => barber_id = Some(value_of(args, i)?.to_string()),
            "--help" | "-h" | "help" => command_name = Some("help"),
            _ if arg.starts_with('-') => {
                return Err(ReportError::Usage(format!("Unknown option '{}'", arg)));
            }
            _ if command_name.is_none() => command_name = Some(arg),
            _ => return Err(ReportError::Usage(format!("Unexpected argument '{}'", arg))),
        }
        i += if arg.starts_with('-') && !matches!(arg, "--help" | "-h") { 2 } else { 1 };
    }

    let command = match command_name {
        None | Some("help") => Command::Help,
        Some("cash-flow") => Command::CashFlow {
            unit_id: required(unit_id, "--unit")?,
        },
        Some("commissions") => {
            let month = required(month, "--month")?;
            let month_index = month
                .checked_sub(1)
                .filter(|m| *m < 12)
                .ok_or_else(|| {
                    ReportError::Usage(format!("--month must be between 1 and 12, got {}", month))
                })?;

            Command::Commissions {
                unit_id: required(unit_id, "--unit")?,
                year: required(year, "--year")?,
                month_index,
                barber_id,
            }
        }
        Some("clients") => Command::Clients,
        Some(other) => return Err(ReportError::Usage(format!("Unknown command '{}'", other))),
    };

    Ok(Invocation {
        config_path,
        command,
    })
}

fn value_of(args: &[String], i: usize) -> ReportResult<&str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| ReportError::Usage(format!("{} requires a value", args[i])))
}

fn parse_number<T: std::str::FromStr>(args: &[String], i: usize) -> ReportResult<T> {
    let raw = value_of(args, i)?;
    raw.parse()
        .map_err(|_| ReportError::Usage(format!("{} expects a number, got '{}'", args[i], raw)))
}

fn required<T>(value: Option<T>, flag: &str) -> ReportResult<T> {
    value.ok_or_else(|| ReportError::Usage(format!("{} is required", flag)))
}

/// Runs one command against the service and renders the result.
pub async fn run<S, Tz>(
    service: &ReportService<S>,
    command: &Command,
    now: &DateTime<Tz>,
) -> ReportResult<String>
where
    S: DataStore,
    Tz: TimeZone,
{
    let output = match command {
        Command::CashFlow { unit_id } => {
            serde_json::to_string_pretty(&service.cash_flow(unit_id, now).await?)?
        }
        Command::Commissions {
            unit_id,
            year,
            month_index,
            barber_id,
        } => {
            let report = service
                .commission_report(
                    unit_id,
                    *year,
                    *month_index,
                    barber_id.as_deref(),
                    &now.timezone(),
                )
                .await?;
            serde_json::to_string_pretty(&report)?
        }
        Command::Clients => serde_json::to_string_pretty(&service.client_report(now).await?)?,
        Command::Help => USAGE.to_string(),
    };

    Ok(output)
}
