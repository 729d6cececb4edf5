//! # Reports Entry Point
//!
//! ```text
//! args ──► config ──► tracing ──► now (single clock read) ──► Database ──► run ──► stdout
//! ```

use barberdesk_db::{Database, DbConfig};
use barberdesk_reports::{parse_args, run, Command, ReportConfig, ReportService};
use chrono::Utc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = match parse_args(&args) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", barberdesk_reports::cli::USAGE);
            std::process::exit(2);
        }
    };

    if invocation.command == Command::Help {
        println!("{}", barberdesk_reports::cli::USAGE);
        return Ok(());
    }

    let config = ReportConfig::load(invocation.config_path)?;
    init_tracing(&config.logging.level);

    let zone = config.zone()?;
    let now = Utc::now().with_timezone(&zone);

    info!(
        db = %config.database.path.display(),
        utc_offset_minutes = config.reporting.utc_offset_minutes,
        "Starting report run"
    );

    let db = Database::new(
        DbConfig::new(config.database.path.clone()).max_connections(config.database.max_connections),
    )
    .await?;

    let service = ReportService::new(db).with_fallback_rate(config.fallback_rate());
    let result = run(&service, &invocation.command, &now).await;
    service.store().close().await;

    println!("{}", result?);
    Ok(())
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
