//! # Seed Data Generator
//!
//! Populates a database with demo units, barbers, clients and appointments.
//!
//! ## Usage
//! ```bash
//! # 60 days of history (default)
//! cargo run -p barberdesk-db --bin seed
//!
//! # Custom history length and database path
//! cargo run -p barberdesk-db --bin seed -- --days 120 --db ./data/barberdesk.db
//! ```
//!
//! ## Generated Data
//! - Three units, each with four barbers (one deactivated, one on the default rate)
//! - 40 clients per unit with mixed visit recency and birthdays in every month
//! - Appointments spread across the history window; roughly one in eight
//!   cancelled and the ones in the future left pending

use barberdesk_core::{Barber, Client, Transaction, TransactionStatus, Unit};
use barberdesk_db::{generate_id, Database, DbConfig};
use chrono::{Duration, NaiveDate, Utc};
use std::env;

const UNITS: &[(&str, &str)] = &[
    ("unit-centro", "Barbearia Centro"),
    ("unit-norte", "Barbearia Zona Norte"),
    ("unit-sul", "Barbearia Zona Sul"),
];

const BARBER_NAMES: &[&str] = &["Marcos", "Rafael", "Diego", "Thiago"];

/// Negotiated rates in bps; `None` leaves the barber on the default.
const BARBER_RATES: &[Option<i64>] = &[Some(4000), None, Some(4500), Some(5500)];

const CLIENT_NAMES: &[&str] = &[
    "João", "Pedro", "Lucas", "Gabriel", "Mateus", "Bruno", "André", "Felipe",
    "Gustavo", "Rodrigo", "Carlos", "Eduardo", "Leonardo", "Vinícius", "Daniel",
    "Ricardo", "Fernando", "Paulo", "Henrique", "Caio",
];

/// Service prices in cents.
const PRICES: &[i64] = &[3500, 4500, 2500, 6000, 7000];

const CLIENTS_PER_UNIT: usize = 40;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut days: i64 = 60;
    let mut db_path = String::from("./barberdesk_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--days" | "-n" => {
                if i + 1 < args.len() {
                    days = args[i + 1].parse().unwrap_or(60);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Barberdesk Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --days <N>     Days of appointment history (default: 60)");
                println!("  -d, --db <PATH>    Database file path (default: ./barberdesk_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Barberdesk Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!("History:  {} days", days);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.units().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} units", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let now = Utc::now();
    let mut appointments = 0usize;

    for (unit_idx, (unit_id, unit_name)) in UNITS.iter().enumerate() {
        db.units()
            .insert(&Unit {
                id: unit_id.to_string(),
                name: unit_name.to_string(),
            })
            .await?;

        let mut barber_ids = Vec::with_capacity(BARBER_NAMES.len());
        for (barber_idx, name) in BARBER_NAMES.iter().enumerate() {
            let barber = Barber {
                id: generate_id(),
                unit_id: unit_id.to_string(),
                name: name.to_string(),
                commission_rate_bps: BARBER_RATES[barber_idx % BARBER_RATES.len()],
                // Last barber of each unit has left but keeps their history
                is_active: barber_idx + 1 < BARBER_NAMES.len(),
            };
            db.barbers().insert(&barber).await?;
            barber_ids.push(barber.id);
        }

        let mut client_ids = Vec::with_capacity(CLIENTS_PER_UNIT);
        for client_idx in 0..CLIENTS_PER_UNIT {
            let seed = unit_idx * 100 + client_idx;
            let client = generate_client(unit_id, seed, now);
            db.clients().insert(&client).await?;
            client_ids.push(client.id);
        }

        // Three appointments a day per unit; day -1 is tomorrow's agenda
        for day in -1..days {
            for slot in 0..3usize {
                let seed = unit_idx * 10_000 + (day + 1) as usize * 3 + slot;
                let occurred_at = now - Duration::days(day) - Duration::hours(2 + 3 * slot as i64);

                let status = if occurred_at > now {
                    TransactionStatus::Pending
                } else if seed % 8 == 0 {
                    TransactionStatus::Cancelled
                } else {
                    TransactionStatus::Completed
                };

                let tx = Transaction {
                    id: generate_id(),
                    barber_id: barber_ids[seed % barber_ids.len()].clone(),
                    unit_id: unit_id.to_string(),
                    total_price_cents: PRICES[seed % PRICES.len()],
                    status,
                    occurred_at,
                    // Occasional promotional rate frozen on the appointment
                    commission_rate_bps: if seed % 17 == 0 { Some(3000) } else { None },
                };
                db.transactions().insert(&tx).await?;

                if status == TransactionStatus::Completed {
                    let client_id = &client_ids[seed % client_ids.len()];
                    db.clients().record_visit(client_id, occurred_at).await?;
                }

                appointments += 1;
            }
        }

        println!("  Seeded {} ({} barbers, {} clients)", unit_name, barber_ids.len(), client_ids.len());
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} appointments in {:?}", appointments, elapsed);
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

/// Generates a client with a birthday spread over the year and a signup
/// date up to a year back.
fn generate_client(unit_id: &str, seed: usize, now: chrono::DateTime<Utc>) -> Client {
    let name = CLIENT_NAMES[seed % CLIENT_NAMES.len()];
    let birth_date = if seed % 5 == 0 {
        None
    } else {
        NaiveDate::from_ymd_opt(1970 + (seed % 35) as i32, (seed % 12) as u32 + 1, (seed % 28) as u32 + 1)
    };

    Client {
        id: generate_id(),
        unit_id: unit_id.to_string(),
        name: format!("{} {}", name, seed),
        phone: Some(format!("+55 11 9{:04}-{:04}", seed % 10_000, (seed * 37) % 10_000)),
        last_visit_at: None,
        birth_date,
        created_at: now - Duration::days((seed * 11 % 365) as i64),
        total_visits: 0,
    }
}
