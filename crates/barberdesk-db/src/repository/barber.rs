//! # Barber Repository
//!
//! Barber roster and negotiated commission rates.
//!
//! Deactivation is soft: historical appointments keep pointing at the
//! barber, and `list_by_unit` still returns them so past commission
//! reports stay complete.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use barberdesk_core::validation::{validate_barber, validate_commission_rate_bps};
use barberdesk_core::Barber;

const BARBER_COLUMNS: &str = "id, unit_id, name, commission_rate_bps, is_active";

/// Repository for barber database operations.
#[derive(Debug, Clone)]
pub struct BarberRepository {
    pool: SqlitePool,
}

impl BarberRepository {
    /// Creates a new BarberRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BarberRepository { pool }
    }

    /// Lists every barber of a unit, active or not, ordered by name.
    pub async fn list_by_unit(&self, unit_id: &str) -> DbResult<Vec<Barber>> {
        let sql = format!("SELECT {BARBER_COLUMNS} FROM barbers WHERE unit_id = ?1 ORDER BY name, id");
        let barbers = sqlx::query_as::<_, Barber>(&sql)
            .bind(unit_id)
            .fetch_all(&self.pool)
            .await?;

        debug!(unit_id = %unit_id, count = barbers.len(), "Listed barbers");
        Ok(barbers)
    }

    /// Gets a barber by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Barber>> {
        let sql = format!("SELECT {BARBER_COLUMNS} FROM barbers WHERE id = ?1");
        let barber = sqlx::query_as::<_, Barber>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(barber)
    }

    /// Inserts a new barber.
    pub async fn insert(&self, barber: &Barber) -> DbResult<()> {
        validate_barber(barber)?;
        debug!(id = %barber.id, unit_id = %barber.unit_id, "Inserting barber");

        sqlx::query(
            r#"
            INSERT INTO barbers (id, unit_id, name, commission_rate_bps, is_active)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&barber.id)
        .bind(&barber.unit_id)
        .bind(&barber.name)
        .bind(barber.commission_rate_bps)
        .bind(barber.is_active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Changes a barber's negotiated rate. `None` reverts to the default.
    pub async fn set_commission_rate(&self, id: &str, rate_bps: Option<i64>) -> DbResult<()> {
        validate_commission_rate_bps(rate_bps)?;
        debug!(id = %id, rate_bps = ?rate_bps, "Updating commission rate");

        let result = sqlx::query("UPDATE barbers SET commission_rate_bps = ?2 WHERE id = ?1")
            .bind(id)
            .bind(rate_bps)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Barber", id));
        }

        Ok(())
    }

    /// Marks a barber inactive. Their history is kept.
    pub async fn deactivate(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deactivating barber");

        let result = sqlx::query("UPDATE barbers SET is_active = 0 WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Barber", id));
        }

        Ok(())
    }
}
