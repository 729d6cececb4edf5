//! # Unit Repository
//!
//! Shop locations.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use barberdesk_core::validation::validate_unit;
use barberdesk_core::Unit;

/// Repository for unit database operations.
#[derive(Debug, Clone)]
pub struct UnitRepository {
    pool: SqlitePool,
}

impl UnitRepository {
    /// Creates a new UnitRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UnitRepository { pool }
    }

    /// Lists all units ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Unit>> {
        let units = sqlx::query_as::<_, Unit>("SELECT id, name FROM units ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;

        debug!(count = units.len(), "Listed units");
        Ok(units)
    }

    /// Gets a unit by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Unit>> {
        let unit = sqlx::query_as::<_, Unit>("SELECT id, name FROM units WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(unit)
    }

    /// Inserts a new unit.
    pub async fn insert(&self, unit: &Unit) -> DbResult<()> {
        validate_unit(unit)?;
        debug!(id = %unit.id, "Inserting unit");

        sqlx::query("INSERT INTO units (id, name) VALUES (?1, ?2)")
            .bind(&unit.id)
            .bind(&unit.name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Counts units (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM units")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use barberdesk_core::Unit;

    fn unit(id: &str, name: &str) -> Unit {
        Unit {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_sorted() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.units().insert(&unit("u2", "Norte")).await.unwrap();
        db.units().insert(&unit("u1", "Centro")).await.unwrap();

        let units = db.units().list().await.unwrap();
        assert_eq!(units, vec![unit("u1", "Centro"), unit("u2", "Norte")]);
        assert_eq!(db.units().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.units().insert(&unit("u1", "Centro")).await.unwrap();

        assert!(db.units().get_by_id("u1").await.unwrap().is_some());
        assert!(db.units().get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.units().insert(&unit("u1", "Centro")).await.unwrap();

        let err = db.units().insert(&unit("u1", "Outra")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db.units().insert(&unit("u1", " ")).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }
}
