//! # Client Repository
//!
//! Clients and their visit history.
//!
//! `total_visits` only ever grows: `record_visit` increments it and moves
//! `last_visit_at` forward, never backward.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use barberdesk_core::validation::validate_client;
use barberdesk_core::Client;

const CLIENT_COLUMNS: &str =
    "id, unit_id, name, phone, last_visit_at, birth_date, created_at, total_visits";

/// Repository for client database operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ClientRepository { pool }
    }

    /// Lists the clients of any of the given units.
    ///
    /// An empty unit list yields no clients rather than all of them.
    pub async fn list_by_units(&self, unit_ids: &[String]) -> DbResult<Vec<Client>> {
        if unit_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE unit_id IN ("));
        let mut separated = query.separated(", ");
        for unit_id in unit_ids {
            separated.push_bind(unit_id);
        }
        separated.push_unseparated(") ORDER BY unit_id, name, id");

        let clients = query.build_query_as::<Client>().fetch_all(&self.pool).await?;

        debug!(units = unit_ids.len(), count = clients.len(), "Listed clients");
        Ok(clients)
    }

    /// Gets a client by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Client>> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ?1");
        let client = sqlx::query_as::<_, Client>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(client)
    }

    /// Inserts a new client.
    pub async fn insert(&self, client: &Client) -> DbResult<()> {
        validate_client(client)?;
        debug!(id = %client.id, unit_id = %client.unit_id, "Inserting client");

        sqlx::query(
            r#"
            INSERT INTO clients (
                id, unit_id, name, phone,
                last_visit_at, birth_date, created_at, total_visits
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&client.id)
        .bind(&client.unit_id)
        .bind(&client.name)
        .bind(&client.phone)
        .bind(client.last_visit_at)
        .bind(client.birth_date)
        .bind(client.created_at)
        .bind(client.total_visits)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Records a completed visit.
    ///
    /// Increments the counter; `last_visit_at` only moves forward, so
    /// back-dated completions don't make a client look lapsed.
    pub async fn record_visit(&self, id: &str, visited_at: DateTime<Utc>) -> DbResult<()> {
        debug!(id = %id, visited_at = %visited_at, "Recording visit");

        let current = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Client", id))?;

        let last_visit_at = match current.last_visit_at {
            Some(previous) if previous > visited_at => previous,
            _ => visited_at,
        };

        sqlx::query(
            r#"
            UPDATE clients
            SET total_visits = total_visits + 1,
                last_visit_at = ?2
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(last_visit_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use barberdesk_core::Unit;
    use chrono::{NaiveDate, TimeZone};

    async fn setup() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        for (id, name) in [("u1", "Centro"), ("u2", "Norte"), ("u3", "Sul")] {
            db.units()
                .insert(&Unit {
                    id: id.to_string(),
                    name: name.to_string(),
                })
                .await
                .unwrap();
        }
        db
    }

    fn client(id: &str, unit: &str) -> Client {
        Client {
            id: id.to_string(),
            unit_id: unit.to_string(),
            name: format!("Cliente {id}"),
            phone: Some("+55 11 99999-0000".to_string()),
            last_visit_at: None,
            birth_date: NaiveDate::from_ymd_opt(1990, 3, 15),
            created_at: Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap(),
            total_visits: 0,
        }
    }

    #[tokio::test]
    async fn test_roundtrip_preserves_optionals() {
        let db = setup().await;
        let bare = Client {
            phone: None,
            birth_date: None,
            ..client("c1", "u1")
        };
        db.clients().insert(&bare).await.unwrap();
        db.clients().insert(&client("c2", "u1")).await.unwrap();

        let stored = db.clients().get_by_id("c1").await.unwrap().unwrap();
        assert_eq!(stored, bare);

        let stored = db.clients().get_by_id("c2").await.unwrap().unwrap();
        assert_eq!(stored.birth_date, NaiveDate::from_ymd_opt(1990, 3, 15));
    }

    #[tokio::test]
    async fn test_list_by_units() {
        let db = setup().await;
        db.clients().insert(&client("c1", "u1")).await.unwrap();
        db.clients().insert(&client("c2", "u2")).await.unwrap();
        db.clients().insert(&client("c3", "u3")).await.unwrap();

        let ids = vec!["u1".to_string(), "u3".to_string()];
        let clients = db.clients().list_by_units(&ids).await.unwrap();
        let found: Vec<&str> = clients.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(found, vec!["c1", "c3"]);

        assert!(db.clients().list_by_units(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_visit_moves_forward_only() {
        let db = setup().await;
        db.clients().insert(&client("c1", "u1")).await.unwrap();

        let march = Utc.with_ymd_and_hms(2024, 3, 10, 15, 0, 0).unwrap();
        let february = Utc.with_ymd_and_hms(2024, 2, 10, 15, 0, 0).unwrap();
        db.clients().record_visit("c1", march).await.unwrap();
        db.clients().record_visit("c1", february).await.unwrap();

        let stored = db.clients().get_by_id("c1").await.unwrap().unwrap();
        assert_eq!(stored.total_visits, 2);
        assert_eq!(stored.last_visit_at, Some(march));

        let err = db.clients().record_visit("missing", march).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
