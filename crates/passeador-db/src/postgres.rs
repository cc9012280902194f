//! PostgreSQL-backed [`PasseadorStore`].

use async_trait::async_trait;
use passeador_core::AppError;
use passeador_models::{Passeador, PasseadorFields};
use sqlx::PgPool;
use tracing::{debug, error, instrument, warn};
use uuid::Uuid;

use crate::store::{PasseadorStore, duplicate_email};

const COLUMNS: &str = "id, name, email, password, availability, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PgPasseadorStore {
    pool: PgPool,
}

impl PgPasseadorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Maps a write failure to a 500. A unique-email violation is logged at
/// `warn`, everything else at `error`.
fn map_write_error(e: sqlx::Error, email: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            warn!(passeador.email = %email, error = %e, "Attempted to reuse a registered email");
            return duplicate_email();
        }
    }
    error!(error = %e, passeador.email = %email, "Database error writing passeador");
    AppError::database(e)
}

#[async_trait]
impl PasseadorStore for PgPasseadorStore {
    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "passeadores"))]
    async fn list(&self) -> Result<Vec<Passeador>, AppError> {
        let passeadores = sqlx::query_as::<_, Passeador>(&format!(
            "SELECT {COLUMNS} FROM passeadores ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error listing passeadores");
            AppError::database(e)
        })?;

        debug!(count = passeadores.len(), "Passeadores fetched");
        Ok(passeadores)
    }

    #[instrument(skip(self), fields(passeador.id = %id, db.operation = "SELECT", db.table = "passeadores"))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Passeador>, AppError> {
        sqlx::query_as::<_, Passeador>(&format!(
            "SELECT {COLUMNS} FROM passeadores WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(passeador.id = %id, error = %e, "Database error fetching passeador");
            AppError::database(e)
        })
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "passeadores"))]
    async fn find_by_email(&self, email: &str) -> Result<Option<Passeador>, AppError> {
        sqlx::query_as::<_, Passeador>(&format!(
            "SELECT {COLUMNS} FROM passeadores WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching passeador by email");
            AppError::database(e)
        })
    }

    #[instrument(skip(self, input), fields(db.operation = "INSERT", db.table = "passeadores"))]
    async fn create(&self, input: PasseadorFields) -> Result<Passeador, AppError> {
        sqlx::query_as::<_, Passeador>(&format!(
            "INSERT INTO passeadores (name, email, password, availability)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        ))
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(&input.availability)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &input.email))
    }

    #[instrument(skip(self, input), fields(passeador.id = %id, db.operation = "UPDATE", db.table = "passeadores"))]
    async fn update(
        &self,
        id: Uuid,
        input: PasseadorFields,
    ) -> Result<Option<Passeador>, AppError> {
        sqlx::query_as::<_, Passeador>(&format!(
            "UPDATE passeadores
             SET name = $1, email = $2, password = $3, availability = $4, updated_at = NOW()
             WHERE id = $5
             RETURNING {COLUMNS}"
        ))
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(&input.availability)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &input.email))
    }

    #[instrument(skip(self), fields(passeador.id = %id, db.operation = "DELETE", db.table = "passeadores"))]
    async fn remove(&self, id: Uuid) -> Result<Option<Passeador>, AppError> {
        sqlx::query_as::<_, Passeador>(&format!(
            "DELETE FROM passeadores WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(passeador.id = %id, error = %e, "Database error deleting passeador");
            AppError::database(e)
        })
    }

    #[instrument(skip(self), fields(db.operation = "DELETE", db.table = "passeadores"))]
    async fn remove_all(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM passeadores")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error clearing passeadores");
                AppError::database(e)
            })?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    //! Require a running PostgreSQL (`DATABASE_URL`); run with `--ignored`.
    use super::*;

    fn fields(email: &str) -> PasseadorFields {
        PasseadorFields {
            name: "Ana".to_string(),
            email: email.to_string(),
            password_hash: "$2b$04$not-a-real-hash".to_string(),
            availability: "weekends".to_string(),
        }
    }

    #[ignore]
    #[sqlx::test(migrations = "../../migrations")]
    async fn test_create_and_find(pool: PgPool) {
        let store = PgPasseadorStore::new(pool);

        let created = store.create(fields("ana@x.com")).await.unwrap();
        assert_eq!(created.name, "Ana");

        let by_id = store.find_by_id(created.id).await.unwrap();
        assert_eq!(by_id, Some(created.clone()));

        let by_email = store.find_by_email("ana@x.com").await.unwrap();
        assert_eq!(by_email.map(|p| p.id), Some(created.id));
    }

    #[ignore]
    #[sqlx::test(migrations = "../../migrations")]
    async fn test_duplicate_email_is_store_failure(pool: PgPool) {
        let store = PgPasseadorStore::new(pool);

        store.create(fields("dup@x.com")).await.unwrap();
        let err = store.create(fields("dup@x.com")).await.unwrap_err();

        assert_eq!(err.status.as_u16(), 500);
    }

    #[ignore]
    #[sqlx::test(migrations = "../../migrations")]
    async fn test_update_unknown_id_with_taken_email_is_none(pool: PgPool) {
        let store = PgPasseadorStore::new(pool);
        store.create(fields("taken@x.com")).await.unwrap();

        let result = store
            .update(Uuid::new_v4(), fields("taken@x.com"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[ignore]
    #[sqlx::test(migrations = "../../migrations")]
    async fn test_update_and_remove(pool: PgPool) {
        let store = PgPasseadorStore::new(pool);
        let created = store.create(fields("ana@x.com")).await.unwrap();

        let mut changed = fields("ana@y.com");
        changed.availability = "weekdays".to_string();
        let updated = store.update(created.id, changed).await.unwrap().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.email, "ana@y.com");
        assert_eq!(updated.availability, "weekdays");

        let removed = store.remove(created.id).await.unwrap();
        assert_eq!(removed.map(|p| p.id), Some(created.id));
        assert!(store.find_by_id(created.id).await.unwrap().is_none());
        assert!(store.remove(created.id).await.unwrap().is_none());
    }
}
