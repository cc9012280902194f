//! Process-local [`PasseadorStore`], used for development and tests.
//!
//! Records are kept in insertion order behind a `tokio` read/write lock.
//! Email uniqueness is case-sensitive, matching the Postgres unique index,
//! and a violation fails the write the same way the index does.

use async_trait::async_trait;
use chrono::Utc;
use passeador_core::AppError;
use passeador_models::{Passeador, PasseadorFields};
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::store::{PasseadorStore, duplicate_email};

#[derive(Debug, Default)]
pub struct InMemoryPasseadorStore {
    records: RwLock<Vec<Passeador>>,
}

impl InMemoryPasseadorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(records: &[Passeador], email: &str, except: Option<Uuid>) -> bool {
    records
        .iter()
        .any(|p| p.email == email && Some(p.id) != except)
}

#[async_trait]
impl PasseadorStore for InMemoryPasseadorStore {
    async fn list(&self) -> Result<Vec<Passeador>, AppError> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Passeador>, AppError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Passeador>, AppError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|p| p.email == email).cloned())
    }

    #[instrument(skip(self, input))]
    async fn create(&self, input: PasseadorFields) -> Result<Passeador, AppError> {
        let mut records = self.records.write().await;
        if email_taken(&records, &input.email, None) {
            return Err(duplicate_email());
        }

        let now = Utc::now();
        let passeador = Passeador {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            password: input.password_hash,
            availability: input.availability,
            created_at: now,
            updated_at: now,
        };
        records.push(passeador.clone());

        debug!(passeador.id = %passeador.id, "Passeador stored in memory");
        Ok(passeador)
    }

    #[instrument(skip(self, input), fields(passeador.id = %id))]
    async fn update(
        &self,
        id: Uuid,
        input: PasseadorFields,
    ) -> Result<Option<Passeador>, AppError> {
        let mut records = self.records.write().await;
        let Some(index) = records.iter().position(|p| p.id == id) else {
            return Ok(None);
        };
        if email_taken(&records, &input.email, Some(id)) {
            return Err(duplicate_email());
        }

        let existing = &mut records[index];

        existing.name = input.name;
        existing.email = input.email;
        existing.password = input.password_hash;
        existing.availability = input.availability;
        existing.updated_at = Utc::now();

        Ok(Some(existing.clone()))
    }

    async fn remove(&self, id: Uuid) -> Result<Option<Passeador>, AppError> {
        let mut records = self.records.write().await;
        let removed = records
            .iter()
            .position(|p| p.id == id)
            .map(|index| records.remove(index));
        Ok(removed)
    }

    async fn remove_all(&self) -> Result<u64, AppError> {
        let mut records = self.records.write().await;
        let count = records.len() as u64;
        records.clear();
        Ok(count)
    }
}
