//! The persistence port for passeador accounts.

use std::sync::Arc;

use async_trait::async_trait;
use passeador_core::AppError;
use passeador_models::{Passeador, PasseadorFields};
use uuid::Uuid;

/// Cause logged when an insert or update reuses a registered email.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "unique constraint violated: email already registered";

/// The store shared through application state.
pub type SharedStore = Arc<dyn PasseadorStore>;

/// Storage of passeador records.
///
/// Implementations assign ids and timestamps, and enforce email
/// uniqueness. A violation is a backend failure like any other and maps to
/// a 500 (see [`duplicate_email`]). Lookups that miss return `Ok(None)`.
#[async_trait]
pub trait PasseadorStore: Send + Sync + std::fmt::Debug {
    /// All records, oldest first.
    async fn list(&self) -> Result<Vec<Passeador>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Passeador>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Passeador>, AppError>;

    async fn create(&self, fields: PasseadorFields) -> Result<Passeador, AppError>;

    /// Replaces every mutable field. `Ok(None)` when `id` does not exist.
    async fn update(
        &self,
        id: Uuid,
        fields: PasseadorFields,
    ) -> Result<Option<Passeador>, AppError>;

    /// Deletes and returns the record. `Ok(None)` when `id` does not exist.
    async fn remove(&self, id: Uuid) -> Result<Option<Passeador>, AppError>;

    /// Deletes every record, returning how many were removed.
    async fn remove_all(&self) -> Result<u64, AppError>;
}

/// The error for a unique-email violation. Clients see the generic 500
/// body; the cause is only logged.
pub fn duplicate_email() -> AppError {
    AppError::database(anyhow::anyhow!(DUPLICATE_EMAIL_MESSAGE))
}
