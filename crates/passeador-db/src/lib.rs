//! # Passeador DB
//!
//! Persistence for the Passeador API.
//!
//! The rest of the application only sees the [`PasseadorStore`] trait. Two
//! backends implement it:
//!
//! - [`PgPasseadorStore`]: PostgreSQL through an SQLx pool
//! - [`InMemoryPasseadorStore`]: a process-local store for development and tests
//!
//! # Example
//!
//! ```ignore
//! use passeador_config::DatabaseConfig;
//! use passeador_db::init_store;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = init_store(&DatabaseConfig::from_env()).await?;
//!     let all = store.list().await?;
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use anyhow::Context;
use passeador_config::{DatabaseConfig, StorageBackend};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::InMemoryPasseadorStore;
pub use postgres::PgPasseadorStore;
pub use store::{DUPLICATE_EMAIL_MESSAGE, PasseadorStore, SharedStore, duplicate_email};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Opens a PostgreSQL connection pool.
///
/// # Errors
///
/// Fails if `DATABASE_URL` is not configured or the connection cannot be
/// established.
pub async fn init_db_pool(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let database_url = config
        .url
        .as_deref()
        .context("DATABASE_URL must be set when STORAGE_BACKEND=postgres")?;

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Builds the store selected by `config.backend`.
pub async fn init_store(config: &DatabaseConfig) -> anyhow::Result<SharedStore> {
    match config.backend {
        StorageBackend::Postgres => {
            let pool = init_db_pool(config).await?;
            info!(
                max_connections = config.max_connections,
                "Using PostgreSQL passeador store"
            );
            Ok(Arc::new(PgPasseadorStore::new(pool)))
        }
        StorageBackend::Memory => {
            info!("Using in-memory passeador store");
            Ok(Arc::new(InMemoryPasseadorStore::new()))
        }
    }
}
