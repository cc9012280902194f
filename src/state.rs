use std::sync::Arc;

use passeador_config::{CorsConfig, DatabaseConfig, JwtConfig, PasswordConfig};
use passeador_db::{InMemoryPasseadorStore, SharedStore, init_store};

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: SharedStore,
    pub jwt_config: JwtConfig,
    pub password_config: PasswordConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    /// State over a fresh in-memory store.
    pub fn in_memory(
        jwt_config: JwtConfig,
        password_config: PasswordConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            store: Arc::new(InMemoryPasseadorStore::new()),
            jwt_config,
            password_config,
            cors_config,
        }
    }
}

/// Loads every config from the environment and opens the configured store.
pub async fn init_app_state(database_config: &DatabaseConfig) -> anyhow::Result<AppState> {
    Ok(AppState {
        store: init_store(database_config).await?,
        jwt_config: JwtConfig::from_env(),
        password_config: PasswordConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    })
}
