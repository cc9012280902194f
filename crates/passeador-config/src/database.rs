use std::env;

use crate::{flag_or, parse_or};

/// Where passeador records live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl StorageBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            "memory" | "in-memory" | "mem" => Some(Self::Memory),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    /// Required when `backend` is Postgres
    pub url: Option<String>,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    pub fn from_source<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            backend: get("STORAGE_BACKEND")
                .and_then(|v| StorageBackend::parse(&v))
                .unwrap_or(StorageBackend::Postgres),
            url: get("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", 5),
            run_migrations: flag_or(&get, "RUN_MIGRATIONS", true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::vars;

    #[test]
    fn test_defaults() {
        let config = DatabaseConfig::from_source(vars(&[]));
        assert_eq!(config.backend, StorageBackend::Postgres);
        assert_eq!(config.url, None);
        assert_eq!(config.max_connections, 5);
        assert!(config.run_migrations);
    }

    #[test]
    fn test_memory_backend() {
        let config = DatabaseConfig::from_source(vars(&[
            ("STORAGE_BACKEND", "Memory"),
            ("RUN_MIGRATIONS", "false"),
        ]));
        assert_eq!(config.backend, StorageBackend::Memory);
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_unknown_backend_falls_back_to_postgres() {
        let config = DatabaseConfig::from_source(vars(&[
            ("STORAGE_BACKEND", "mongo"),
            ("DATABASE_URL", "postgres://localhost/passeador"),
        ]));
        assert_eq!(config.backend, StorageBackend::Postgres);
        assert_eq!(config.url.as_deref(), Some("postgres://localhost/passeador"));
    }
}
