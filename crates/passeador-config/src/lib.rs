//! # Passeador Config
//!
//! Configuration types for the Passeador API.
//!
//! Each structure is loaded once from environment variables at startup and
//! then passed explicitly to whatever needs it:
//!
//! - [`jwt`]: Token signing secret and optional expiry
//! - [`password`]: bcrypt cost
//! - [`cors`]: Allowed origins
//! - [`database`]: Storage backend selection and Postgres pool settings
//! - [`server`]: Listener addresses
//!
//! # Example
//!
//! ```ignore
//! use passeador_config::{CorsConfig, DatabaseConfig, JwtConfig, PasswordConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let password_config = PasswordConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let database_config = DatabaseConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod password;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::{DatabaseConfig, StorageBackend};
pub use jwt::JwtConfig;
pub use password::PasswordConfig;
pub use server::ServerConfig;

/// Parses an environment value, falling back to `default` when it is
/// missing or does not parse.
pub(crate) fn parse_or<T, F>(get: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    get(key).and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

/// Reads a boolean flag; anything other than `false`/`0` counts as true.
pub(crate) fn flag_or<F>(get: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|v| {
            let v = v.trim().to_lowercase();
            v != "false" && v != "0"
        })
        .unwrap_or(default)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;

    pub fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }
}
