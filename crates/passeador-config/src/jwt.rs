use std::env;

use crate::parse_or;

/// Token signing settings.
///
/// `secret` falls back to an empty string when `SECRET` is unset, matching
/// the behaviour clients of the old service relied on. `token_expiry` is in
/// seconds; `None` issues tokens without an `exp` claim.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub token_expiry: Option<i64>,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    pub fn from_source<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let token_expiry = parse_or(&get, "JWT_EXPIRY", 0_i64);

        Self {
            secret: get("SECRET").unwrap_or_default(),
            token_expiry: (token_expiry > 0).then_some(token_expiry),
        }
    }
}
