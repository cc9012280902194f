use std::env;

use bcrypt::DEFAULT_COST;

use crate::parse_or;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

#[derive(Clone, Debug)]
pub struct PasswordConfig {
    /// bcrypt work factor, clamped to 4..=31
    pub cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordConfig {
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    pub fn from_source<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            cost: parse_or(&get, "BCRYPT_COST", DEFAULT_COST).clamp(MIN_COST, MAX_COST),
        }
    }
}
