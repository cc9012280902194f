//! # Passeador Auth
//!
//! Token claims and JWT utilities for the Passeador API.
//!
//! - [`claims`]: The claim set carried by login tokens
//! - [`jwt`]: Token issuance and verification
//!
//! Tokens are HS256-signed with the secret from [`JwtConfig`] and bind the
//! passeador's id as the `id` claim. They carry no `exp` claim unless an
//! expiry is configured.
//!
//! # Example
//!
//! ```ignore
//! use passeador_auth::{issue_token, verify_token};
//! use passeador_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = issue_token(passeador_id, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.id, passeador_id);
//! ```
//!
//! [`JwtConfig`]: passeador_config::JwtConfig

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::TokenClaims;
pub use jwt::{issue_token, verify_token};
