//! JWT issuance and verification for login tokens.
//!
//! The signing secret is never read from the environment here; callers pass
//! the [`JwtConfig`] loaded at startup.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use passeador_config::JwtConfig;
use passeador_core::AppError;

use crate::claims::TokenClaims;

/// Issues a signed token binding `passeador_id` as the `id` claim.
///
/// An `exp` claim is added only when `jwt_config.token_expiry` is set.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn issue_token(passeador_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;

    let claims = TokenClaims {
        id: passeador_id,
        iat: now,
        exp: jwt_config
            .token_expiry
            .map(|expiry| now + expiry as usize),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies a token's signature (and expiry, when present) and returns its
/// claims.
///
/// # Errors
///
/// Returns an unauthorized error if the token is malformed, signed with a
/// different secret, or expired.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<TokenClaims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Tokens issued without an expiry must still verify.
    validation.required_spec_claims.clear();

    decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token".to_string()))
}
