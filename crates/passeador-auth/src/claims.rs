//! Claim set of the login token.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Claims embedded in a login token.
///
/// `id` is the passeador's identifier, so a holder of the token can be
/// identified without a database lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenClaims {
    /// Passeador ID
    pub id: Uuid,
    /// Issued-at (Unix timestamp)
    pub iat: usize,
    /// Expiration (Unix timestamp), absent unless an expiry is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_without_exp_omit_field() {
        let claims = TokenClaims {
            id: Uuid::nil(),
            iat: 1234567800,
            exp: None,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""id":"00000000-0000-0000-0000-000000000000""#));
        assert!(!serialized.contains("exp"));
    }

    #[test]
    fn test_claims_deserialize_without_exp() {
        let json = r#"{"id":"8d5f1c3e-4b6a-4f57-9a42-1f0c7a2b9e11","iat":9999999900}"#;
        let claims: TokenClaims = serde_json::from_str(json).unwrap();
        assert_eq!(
            claims.id.to_string(),
            "8d5f1c3e-4b6a-4f57-9a42-1f0c7a2b9e11"
        );
        assert_eq!(claims.iat, 9999999900);
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn test_claims_with_exp_roundtrip_field() {
        let claims = TokenClaims {
            id: Uuid::new_v4(),
            iat: 100,
            exp: Some(200),
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""exp":200"#));
    }
}
