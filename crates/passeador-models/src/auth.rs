use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::passeador::{validate_email, validate_senha};
use crate::text::TextField;

/// Body of the login request. A successful login answers with the signed
/// token as a bare JSON string.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[schema(value_type = String)]
    #[validate(custom(function = "validate_email"))]
    pub email: TextField,
    #[schema(value_type = String)]
    #[validate(custom(function = "validate_senha"))]
    pub senha: TextField,
}
