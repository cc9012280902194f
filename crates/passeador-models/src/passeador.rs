//! Passeador (dog-walker) account entity and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::text::{TextField, check_text, is_email, min_chars, not_empty};

/// A stored passeador account.
///
/// `password` always holds a bcrypt hash. It is serialized as `senha` so
/// API responses expose the hash, never the submitted secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Passeador {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
    #[serde(rename = "disponibilidade")]
    pub availability: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Body of the create and update requests.
///
/// Field names are the API's. Every field is a [`TextField`] so that one
/// validation pass reports all of them, whether empty, absent or mistyped.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct PasseadorDto {
    #[schema(value_type = String)]
    #[validate(custom(function = "validate_nome"))]
    pub nome: TextField,
    #[schema(value_type = String)]
    #[validate(custom(function = "validate_email"))]
    pub email: TextField,
    #[schema(value_type = String)]
    #[validate(custom(function = "validate_senha"))]
    pub senha: TextField,
    #[schema(value_type = String)]
    #[validate(custom(function = "validate_disponibilidade"))]
    pub disponibilidade: TextField,
}

pub const PASSWORD_MIN_CHARS: usize = 6;
pub const PASSWORD_TOO_SHORT_MESSAGE: &str = "A senha deve ter pelo menos 6 caracteres";
pub const INVALID_EMAIL_MESSAGE: &str = "Email inválido";

fn validate_nome(value: &TextField) -> Result<(), ValidationError> {
    check_text(value, not_empty, "length", "Nome é obrigatório")
}

pub(crate) fn validate_email(value: &TextField) -> Result<(), ValidationError> {
    check_text(value, is_email, "email", INVALID_EMAIL_MESSAGE)
}

pub(crate) fn validate_senha(value: &TextField) -> Result<(), ValidationError> {
    check_text(
        value,
        min_chars(PASSWORD_MIN_CHARS),
        "length",
        PASSWORD_TOO_SHORT_MESSAGE,
    )
}

fn validate_disponibilidade(value: &TextField) -> Result<(), ValidationError> {
    check_text(value, not_empty, "length", "Disponibilidade é obrigatória")
}

/// Validated values handed to the store. `password_hash` is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasseadorFields {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub availability: String,
}

impl PasseadorFields {
    /// Pairs a validated DTO with the hash of its password.
    pub fn from_dto(dto: PasseadorDto, password_hash: String) -> Self {
        Self {
            name: dto.nome.into_string(),
            email: dto.email.into_string(),
            password_hash,
            availability: dto.disponibilidade.into_string(),
        }
    }
}
