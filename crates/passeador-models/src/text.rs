//! String body fields that remember how they arrived.
//!
//! Request DTOs declare their fields as [`TextField`] with `#[serde(default)]`,
//! so a body that is absent a field, or carries a number where a string is
//! expected, still deserializes. Validation then reports every field in a
//! single pass instead of stopping at the first shape error.

use std::borrow::Cow;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{ValidateEmail, ValidationError};

pub const REQUIRED_MESSAGE: &str = "Campo obrigatório";
pub const WRONG_TYPE_MESSAGE: &str = "Deve ser um texto";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum TextField {
    /// Absent or `null`
    #[default]
    Missing,
    Text(String),
    /// Present but not a JSON string
    WrongType,
}

impl TextField {
    /// The string value, or `""` when the field is not a string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(value) => value,
            _ => "",
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Self::Text(value) => value,
            _ => String::new(),
        }
    }
}

impl From<&str> for TextField {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TextField {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for TextField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<RawText>::deserialize(deserializer)? {
            None => Self::Missing,
            Some(RawText::Text(value)) => Self::Text(value),
            Some(RawText::Other(_)) => Self::WrongType,
        })
    }
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Applies `rule` to a string value. Missing and mistyped values fail
/// with their own messages before `rule` is consulted.
pub fn check_text<F>(
    field: &TextField,
    rule: F,
    code: &'static str,
    message: &'static str,
) -> Result<(), ValidationError>
where
    F: Fn(&str) -> bool,
{
    match field {
        TextField::Missing => Err(error("required", REQUIRED_MESSAGE)),
        TextField::WrongType => Err(error("type", WRONG_TYPE_MESSAGE)),
        TextField::Text(value) if rule(value) => Ok(()),
        TextField::Text(_) => Err(error(code, message)),
    }
}

pub fn not_empty(value: &str) -> bool {
    !value.is_empty()
}

pub fn min_chars(min: usize) -> impl Fn(&str) -> bool {
    move |value: &str| value.chars().count() >= min
}

pub fn is_email(value: &str) -> bool {
    value.validate_email()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        nome: TextField,
    }

    fn parse(value: serde_json::Value) -> TextField {
        serde_json::from_value::<Body>(value).unwrap().nome
    }

    #[test]
    fn test_deserializes_every_shape() {
        assert_eq!(parse(json!({ "nome": "Ana" })), TextField::from("Ana"));
        assert_eq!(parse(json!({})), TextField::Missing);
        assert_eq!(parse(json!({ "nome": null })), TextField::Missing);
        assert_eq!(parse(json!({ "nome": 5 })), TextField::WrongType);
        assert_eq!(parse(json!({ "nome": ["Ana"] })), TextField::WrongType);
    }

    #[test]
    fn test_check_text_messages() {
        let missing = check_text(&TextField::Missing, not_empty, "length", "x").unwrap_err();
        assert_eq!(missing.message.as_deref(), Some(REQUIRED_MESSAGE));

        let mistyped = check_text(&TextField::WrongType, not_empty, "length", "x").unwrap_err();
        assert_eq!(mistyped.message.as_deref(), Some(WRONG_TYPE_MESSAGE));

        let empty = check_text(&TextField::from(""), not_empty, "length", "vazio").unwrap_err();
        assert_eq!(empty.message.as_deref(), Some("vazio"));

        assert!(check_text(&TextField::from("Ana"), not_empty, "length", "x").is_ok());
    }

    #[test]
    fn test_rules() {
        assert!(min_chars(6)("secret"));
        assert!(!min_chars(6)("12345"));
        assert!(min_chars(6)("senhaç"));
        assert!(is_email("ana@x.com"));
        assert!(!is_email("ana.x.com"));
    }
}
