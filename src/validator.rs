//! JSON body extractor that validates before the handler runs.
//!
//! Any failure, whether the body does not deserialize or a `validator` rule
//! fails, is rejected with a 400 so the handler (and therefore the store and
//! the hashing pool) is never reached.
//!
//! DTOs built from [`TextField`](passeador_models::TextField) absorb missing
//! and mistyped fields themselves, so their reports cover every field. For
//! plainly typed bodies the first missing field is reported here.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use passeador_core::{AppError, FieldErrors};
use passeador_models::text::REQUIRED_MESSAGE;

fn missing_field(error_msg: &str) -> Option<&str> {
    error_msg
        .split("missing field `")
        .nth(1)
        .and_then(|s| s.split('`').next())
}

fn map_rejection(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(anyhow!(
            "Missing 'Content-Type: application/json' header"
        ));
    }

    let error_msg = rejection.body_text();

    if let Some(field) = missing_field(&error_msg) {
        let mut fields = FieldErrors::new();
        fields.insert(field.to_string(), vec![REQUIRED_MESSAGE.to_string()]);
        return AppError::validation(fields);
    }

    if error_msg.contains("invalid type") {
        return AppError::bad_request(anyhow!("Invalid field type in request"));
    }

    AppError::bad_request(anyhow!("Invalid request body"))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(map_rejection)?;

        value
            .validate()
            .map_err(|errors| AppError::validation_failed(&errors))?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{self, StatusCode};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Nome é obrigatório"))]
        nome: String,
        #[validate(range(min = 1))]
        idade: u32,
    }

    async fn extract(content_type: Option<&str>, body: &str) -> Result<Sample, AppError> {
        let mut builder = http::Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();

        ValidatedJson::<Sample>::from_request(request, &())
            .await
            .map(|ValidatedJson(sample)| sample)
    }

    #[test]
    fn test_missing_field_name_is_parsed() {
        assert_eq!(
            missing_field("Failed to deserialize: missing field `senha` at line 1 column 2"),
            Some("senha")
        );
        assert_eq!(missing_field("expected value"), None);
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let sample = extract(Some("application/json"), r#"{"nome":"Ana","idade":3}"#)
            .await
            .unwrap();
        assert_eq!(sample.nome, "Ana");
        assert_eq!(sample.idade, 3);
    }

    #[tokio::test]
    async fn test_rule_violation_is_field_keyed_400() {
        let err = extract(Some("application/json"), r#"{"nome":"","idade":0}"#)
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        let fields = err.fields.unwrap();
        assert_eq!(fields["nome"], vec!["Nome é obrigatório".to_string()]);
        assert_eq!(fields["idade"], vec!["idade is invalid".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_field_is_field_keyed_400() {
        let err = extract(Some("application/json"), r#"{"idade":3}"#)
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            err.fields.unwrap()["nome"],
            vec![REQUIRED_MESSAGE.to_string()]
        );
    }

    #[tokio::test]
    async fn test_wrong_type_is_400() {
        let err = extract(Some("application/json"), r#"{"nome":"Ana","idade":"three"}"#)
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.fields.is_none());
        assert_eq!(err.error.to_string(), "Invalid field type in request");
    }

    #[tokio::test]
    async fn test_missing_content_type_is_400() {
        let err = extract(None, r#"{"nome":"Ana","idade":3}"#)
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            err.error.to_string(),
            "Missing 'Content-Type: application/json' header"
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let err = extract(Some("application/json"), "{not json")
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error.to_string(), "Invalid request body");
    }
}
