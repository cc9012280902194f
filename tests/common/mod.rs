#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use passeador::passeador_config::{CorsConfig, JwtConfig, PasswordConfig};
use passeador::router::init_router;
use passeador::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        token_expiry: None,
    }
}

/// State over an empty in-memory store, hashing at the lowest bcrypt cost.
pub fn test_state() -> AppState {
    AppState::in_memory(
        test_jwt_config(),
        PasswordConfig { cost: 4 },
        CorsConfig {
            allowed_origins: vec!["*".to_string()],
        },
    )
}

pub fn setup_test_app(state: AppState) -> Router {
    init_router(state)
}

pub fn generate_unique_email() -> String {
    format!("passeador_{}@test.com", Uuid::new_v4().simple())
}

pub fn passeador_body(email: &str, senha: &str) -> Value {
    json!({
        "nome": "Ana",
        "email": email,
        "senha": senha,
        "disponibilidade": "weekends"
    })
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

/// Registers an account through the API and returns the response body.
pub async fn create_passeador(app: &Router, email: &str, senha: &str) -> Value {
    let (status, body) = send(
        app,
        json_request("POST", "/api/passeadores", &passeador_body(email, senha)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}
