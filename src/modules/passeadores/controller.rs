use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use passeador_core::{AppError, ErrorResponse};
use passeador_models::{LoginRequest, Passeador, PasseadorDto};

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::PasseadorService;

fn parse_id(id: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, AppError> {
    let Path(id) = id
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid passeador id: {}", e)))?;
    Ok(id)
}

#[utoipa::path(
    get,
    path = "/api/passeadores",
    responses(
        (status = 200, description = "All passeadores", body = Vec<Passeador>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Passeadores"
)]
#[instrument(skip_all)]
pub async fn list_passeadores(
    State(state): State<AppState>,
) -> Result<Json<Vec<Passeador>>, AppError> {
    let passeadores = PasseadorService::list_passeadores(state.store.as_ref()).await?;
    Ok(Json(passeadores))
}

#[utoipa::path(
    get,
    path = "/api/passeadores/{id}",
    params(
        ("id" = Uuid, Path, description = "Passeador ID")
    ),
    responses(
        (status = 200, description = "The passeador, or null when the id is unknown", body = Option<Passeador>),
        (status = 400, description = "Malformed id", body = ErrorResponse)
    ),
    tag = "Passeadores"
)]
#[instrument(skip_all)]
pub async fn get_passeador(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Option<Passeador>>, AppError> {
    let id = parse_id(id)?;
    let passeador = PasseadorService::get_passeador(state.store.as_ref(), id).await?;
    Ok(Json(passeador))
}

#[utoipa::path(
    post,
    path = "/api/passeadores",
    request_body = PasseadorDto,
    responses(
        (status = 201, description = "Passeador created", body = Passeador),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Store failure, including a duplicate email", body = ErrorResponse)
    ),
    tag = "Passeadores"
)]
#[instrument(skip_all)]
pub async fn create_passeador(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<PasseadorDto>,
) -> Result<(StatusCode, Json<Passeador>), AppError> {
    let passeador =
        PasseadorService::create_passeador(state.store.as_ref(), dto, &state.password_config)
            .await?;
    Ok((StatusCode::CREATED, Json(passeador)))
}

/// Full replacement. Served on both PUT and PATCH.
#[utoipa::path(
    put,
    path = "/api/passeadores/{id}",
    params(
        ("id" = Uuid, Path, description = "Passeador ID")
    ),
    request_body = PasseadorDto,
    responses(
        (status = 201, description = "The updated passeador, or null when the id is unknown", body = Option<Passeador>),
        (status = 400, description = "Validation failed or malformed id", body = ErrorResponse),
        (status = 500, description = "Store failure, including a duplicate email", body = ErrorResponse)
    ),
    tag = "Passeadores"
)]
#[instrument(skip_all)]
pub async fn update_passeador(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    ValidatedJson(dto): ValidatedJson<PasseadorDto>,
) -> Result<(StatusCode, Json<Option<Passeador>>), AppError> {
    let id = parse_id(id)?;
    let updated =
        PasseadorService::update_passeador(state.store.as_ref(), id, dto, &state.password_config)
            .await?;
    Ok((StatusCode::CREATED, Json(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/passeadores/{id}",
    params(
        ("id" = Uuid, Path, description = "Passeador ID")
    ),
    responses(
        (status = 200, description = "The removed passeador, or null when the id is unknown", body = Option<Passeador>),
        (status = 400, description = "Malformed id", body = ErrorResponse)
    ),
    tag = "Passeadores"
)]
#[instrument(skip_all)]
pub async fn delete_passeador(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Option<Passeador>>, AppError> {
    let id = parse_id(id)?;
    let removed = PasseadorService::remove_passeador(state.store.as_ref(), id).await?;
    Ok(Json(removed))
}

#[utoipa::path(
    post,
    path = "/api/passeadores/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "The signed token as a bare JSON string", body = String),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Wrong password", body = ErrorResponse),
        (status = 404, description = "Email not registered", body = ErrorResponse)
    ),
    tag = "Passeadores"
)]
#[instrument(skip_all)]
pub async fn login_passeador(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<String>, AppError> {
    let token =
        PasseadorService::login_passeador(state.store.as_ref(), dto, &state.jwt_config).await?;
    Ok(Json(token))
}
