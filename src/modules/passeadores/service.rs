use anyhow::anyhow;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use passeador_auth::issue_token;
use passeador_config::{JwtConfig, PasswordConfig};
use passeador_core::{AppError, hash_password_with_cost, verify_password};
use passeador_db::PasseadorStore;
use passeador_models::{LoginRequest, Passeador, PasseadorDto, PasseadorFields};

use crate::metrics;

pub const EMAIL_NOT_FOUND_MESSAGE: &str = "Email não encontrado!";
pub const INVALID_PASSWORD_MESSAGE: &str = "Senha inválida!";

/// bcrypt is CPU-bound; both helpers run on the blocking pool.
async fn hash_blocking(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password_with_cost(&password, cost)).await?
}

async fn verify_blocking(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await?
}

pub struct PasseadorService;

impl PasseadorService {
    #[instrument(skip(store), fields(db.table = "passeadores"))]
    pub async fn list_passeadores(store: &dyn PasseadorStore) -> Result<Vec<Passeador>, AppError> {
        let passeadores = store.list().await?;
        debug!(count = passeadores.len(), "Passeadores listed");
        Ok(passeadores)
    }

    #[instrument(skip(store), fields(passeador.id = %id))]
    pub async fn get_passeador(
        store: &dyn PasseadorStore,
        id: Uuid,
    ) -> Result<Option<Passeador>, AppError> {
        let passeador = store.find_by_id(id).await?;
        if passeador.is_none() {
            debug!("Passeador not found");
        }
        Ok(passeador)
    }

    #[instrument(skip(store, dto, password_config), fields(passeador.email = %dto.email.as_str()))]
    pub async fn create_passeador(
        store: &dyn PasseadorStore,
        dto: PasseadorDto,
        password_config: &PasswordConfig,
    ) -> Result<Passeador, AppError> {
        let password_hash = hash_blocking(dto.senha.as_str().to_string(), password_config.cost).await?;

        let passeador = store
            .create(PasseadorFields::from_dto(dto, password_hash))
            .await?;

        metrics::track_passeador_created();
        info!(passeador.id = %passeador.id, "Passeador created");

        Ok(passeador)
    }

    /// Replaces every field, re-hashing the submitted password.
    #[instrument(skip(store, dto, password_config), fields(passeador.id = %id, passeador.email = %dto.email.as_str()))]
    pub async fn update_passeador(
        store: &dyn PasseadorStore,
        id: Uuid,
        dto: PasseadorDto,
        password_config: &PasswordConfig,
    ) -> Result<Option<Passeador>, AppError> {
        let password_hash = hash_blocking(dto.senha.as_str().to_string(), password_config.cost).await?;

        let updated = store
            .update(id, PasseadorFields::from_dto(dto, password_hash))
            .await?;

        match &updated {
            Some(_) => {
                metrics::track_passeador_updated();
                info!("Passeador updated");
            }
            None => debug!("Passeador not found for update"),
        }

        Ok(updated)
    }

    #[instrument(skip(store), fields(passeador.id = %id))]
    pub async fn remove_passeador(
        store: &dyn PasseadorStore,
        id: Uuid,
    ) -> Result<Option<Passeador>, AppError> {
        let removed = store.remove(id).await?;

        match &removed {
            Some(_) => {
                metrics::track_passeador_removed();
                info!("Passeador removed");
            }
            None => debug!("Passeador not found for removal"),
        }

        Ok(removed)
    }

    /// Checks credentials and returns a token bound to the account id.
    ///
    /// Stops at the first failure: an unknown email is a 404, a wrong
    /// password a 401. No token is issued in either case.
    #[instrument(skip(store, dto, jwt_config), fields(passeador.email = %dto.email.as_str()))]
    pub async fn login_passeador(
        store: &dyn PasseadorStore,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<String, AppError> {
        let Some(passeador) = store.find_by_email(dto.email.as_str()).await? else {
            warn!("Login attempt with unknown email");
            metrics::track_login_failure("email_not_found");
            return Err(AppError::not_found(anyhow!(EMAIL_NOT_FOUND_MESSAGE)));
        };

        let is_valid = verify_blocking(dto.senha.into_string(), passeador.password).await?;
        if !is_valid {
            warn!(passeador.id = %passeador.id, "Login attempt with invalid password");
            metrics::track_login_failure("invalid_password");
            return Err(AppError::unauthorized(INVALID_PASSWORD_MESSAGE.to_string()));
        }

        let token = issue_token(passeador.id, jwt_config)?;

        metrics::track_login_success();
        metrics::track_jwt_issued();
        info!(passeador.id = %passeador.id, "Passeador logged in");

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use passeador_auth::verify_token;
    use passeador_db::InMemoryPasseadorStore;

    fn password_config() -> PasswordConfig {
        PasswordConfig { cost: 4 }
    }

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "service-test-secret".to_string(),
            token_expiry: None,
        }
    }

    fn dto(email: &str, password: &str) -> PasseadorDto {
        PasseadorDto {
            nome: "Ana".into(),
            email: email.into(),
            senha: password.into(),
            disponibilidade: "weekends".into(),
        }
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.into(),
            senha: password.into(),
        }
    }

    #[tokio::test]
    async fn test_create_stores_hash_not_plaintext() {
        let store = InMemoryPasseadorStore::new();

        let created = PasseadorService::create_passeador(
            &store,
            dto("ana@x.com", "secret1"),
            &password_config(),
        )
        .await
        .unwrap();

        assert_ne!(created.password, "secret1");
        assert!(verify_password("secret1", &created.password).unwrap());

        let stored = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_ne!(stored.password, "secret1");
    }

    #[tokio::test]
    async fn test_update_rehashes_password() {
        let store = InMemoryPasseadorStore::new();
        let created = PasseadorService::create_passeador(
            &store,
            dto("ana@x.com", "secret1"),
            &password_config(),
        )
        .await
        .unwrap();

        let updated = PasseadorService::update_passeador(
            &store,
            created.id,
            dto("ana@x.com", "secret2"),
            &password_config(),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(updated.id, created.id);
        assert_ne!(updated.password, "secret2");
        assert!(verify_password("secret2", &updated.password).unwrap());
        assert!(!verify_password("secret1", &updated.password).unwrap());
    }

    #[tokio::test]
    async fn test_update_and_remove_missing_return_none() {
        let store = InMemoryPasseadorStore::new();
        let id = Uuid::new_v4();

        let updated = PasseadorService::update_passeador(
            &store,
            id,
            dto("ana@x.com", "secret1"),
            &password_config(),
        )
        .await
        .unwrap();
        assert!(updated.is_none());

        assert!(
            PasseadorService::remove_passeador(&store, id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_not_found() {
        let store = InMemoryPasseadorStore::new();

        let err = PasseadorService::login_passeador(&store, login("ghost@x.com", "secret1"), &jwt_config())
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.error.to_string(), EMAIL_NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_unauthorized() {
        let store = InMemoryPasseadorStore::new();
        PasseadorService::create_passeador(&store, dto("ana@x.com", "secret1"), &password_config())
            .await
            .unwrap();

        let err = PasseadorService::login_passeador(&store, login("ana@x.com", "wrong-1"), &jwt_config())
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.error.to_string(), INVALID_PASSWORD_MESSAGE);
    }

    #[tokio::test]
    async fn test_login_success_token_carries_id() {
        let store = InMemoryPasseadorStore::new();
        let created = PasseadorService::create_passeador(
            &store,
            dto("ana@x.com", "secret1"),
            &password_config(),
        )
        .await
        .unwrap();

        let token =
            PasseadorService::login_passeador(&store, login("ana@x.com", "secret1"), &jwt_config())
                .await
                .unwrap();

        assert!(!token.is_empty());
        let claims = verify_token(&token, &jwt_config()).unwrap();
        assert_eq!(claims.id, created.id);
    }
}
