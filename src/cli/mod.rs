//! Administrative operations behind the `passeador-cli` binary.
//!
//! Everything here goes through [`PasseadorStore`] so the same rules
//! apply as in the HTTP API: accounts created from the command line are
//! validated and hashed exactly like a `POST /api/passeadores`.

use std::time::Instant;

use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use sqlx::PgPool;
use validator::Validate;

use passeador_config::PasswordConfig;
use passeador_core::{AppError, hash_password_with_cost};
use passeador_db::PasseadorStore;
use passeador_models::{Passeador, PasseadorDto, PasseadorFields};

use crate::modules::PasseadorService;

/// Password shared by every seeded account.
pub const SEED_PASSWORD: &str = "password123";

const SEED_AVAILABILITY: [&str; 4] = ["weekdays", "weekends", "mornings", "evenings"];

/// Applies the SQL migrations under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Validates and registers one account.
pub async fn create_passeador(
    store: &dyn PasseadorStore,
    dto: PasseadorDto,
    password_config: &PasswordConfig,
) -> Result<Passeador, AppError> {
    dto.validate()
        .map_err(|errors| AppError::validation_failed(&errors))?;

    PasseadorService::create_passeador(store, dto, password_config).await
}

/// Inserts `count` fake accounts and returns how many were stored.
///
/// All of them share [`SEED_PASSWORD`], hashed once at the lowest bcrypt
/// cost. Emails are prefixed with the row index so they never collide.
pub async fn seed_passeadores(store: &dyn PasseadorStore, count: usize) -> Result<usize, AppError> {
    let start = Instant::now();
    println!("🌱 Seeding {} passeadores...", count);

    let password_hash = hash_password_with_cost(SEED_PASSWORD, 4)?;

    for i in 0..count {
        let email: String = SafeEmail().fake();
        let fields = PasseadorFields {
            name: Name().fake(),
            email: format!("seed{}.{}", i, email),
            password_hash: password_hash.clone(),
            availability: SEED_AVAILABILITY[i % SEED_AVAILABILITY.len()].to_string(),
        };
        store.create(fields).await?;
    }

    println!("   ✓ Inserted {} passeadores in {:?}", count, start.elapsed());
    Ok(count)
}

/// Deletes every account.
pub async fn clear_passeadores(store: &dyn PasseadorStore) -> Result<u64, AppError> {
    let removed = store.remove_all().await?;
    println!("🧹 Removed {} passeadores", removed);
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use passeador_core::verify_password;
    use passeador_db::InMemoryPasseadorStore;

    fn dto(email: &str, password: &str) -> PasseadorDto {
        PasseadorDto {
            nome: "Ana".into(),
            email: email.into(),
            senha: password.into(),
            disponibilidade: "weekends".into(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_without_storing() {
        let store = InMemoryPasseadorStore::new();

        let err = create_passeador(&store, dto("not-an-email", "123"), &PasswordConfig { cost: 4 })
            .await
            .unwrap_err();

        let fields = err.fields.unwrap();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("senha"));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_hashes_password() {
        let store = InMemoryPasseadorStore::new();

        let created = create_passeador(&store, dto("ana@x.com", "secret1"), &PasswordConfig { cost: 4 })
            .await
            .unwrap();

        assert!(verify_password("secret1", &created.password).unwrap());
    }

    #[tokio::test]
    async fn test_seed_then_clear() {
        let store = InMemoryPasseadorStore::new();

        assert_eq!(seed_passeadores(&store, 5).await.unwrap(), 5);

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 5);
        assert!(verify_password(SEED_PASSWORD, &all[0].password).unwrap());

        assert_eq!(clear_passeadores(&store).await.unwrap(), 5);
        assert!(store.list().await.unwrap().is_empty());
    }
}
