use anyhow::Context;
use dotenvy::dotenv;
use passeador::cli::run_migrations;
use passeador::logging::init_tracing;
use passeador::metrics::{init_metrics, metrics_app};
use passeador::router::init_router;
use passeador::state::init_app_state;
use passeador_config::{DatabaseConfig, ServerConfig, StorageBackend};
use passeador_db::init_db_pool;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let server_config = ServerConfig::from_env();
    let database_config = DatabaseConfig::from_env();

    if let Some(handle) = init_metrics().context("Failed to install metrics recorder")? {
        let metrics_addr = server_config.metrics_addr();
        let listener = tokio::net::TcpListener::bind(&metrics_addr)
            .await
            .with_context(|| format!("Failed to bind metrics listener on {}", metrics_addr))?;
        info!(addr = %metrics_addr, "Metrics available at /metrics");
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                error!(error = %e, "Metrics server stopped");
            }
        });
    }

    if database_config.backend == StorageBackend::Postgres && database_config.run_migrations {
        let pool = init_db_pool(&database_config).await?;
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
        info!("Database migrations applied");
    }

    let state = init_app_state(&database_config).await?;
    let app = init_router(state);

    let addr = server_config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(addr = %addr, "🚀 Server running");
    info!("📚 Swagger UI available at http://{}/swagger-ui", addr);
    info!("📖 Scalar UI available at http://{}/scalar", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
