use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use api_service::http::{self, AppState};
use api_service::repository::{AchievementRepository, ScoreRepository, SessionRepository};
use api_service::service::{AchievementService, ScoreService, SessionService};
use shared::{DatabaseConfig, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    shared::init_tracing("api-service")?;

    let service_config = ServiceConfig::from_env(8000)?;
    let database_config = DatabaseConfig::from_env()?;

    shared::init_metrics(service_config.metrics_port)?;

    tracing::info!("API Service starting...");
    tracing::info!(
        port = service_config.port,
        metrics_port = service_config.metrics_port,
        max_connections = database_config.max_connections,
        run_migrations = service_config.run_migrations,
        cors_allowed_origin = service_config.cors_allowed_origin.as_deref().unwrap_or("*"),
        "Configuration loaded"
    );

    tracing::info!("Connecting to PostgreSQL...");
    let db_pool = PgPoolOptions::new()
        .max_connections(database_config.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(&database_config.url)
        .await?;
    tracing::info!("Connected to PostgreSQL successfully");

    if service_config.run_migrations {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("../migrations").run(&db_pool).await?;
        tracing::info!("Migrations completed");
    } else {
        tracing::info!("Skipping migrations (RUN_MIGRATIONS=false)");
    }

    let score_repo = ScoreRepository::new(db_pool.clone());
    let session_repo = SessionRepository::new(db_pool.clone());
    let achievement_repo = AchievementRepository::new(db_pool);

    let achievement_service = Arc::new(AchievementService::new(
        achievement_repo,
        score_repo.clone(),
    ));
    let score_service = Arc::new(ScoreService::new(score_repo, achievement_service.clone()));
    let session_service = Arc::new(SessionService::new(session_repo));

    let state = AppState {
        score_service,
        session_service,
        achievement_service,
    };

    let cors = http::cors_layer(service_config.cors_allowed_origin.as_deref());
    let app = http::router(state, cors);

    let listener =
        tokio::net::TcpListener::bind(format!("0.0.0.0:{}", service_config.port)).await?;
    tracing::info!("API service listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
