use anyhow::{Context, Result};
use shared::{
    config::{Config, ConnectionManager, ConnectionPool, StorageBackend},
    utils::{Telemetry, init_logger},
};
use storefront::{
    di::RepositoryDeps,
    handler::AppRouter,
    repository::MemoryStore,
    state::AppState,
};
use tracing::{error, info, warn};

const SERVICE_NAME: &str = "storefront";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = match config.otel_endpoint.as_deref() {
        Some(endpoint) => Some(
            Telemetry::init(SERVICE_NAME, endpoint).context("Failed to initialize telemetry")?,
        ),
        None => None,
    };

    init_logger(
        telemetry.as_ref().map(Telemetry::logger_provider),
        SERVICE_NAME,
        config.dev_mode,
        config.enable_file_log,
    );

    info!("🚀 Starting storefront on {} storage", config.storage);
    if telemetry.is_none() {
        info!("OTEL_ENDPOINT not set, telemetry export disabled");
    }

    let repos = build_repositories(&config).await?;
    let state = AppState::new(repos, config.ledger_timeout);

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("🛑 Shutting down storefront...");

    if let Some(telemetry) = telemetry {
        if let Err(e) = telemetry.shutdown() {
            error!("Failed to shutdown telemetry: {e}");
        }
    }

    Ok(())
}

async fn build_repositories(config: &Config) -> Result<RepositoryDeps> {
    match config.storage {
        StorageBackend::Memory => {
            warn!("⚠️ Using in-memory storage, data is lost on exit");
            Ok(RepositoryDeps::memory(MemoryStore::new()))
        }
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for postgres storage")?;

            let pool =
                ConnectionManager::new_pool(database_url, config.db_min_conn, config.db_max_conn)
                    .await
                    .context("Failed to initialize database pool")?;

            if config.run_migrations {
                run_migrations(&pool)
                    .await
                    .context("Failed to run database migrations")?;
                info!("✅ Database migrations applied");
            }

            Ok(RepositoryDeps::postgres(pool))
        }
    }
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
