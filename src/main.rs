//! Almacen Server: inventory backend with role-based access control.
//!
//! Main entry point that loads configuration, picks a persistence backend
//! and starts the HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use almacen_core::config::{AppConfig, DatabaseProvider};
use almacen_core::error::AppError;
use almacen_database::migration::run_migrations;
use almacen_database::{DatabasePool, RepositorySet};

#[tokio::main]
async fn main() {
    let env = std::env::var("ALMACEN_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        environment = %config.environment,
        "Starting Almacen v{}",
        env!("CARGO_PKG_VERSION")
    );

    match config.database.provider {
        DatabaseProvider::Postgres => {
            tracing::info!("Connecting to database...");
            let db = DatabasePool::connect(&config.database).await?;

            tracing::info!("Running database migrations...");
            run_migrations(db.pool()).await?;

            let repos = RepositorySet::postgres(db.pool().clone());
            let result = almacen_api::run_server(config, repos).await;
            db.close().await;
            result
        }
        DatabaseProvider::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on restart");
            almacen_api::run_server(config, RepositorySet::in_memory()).await
        }
    }
}
