//! Hamlet Server - Main entry point

use anyhow::Result;
use hamlet_common::logging::{init_logging, LogConfig};
use std::time::Duration;
use tokio::signal;
use tracing::info;

use hamlet_server::{api, config::Config, db, error::set_expose_internal_details};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging with configuration from environment
    let log_config = LogConfig::builder()
        .log_file_prefix("hamlet-server")
        .filter_directives("hamlet_server=debug,tower_http=debug,sqlx=warn")
        .build();

    // Merge with environment variables (they take precedence)
    let log_config = log_config.merge_env()?;

    let _guard = init_logging(&log_config)?;

    info!("Starting Hamlet Server");

    let config = Config::load()?;
    info!(
        environment = ?config.environment,
        "Configuration loaded - server will bind to {}:{}",
        config.server.host,
        config.server.port
    );

    set_expose_internal_details(!config.environment.is_production());

    let pool = db::create_pool(&config.database).await?;
    db::run_migrations(&pool).await?;

    let state = api::AppState::new(pool.clone());
    let result = api::serve(
        &config,
        state,
        shutdown_signal(config.server.shutdown_timeout_secs),
    )
    .await;

    pool.close().await;
    info!("Server shut down gracefully");

    result
}

/// Graceful shutdown signal handler
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }

    info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}
