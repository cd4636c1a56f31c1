//! Common test utilities for Hamlet server integration tests
//!
//! Database tests start a throwaway PostgreSQL container with the migrations
//! applied. They need Docker and are marked `#[ignore]`:
//!
//! ```bash
//! cargo test -p hamlet-server -- --ignored
//! ```

#![allow(dead_code)]

use anyhow::{Context, Result};
use hamlet_server::config::{Config, DatabaseConfig, RateLimitConfig};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use testcontainers::{core::IntoContainerPort, runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tracing::info;

/// PostgreSQL container with migrations applied
pub struct TestPostgres {
    _container: ContainerAsync<Postgres>,
    pool: PgPool,
}

impl TestPostgres {
    pub async fn start() -> Result<Self> {
        info!("Starting PostgreSQL test container...");

        let container = Postgres::default()
            .with_tag("16-alpine")
            .start()
            .await
            .context("Failed to start PostgreSQL container")?;

        let host = container
            .get_host()
            .await
            .context("Failed to get container host")?;
        let port = container
            .get_host_port_ipv4(5432.tcp())
            .await
            .context("Failed to get container port")?;

        let url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&url)
            .await
            .context("Failed to connect to PostgreSQL")?;

        hamlet_server::db::run_migrations(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            _container: container,
            pool,
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Config pointing at a port nothing listens on; queries fail fast
pub fn offline_config() -> Config {
    Config {
        database: DatabaseConfig {
            url: "postgresql://postgres@127.0.0.1:1/hamlet".to_string(),
            max_connections: 1,
            min_connections: 0,
            connect_timeout_secs: 1,
            idle_timeout_secs: 60,
        },
        rate_limit: RateLimitConfig {
            enabled: false,
            ..RateLimitConfig::default()
        },
        ..Config::default()
    }
}

/// Lazily connected pool that never reaches a server
pub fn offline_pool() -> PgPool {
    hamlet_server::db::create_lazy_pool(&offline_config().database)
        .expect("lazy pool should build from a valid URL")
}

pub fn init_test_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let _ = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("info,hamlet_server=debug,sqlx=warn,testcontainers=info")
        }))
        .with_test_writer()
        .try_init();
}
