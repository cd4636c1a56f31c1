//! Configuration management

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 4001;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default database URL for local development.
pub const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/hamlet";

/// Default maximum database connections in the pool.
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

/// Default minimum database connections in the pool.
pub const DEFAULT_DATABASE_MIN_CONNECTIONS: u32 = 2;

/// Default database connection timeout in seconds.
pub const DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default database idle timeout in seconds (10 minutes).
pub const DEFAULT_DATABASE_IDLE_TIMEOUT_SECS: u64 = 600;

/// CORS origins always allowed in development.
pub const DEVELOPMENT_CORS_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:3001"];

/// Default rate limit window in milliseconds (15 minutes).
pub const DEFAULT_RATE_LIMIT_WINDOW_MS: u64 = 15 * 60 * 1000;

/// Default number of requests allowed per client in one window.
pub const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 100;

/// Deployment environment, from `APP_ENV`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(anyhow::anyhow!("Invalid APP_ENV: {}", other)),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub rate_limit: RateLimitConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
    /// Mirror unknown origins instead of rejecting them
    pub allow_unlisted: bool,
}

/// Rate limiting configuration for the `/api` routes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub window_ms: u64,
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_ms: DEFAULT_RATE_LIMIT_WINDOW_MS,
            max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Build configuration from the current process environment
    pub fn from_env() -> anyhow::Result<Self> {
        let environment = match std::env::var("APP_ENV") {
            Ok(value) => value.parse()?,
            Err(_) => Environment::default(),
        };

        let mut allowed_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if !environment.is_production() {
            for origin in DEVELOPMENT_CORS_ORIGINS {
                if !allowed_origins.iter().any(|o| o == origin) {
                    allowed_origins.push(origin.to_string());
                }
            }
        }

        let config = Config {
            environment,
            server: ServerConfig {
                host: std::env::var("HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                port: env_or("PORT", DEFAULT_SERVER_PORT),
                shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT", DEFAULT_SHUTDOWN_TIMEOUT_SECS),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
                max_connections: env_or(
                    "DATABASE_MAX_CONNECTIONS",
                    DEFAULT_DATABASE_MAX_CONNECTIONS,
                ),
                min_connections: env_or(
                    "DATABASE_MIN_CONNECTIONS",
                    DEFAULT_DATABASE_MIN_CONNECTIONS,
                ),
                connect_timeout_secs: env_or(
                    "DATABASE_CONNECT_TIMEOUT",
                    DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
                ),
                idle_timeout_secs: env_or(
                    "DATABASE_IDLE_TIMEOUT",
                    DEFAULT_DATABASE_IDLE_TIMEOUT_SECS,
                ),
            },
            cors: CorsConfig {
                allowed_origins,
                allow_credentials: env_or("CORS_ALLOW_CREDENTIALS", true),
                allow_unlisted: !environment.is_production(),
            },
            rate_limit: RateLimitConfig {
                enabled: env_or("RATE_LIMIT_ENABLED", true),
                window_ms: env_or("RATE_LIMIT_WINDOW_MS", DEFAULT_RATE_LIMIT_WINDOW_MS),
                max_requests: env_or("RATE_LIMIT_MAX_REQUESTS", DEFAULT_RATE_LIMIT_MAX_REQUESTS),
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        // Validate port
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        // Validate database URL
        if self.database.url.is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        // Validate connection pool settings
        if self.database.max_connections == 0 {
            anyhow::bail!("Database max_connections must be greater than 0");
        }

        if self.database.min_connections > self.database.max_connections {
            anyhow::bail!(
                "Database min_connections ({}) cannot be greater than max_connections ({})",
                self.database.min_connections,
                self.database.max_connections
            );
        }

        if self.rate_limit.enabled {
            if self.rate_limit.max_requests == 0 {
                anyhow::bail!("RATE_LIMIT_MAX_REQUESTS must be greater than 0");
            }
            if self.rate_limit.window_ms < u64::from(self.rate_limit.max_requests) {
                anyhow::bail!(
                    "RATE_LIMIT_WINDOW_MS ({}) must be at least RATE_LIMIT_MAX_REQUESTS ({})",
                    self.rate_limit.window_ms,
                    self.rate_limit.max_requests
                );
            }
        }

        // Validate CORS origins
        if self.cors.allowed_origins.is_empty() && self.environment.is_production() {
            tracing::warn!("No CORS origins configured - all cross-origin requests will be rejected");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            },
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
                min_connections: DEFAULT_DATABASE_MIN_CONNECTIONS,
                connect_timeout_secs: DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
                idle_timeout_secs: DEFAULT_DATABASE_IDLE_TIMEOUT_SECS,
            },
            cors: CorsConfig {
                allowed_origins: DEVELOPMENT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
                allow_credentials: true,
                allow_unlisted: true,
            },
            rate_limit: RateLimitConfig::default(),
        }
    }
}
