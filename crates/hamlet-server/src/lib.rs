//! Hamlet Server Library
//!
//! HTTP API and import tooling for Iraqi election candidate data.
//!
//! # Overview
//!
//! - **API Endpoints**: read-only REST API over candidates, governorates and parties
//! - **Database Management**: PostgreSQL integration with SQLx
//! - **Import Pipeline**: CSV/JSON candidate files normalized and loaded in batches
//! - **Configuration**: Environment-based configuration management
//! - **Middleware**: CORS, request logging, and rate limiting
//!
//! # Architecture
//!
//! HTTP features are vertical slices under [`features`]. Each read operation
//! lives in its own `queries/<name>.rs` file exposing a `handle(pool, query)`
//! function with a dedicated error enum; `routes.rs` maps those errors onto
//! [`AppError`], which renders every failure as a JSON error body.
//!
//! The [`ingest`] module is independent of HTTP. It reads raw records,
//! normalizes them, resolves parties and governorates through a
//! [`ingest::CandidateStore`] and reports per-row outcomes.
//!
//! # Example
//!
//! ```no_run
//! use hamlet_server::{api, config::Config, db};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = db::create_pool(&config.database).await?;
//!     let state = api::AppState::new(pool);
//!     api::serve(&config, state, std::future::pending()).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod features;
pub mod ingest;
pub mod middleware;
pub mod models;

// Re-export commonly used types
pub use error::AppError;
