//! Feature modules implementing the Hamlet API
//!
//! Each feature is a vertical slice with its own queries and routes.
//!
//! # Features
//!
//! - **candidates**: candidate listing, detail, statistics and trending
//! - **civic**: governorates and parties
//! - **auth**: login/registration stubs
//! - **social**: posts/events/debates stubs
//!
//! # Architecture
//!
//! Each feature module follows the structure:
//! - `queries/` - Read operations, one `handle(pool, query)` per file
//! - `routes.rs` - HTTP route definitions and error conversions

pub mod auth;
pub mod candidates;
pub mod civic;
pub mod shared;
pub mod social;

use axum::Router;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// PostgreSQL connection pool for database operations
    pub db: sqlx::PgPool,
}

/// Creates the API router with all feature routes mounted
///
/// Each feature is mounted under its own path prefix:
/// - `/candidates` - Candidate data
/// - `/civic` - Governorates and parties
/// - `/auth` - Authentication stubs
/// - `/social` - Social feature stubs
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .nest("/candidates", candidates::candidates_routes().with_state(state.db.clone()))
        .nest("/civic", civic::civic_routes().with_state(state.db))
        .nest("/auth", auth::auth_routes())
        .nest("/social", social::social_routes())
}
