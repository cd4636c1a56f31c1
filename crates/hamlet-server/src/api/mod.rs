pub mod response;

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::time::Instant;
use tower_http::compression::CompressionLayer;

use crate::config::Config;
use crate::db;
use crate::features;
use crate::middleware;
use response::ErrorResponse;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            started_at: Instant::now(),
        }
    }
}

/// Serve the API until `shutdown` resolves
pub async fn serve<F>(config: &Config, state: AppState, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = create_router(state, config)?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

/// Create the application router with all routes and middleware
pub fn create_router(state: AppState, config: &Config) -> anyhow::Result<Router> {
    let api = features::router(features::FeatureState {
        db: state.db.clone(),
    });
    let api = middleware::rate_limit::apply(api, &config.rate_limit)?;

    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state)
        .nest("/api", api)
        .fallback(not_found);

    // Apply layers from innermost to outermost
    let app = middleware::security_headers::apply(app)
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors));

    Ok(app)
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Hamlet Election API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Iraqi election candidates, governorates and parties",
        "endpoints": {
            "health": "/health",
            "api": "/api",
            "candidates": "/api/candidates",
            "civic": "/api/civic"
        }
    }))
}

/// Health check: 503 when the database does not answer
async fn health(State(state): State<AppState>) -> Response {
    let timestamp = Utc::now().to_rfc3339();
    let uptime = state.started_at.elapsed().as_secs_f64();

    match db::health_check(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": timestamp,
                "uptime": uptime,
                "database": "connected"
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Database health check failed: {:?}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "error",
                    "timestamp": timestamp,
                    "uptime": uptime,
                    "database": "disconnected",
                    "error": "Database connection failed"
                })),
            )
                .into_response()
        },
    }
}

async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(
            "Not Found",
            format!("Route {} {} not found", method, uri.path()),
        )),
    )
}
