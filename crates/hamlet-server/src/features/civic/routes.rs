//! Civic API routes
//!
//! - `GET /api/civic/governorates` - All governorates
//! - `GET /api/civic/governorates/:slug` - One governorate with its candidate count
//! - `GET /api/civic/parties` - All parties with candidate counts

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use sqlx::PgPool;

use super::queries::{
    GetGovernorateError, GetGovernorateQuery, GetGovernorateResponse, ListGovernoratesError,
    ListPartiesError, PartyListItem,
};
use crate::error::AppError;
use crate::models::Governorate;

pub fn civic_routes() -> Router<PgPool> {
    Router::new()
        .route("/governorates", get(list_governorates))
        .route("/governorates/:slug", get(get_governorate))
        .route("/parties", get(list_parties))
}

#[tracing::instrument(skip(pool))]
async fn list_governorates(State(pool): State<PgPool>) -> Result<Json<Vec<Governorate>>, AppError> {
    let governorates = super::queries::list_governorates::handle(pool).await?;
    Ok(Json(governorates))
}

#[tracing::instrument(skip(pool), fields(slug = %slug))]
async fn get_governorate(
    State(pool): State<PgPool>,
    Path(slug): Path<String>,
) -> Result<Json<GetGovernorateResponse>, AppError> {
    let response = super::queries::get_governorate::handle(pool, GetGovernorateQuery { slug }).await?;
    Ok(Json(response))
}

#[tracing::instrument(skip(pool))]
async fn list_parties(State(pool): State<PgPool>) -> Result<Json<Vec<PartyListItem>>, AppError> {
    let parties = super::queries::list_parties::handle(pool).await?;
    Ok(Json(parties))
}

impl From<ListGovernoratesError> for AppError {
    fn from(err: ListGovernoratesError) -> Self {
        match err {
            ListGovernoratesError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<GetGovernorateError> for AppError {
    fn from(err: GetGovernorateError) -> Self {
        match err {
            GetGovernorateError::NotFound => AppError::not_found("Governorate not found"),
            GetGovernorateError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<ListPartiesError> for AppError {
    fn from(err: ListPartiesError) -> Self {
        match err {
            ListPartiesError::Database(e) => AppError::Database(e),
        }
    }
}
