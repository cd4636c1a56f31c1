//! Candidate API routes
//!
//! # Route Structure
//!
//! - `GET /api/candidates` - List candidates with pagination, filters and sorting
//! - `GET /api/candidates/stats/overview` - Aggregate statistics
//! - `GET /api/candidates/trending` - Most voted active candidates
//! - `GET /api/candidates/:id` - Single candidate with party, governorate and social profile

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use sqlx::PgPool;

use super::queries::{
    CandidateStatsError, CandidateStatsResponse, GetCandidateError, GetCandidateQuery,
    GetCandidateResponse, ListCandidatesError, ListCandidatesParams, ListCandidatesResponse,
    TrendingCandidate, TrendingCandidatesError, TrendingCandidatesParams,
};
use crate::error::AppError;

// ============================================================================
// Router Configuration
// ============================================================================

pub fn candidates_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(list_candidates))
        .route("/stats/overview", get(candidate_stats))
        .route("/trending", get(trending_candidates))
        .route("/:id", get(get_candidate))
}

// ============================================================================
// Query Handlers
// ============================================================================

/// List candidates
///
/// # Query Parameters
///
/// - `page` - Page number (default: 1)
/// - `limit` - Items per page (default: 20, capped at 100)
/// - `governorate`, `gender`, `party`, `nominationType`, `search` - Filters
/// - `sort` - `name`, `ballotNumber`, `votes` or `createdAt`
/// - `order` - `asc` (default) or `desc`
///
/// # Response
///
/// - `200 OK` - `{data, pagination}`
/// - `400 Bad Request` - Invalid query parameters, with field details
#[tracing::instrument(skip(pool, params), fields(page = ?params.page, limit = ?params.limit))]
async fn list_candidates(
    State(pool): State<PgPool>,
    Query(params): Query<ListCandidatesParams>,
) -> Result<Json<ListCandidatesResponse>, AppError> {
    let response = super::queries::list::handle(pool, params).await?;

    tracing::debug!(
        count = response.data.len(),
        total = response.pagination.total,
        "Candidates listed via API"
    );

    Ok(Json(response))
}

#[tracing::instrument(skip(pool), fields(id = %id))]
async fn get_candidate(
    State(pool): State<PgPool>,
    Path(id): Path<String>,
) -> Result<Json<GetCandidateResponse>, AppError> {
    let response = super::queries::get::handle(pool, GetCandidateQuery { id }).await?;
    Ok(Json(response))
}

#[tracing::instrument(skip(pool))]
async fn candidate_stats(
    State(pool): State<PgPool>,
) -> Result<Json<CandidateStatsResponse>, AppError> {
    let response = super::queries::stats::handle(pool).await?;
    Ok(Json(response))
}

#[tracing::instrument(skip(pool, params))]
async fn trending_candidates(
    State(pool): State<PgPool>,
    Query(params): Query<TrendingCandidatesParams>,
) -> Result<Json<Vec<TrendingCandidate>>, AppError> {
    let response = super::queries::trending::handle(pool, params).await?;
    Ok(Json(response))
}

// ============================================================================
// Error Handling
// ============================================================================

impl From<ListCandidatesError> for AppError {
    fn from(err: ListCandidatesError) -> Self {
        match err {
            ListCandidatesError::Validation(errors) => AppError::Validation(errors),
            ListCandidatesError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<GetCandidateError> for AppError {
    fn from(err: GetCandidateError) -> Self {
        match err {
            GetCandidateError::NotFound => AppError::not_found("Candidate not found"),
            GetCandidateError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<CandidateStatsError> for AppError {
    fn from(err: CandidateStatsError) -> Self {
        match err {
            CandidateStatsError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<TrendingCandidatesError> for AppError {
    fn from(err: TrendingCandidatesError) -> Self {
        match err {
            TrendingCandidatesError::Validation(errors) => AppError::Validation(errors),
            TrendingCandidatesError::Database(e) => AppError::Database(e),
        }
    }
}
