use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::models::Governorate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetGovernorateQuery {
    pub slug: String,
}

/// A governorate with the number of candidates linked to it
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GetGovernorateResponse {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub governorate: Governorate,
    pub candidate_count: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetGovernorateError {
    #[error("Governorate not found")]
    NotFound,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetGovernorateQuery,
) -> Result<GetGovernorateResponse, GetGovernorateError> {
    sqlx::query_as::<_, GetGovernorateResponse>(
        r#"
        SELECT g.id, g.name, g.name_arabic, g.name_kurdish, g.code, g.slug,
               g.registered_voters, g.polling_stations,
               (SELECT COUNT(*) FROM election_candidates c WHERE c.governorate_id = g.id)
                   AS candidate_count
        FROM governorates g
        WHERE g.slug = $1
        "#,
    )
    .bind(query.slug.trim().to_lowercase())
    .fetch_optional(&pool)
    .await?
    .ok_or(GetGovernorateError::NotFound)
}
