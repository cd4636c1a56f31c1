use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    Candidate, Governorate, Party, SocialProfile, GOVERNORATE_COLUMNS, PARTY_COLUMNS,
};

#[derive(Debug, Clone)]
pub struct GetCandidateQuery {
    /// Raw path segment; anything that is not a UUID cannot match a row
    pub id: String,
}

/// Candidate with its party, governorate and linked social profile
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCandidateResponse {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub party: Option<Party>,
    pub governorate: Option<Governorate>,
    pub social_user: Option<SocialProfile>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetCandidateError {
    #[error("Candidate not found")]
    NotFound,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

async fn fetch_party(pool: &PgPool, id: Option<Uuid>) -> Result<Option<Party>, sqlx::Error> {
    let Some(id) = id else { return Ok(None) };
    sqlx::query_as::<_, Party>(&format!("SELECT {PARTY_COLUMNS} FROM parties WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

async fn fetch_governorate(
    pool: &PgPool,
    id: Option<Uuid>,
) -> Result<Option<Governorate>, sqlx::Error> {
    let Some(id) = id else { return Ok(None) };
    sqlx::query_as::<_, Governorate>(&format!(
        "SELECT {GOVERNORATE_COLUMNS} FROM governorates WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

async fn fetch_social_profile(
    pool: &PgPool,
    id: Option<Uuid>,
) -> Result<Option<SocialProfile>, sqlx::Error> {
    let Some(id) = id else { return Ok(None) };
    sqlx::query_as::<_, SocialProfile>(
        "SELECT id, name, avatar_url, verified FROM social_users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetCandidateQuery,
) -> Result<GetCandidateResponse, GetCandidateError> {
    let id = Uuid::parse_str(query.id.trim()).map_err(|_| GetCandidateError::NotFound)?;

    let candidate = sqlx::query_as::<_, Candidate>("SELECT * FROM election_candidates WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(GetCandidateError::NotFound)?;

    let (party, governorate, social_user) = tokio::try_join!(
        fetch_party(&pool, candidate.party_id),
        fetch_governorate(&pool, candidate.governorate_id),
        fetch_social_profile(&pool, candidate.social_user_id),
    )?;

    Ok(GetCandidateResponse {
        candidate,
        party,
        governorate,
        social_user,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    #[tokio::test]
    async fn test_malformed_id_is_not_found_without_touching_database() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgresql://localhost:1/unused")
            .unwrap();

        let result = handle(
            pool,
            GetCandidateQuery {
                id: "not-a-uuid".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(GetCandidateError::NotFound)));
    }
}
