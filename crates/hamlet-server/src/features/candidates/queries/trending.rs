//! Placeholder "trending" list: the most voted active candidates.
//!
//! There is no engagement signal yet, so this is a plain top-N by votes.

use hamlet_common::types::{CandidateStatus, Gender};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::features::shared::validation::{parse_integer, ValidationErrors};

pub const DEFAULT_TRENDING_LIMIT: i64 = 6;
pub const MAX_TRENDING_LIMIT: i64 = 20;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendingCandidatesParams {
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TrendingCandidate {
    pub id: Uuid,
    pub full_name: String,
    pub full_name_arabic: Option<String>,
    pub candidate_sequence: i32,
    pub gender: Gender,
    pub governorate_name: Option<String>,
    pub party_name: Option<String>,
    pub photo_url: Option<String>,
    pub votes: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TrendingCandidatesError {
    #[error("Invalid query parameters: {0}")]
    Validation(ValidationErrors),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl TrendingCandidatesParams {
    /// Effective limit: default 6, capped at 20
    pub fn limit(&self) -> Result<i64, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let limit = parse_integer(&mut errors, "limit", self.limit.as_deref())
            .unwrap_or(DEFAULT_TRENDING_LIMIT);
        if limit < 1 {
            errors.add("limit", "Limit must be greater than 0");
        }
        errors.into_result()?;
        Ok(limit.min(MAX_TRENDING_LIMIT))
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    params: TrendingCandidatesParams,
) -> Result<Vec<TrendingCandidate>, TrendingCandidatesError> {
    let limit = params.limit().map_err(TrendingCandidatesError::Validation)?;

    let candidates = sqlx::query_as::<_, TrendingCandidate>(
        r#"
        SELECT id, full_name, full_name_arabic, candidate_sequence, gender,
               governorate_name, party_name, photo_url, votes
        FROM election_candidates
        WHERE duplicate_of_id IS NULL AND status = $1
        ORDER BY votes DESC, candidate_sequence ASC
        LIMIT $2
        "#,
    )
    .bind(CandidateStatus::Active)
    .bind(limit)
    .fetch_all(&pool)
    .await?;

    Ok(candidates)
}
