use hamlet_common::types::Gender;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Number of parties reported in `top_parties`.
pub const TOP_PARTIES: i64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenderDistribution {
    #[serde(rename = "Male")]
    pub male: i64,
    #[serde(rename = "Female")]
    pub female: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GovernorateCount {
    pub governorate: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartyCount {
    pub party: String,
    pub count: i64,
}

/// Aggregate statistics over non-duplicate candidates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidateStatsResponse {
    pub total_candidates: i64,
    pub gender_distribution: GenderDistribution,
    pub candidates_per_governorate: Vec<GovernorateCount>,
    pub top_parties: Vec<PartyCount>,
}

#[derive(Debug, thiserror::Error)]
pub enum CandidateStatsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

async fn count_total(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM election_candidates WHERE duplicate_of_id IS NULL",
    )
    .fetch_one(pool)
    .await
}

async fn count_gender(pool: &PgPool, gender: Gender) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM election_candidates WHERE duplicate_of_id IS NULL AND gender = $1",
    )
    .bind(gender)
    .fetch_one(pool)
    .await
}

async fn count_by_governorate(pool: &PgPool) -> Result<Vec<GovernorateCount>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (Option<String>, i64)>(
        r#"
        SELECT governorate_name, COUNT(*) AS count
        FROM election_candidates
        WHERE duplicate_of_id IS NULL
        GROUP BY governorate_name
        ORDER BY count DESC, governorate_name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(governorate, count)| GovernorateCount { governorate, count })
        .collect())
}

async fn top_parties(pool: &PgPool) -> Result<Vec<PartyCount>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT party_name, COUNT(*) AS count
        FROM election_candidates
        WHERE duplicate_of_id IS NULL AND party_name IS NOT NULL
        GROUP BY party_name
        ORDER BY count DESC, party_name ASC
        LIMIT $1
        "#,
    )
    .bind(TOP_PARTIES)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(party, count)| PartyCount { party, count })
        .collect())
}

/// Run the five aggregate queries concurrently and combine them
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool) -> Result<CandidateStatsResponse, CandidateStatsError> {
    let (total, male, female, per_governorate, parties) = tokio::try_join!(
        count_total(&pool),
        count_gender(&pool, Gender::Male),
        count_gender(&pool, Gender::Female),
        count_by_governorate(&pool),
        top_parties(&pool),
    )?;

    Ok(CandidateStatsResponse {
        total_candidates: total,
        gender_distribution: GenderDistribution { male, female },
        candidates_per_governorate: per_governorate,
        top_parties: parties,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_keys() {
        let response = CandidateStatsResponse {
            total_candidates: 3,
            gender_distribution: GenderDistribution { male: 2, female: 1 },
            candidates_per_governorate: vec![
                GovernorateCount {
                    governorate: Some("Baghdad".to_string()),
                    count: 2,
                },
                GovernorateCount {
                    governorate: None,
                    count: 1,
                },
            ],
            top_parties: vec![PartyCount {
                party: "State of Law".to_string(),
                count: 2,
            }],
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "total_candidates": 3,
                "gender_distribution": {"Male": 2, "Female": 1},
                "candidates_per_governorate": [
                    {"governorate": "Baghdad", "count": 2},
                    {"governorate": null, "count": 1}
                ],
                "top_parties": [{"party": "State of Law", "count": 2}]
            })
        );
    }
}
