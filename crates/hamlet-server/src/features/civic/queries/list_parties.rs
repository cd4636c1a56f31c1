use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::models::Party;

/// A party with the number of candidates linked to it
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PartyListItem {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub party: Party,
    pub candidate_count: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum ListPartiesError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// All parties with candidate counts, alphabetically
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool) -> Result<Vec<PartyListItem>, ListPartiesError> {
    let parties = sqlx::query_as::<_, PartyListItem>(
        r#"
        SELECT p.id, p.name, p.name_arabic, p.name_kurdish, p.code, p.ballot_number, p.logo_url,
               COUNT(c.id) AS candidate_count
        FROM parties p
        LEFT JOIN election_candidates c ON c.party_id = p.id
        GROUP BY p.id
        ORDER BY p.name ASC
        "#,
    )
    .fetch_all(&pool)
    .await?;

    Ok(parties)
}
