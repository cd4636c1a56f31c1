use sqlx::PgPool;

use crate::models::{Governorate, GOVERNORATE_COLUMNS};

#[derive(Debug, thiserror::Error)]
pub enum ListGovernoratesError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// All governorates, alphabetically
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool) -> Result<Vec<Governorate>, ListGovernoratesError> {
    let governorates = sqlx::query_as::<_, Governorate>(&format!(
        "SELECT {GOVERNORATE_COLUMNS} FROM governorates ORDER BY name ASC"
    ))
    .fetch_all(&pool)
    .await?;

    Ok(governorates)
}
