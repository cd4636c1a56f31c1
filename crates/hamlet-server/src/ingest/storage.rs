//! Storage boundary for the import pipeline
//!
//! [`CandidateStore`] is the only place the pipeline touches persistence.
//! Party and governorate resolution is a single upsert returning the row id,
//! so concurrent imports never race between lookup and insert.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::models::{NewCandidate, NewGovernorate, NewParty};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Id of the party with this name (case-insensitive), created if missing
    async fn upsert_party(&self, party: &NewParty) -> StoreResult<Uuid>;

    /// Id of the governorate with this name (case-insensitive), created if missing
    async fn upsert_governorate(&self, governorate: &NewGovernorate) -> StoreResult<Uuid>;

    /// Insert candidates, ignoring rows whose `unique_candidate_id` exists.
    /// Returns the number of rows actually inserted.
    async fn insert_batch(&self, candidates: &[NewCandidate]) -> StoreResult<u64>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgCandidateStore {
    pool: PgPool,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    #[tracing::instrument(skip(self), fields(name = %party.name))]
    async fn upsert_party(&self, party: &NewParty) -> StoreResult<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO parties (name, code, ballot_number)
            VALUES ($1, $2, $3)
            ON CONFLICT ((LOWER(name))) DO UPDATE
            SET ballot_number = COALESCE(parties.ballot_number, EXCLUDED.ballot_number)
            RETURNING id
            "#,
        )
        .bind(&party.name)
        .bind(&party.code)
        .bind(party.ballot_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    #[tracing::instrument(skip(self), fields(name = %governorate.name))]
    async fn upsert_governorate(&self, governorate: &NewGovernorate) -> StoreResult<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO governorates (name, name_arabic, code, slug)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT ((LOWER(name))) DO UPDATE
            SET name_arabic = COALESCE(governorates.name_arabic, EXCLUDED.name_arabic)
            RETURNING id
            "#,
        )
        .bind(&governorate.name)
        .bind(&governorate.name_arabic)
        .bind(&governorate.code)
        .bind(&governorate.slug)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    #[tracing::instrument(skip(self, candidates), fields(count = candidates.len()))]
    async fn insert_batch(&self, candidates: &[NewCandidate]) -> StoreResult<u64> {
        if candidates.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO election_candidates (\
             unique_candidate_id, full_name, full_name_arabic, full_name_kurdish, \
             name_on_ballot, candidate_sequence, ballot_number, voter_number, \
             gender, nomination_type, party_id, party_name, governorate_id, \
             governorate_name, electoral_district, source_file, source_row_id, raw_data) ",
        );

        builder.push_values(candidates, |mut b, c| {
            b.push_bind(&c.unique_candidate_id)
                .push_bind(&c.full_name)
                .push_bind(&c.full_name_arabic)
                .push_bind(&c.full_name_kurdish)
                .push_bind(&c.name_on_ballot)
                .push_bind(c.candidate_sequence)
                .push_bind(c.ballot_number)
                .push_bind(&c.voter_number)
                .push_bind(c.gender)
                .push_bind(c.nomination_type)
                .push_bind(c.party_id)
                .push_bind(&c.party_name)
                .push_bind(c.governorate_id)
                .push_bind(&c.governorate_name)
                .push_bind(&c.electoral_district)
                .push_bind(&c.source_file)
                .push_bind(c.source_row_id)
                .push_bind(&c.raw_data);
        });
        builder.push(" ON CONFLICT (unique_candidate_id) DO NOTHING");

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    parties: HashMap<String, Uuid>,
    governorates: HashMap<String, Uuid>,
    candidates: BTreeMap<String, NewCandidate>,
}

/// In-memory store with the same uniqueness rules, used for dry runs
#[derive(Debug, Default)]
pub struct MemoryCandidateStore {
    state: Mutex<MemoryState>,
}

impl MemoryCandidateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored candidates ordered by `unique_candidate_id`
    pub async fn candidates(&self) -> Vec<NewCandidate> {
        self.state.lock().await.candidates.values().cloned().collect()
    }

    pub async fn party_count(&self) -> usize {
        self.state.lock().await.parties.len()
    }

    pub async fn governorate_count(&self) -> usize {
        self.state.lock().await.governorates.len()
    }
}

#[async_trait]
impl CandidateStore for MemoryCandidateStore {
    async fn upsert_party(&self, party: &NewParty) -> StoreResult<Uuid> {
        let mut state = self.state.lock().await;
        Ok(*state
            .parties
            .entry(party.name.to_lowercase())
            .or_insert_with(Uuid::new_v4))
    }

    async fn upsert_governorate(&self, governorate: &NewGovernorate) -> StoreResult<Uuid> {
        let mut state = self.state.lock().await;
        Ok(*state
            .governorates
            .entry(governorate.name.to_lowercase())
            .or_insert_with(Uuid::new_v4))
    }

    async fn insert_batch(&self, candidates: &[NewCandidate]) -> StoreResult<u64> {
        let mut state = self.state.lock().await;
        let mut inserted = 0;
        for candidate in candidates {
            if !state.candidates.contains_key(&candidate.unique_candidate_id) {
                state
                    .candidates
                    .insert(candidate.unique_candidate_id.clone(), candidate.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hamlet_common::types::{Gender, NominationType};

    fn candidate(id: &str) -> NewCandidate {
        NewCandidate {
            unique_candidate_id: id.to_string(),
            full_name: "Ali Hassan".to_string(),
            full_name_arabic: None,
            full_name_kurdish: None,
            name_on_ballot: None,
            candidate_sequence: 1,
            ballot_number: None,
            voter_number: None,
            gender: Gender::Male,
            nomination_type: NominationType::Independent,
            party_id: None,
            party_name: None,
            governorate_id: None,
            governorate_name: None,
            electoral_district: None,
            source_file: "test.csv".to_string(),
            source_row_id: 2,
            raw_data: serde_json::json!({}),
        }
    }

    #[tokio::test]
    async fn test_memory_party_upsert_is_case_insensitive() {
        let store = MemoryCandidateStore::new();
        let party = |name: &str| NewParty {
            name: name.to_string(),
            code: "X".to_string(),
            ballot_number: None,
        };

        let a = store.upsert_party(&party("State of Law")).await.unwrap();
        let b = store.upsert_party(&party("STATE OF LAW")).await.unwrap();
        let c = store.upsert_party(&party("Progress")).await.unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(store.party_count().await, 2);
    }

    #[tokio::test]
    async fn test_memory_insert_ignores_existing_ids() {
        let store = MemoryCandidateStore::new();
        assert_eq!(store.insert_batch(&[candidate("a"), candidate("b")]).await.unwrap(), 2);
        assert_eq!(store.insert_batch(&[candidate("b"), candidate("c")]).await.unwrap(), 1);
        assert_eq!(store.insert_batch(&[candidate("d"), candidate("d")]).await.unwrap(), 1);
        assert_eq!(store.candidates().await.len(), 4);
    }
}
