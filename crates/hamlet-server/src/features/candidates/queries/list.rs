use hamlet_common::types::{CandidateStatus, Gender, NominationType};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::str::FromStr;
use uuid::Uuid;

use crate::features::shared::pagination::{PageRequest, Paginated, DEFAULT_LIMIT, MAX_LIMIT};
use crate::features::shared::validation::{non_blank, parse_choice, parse_integer, ValidationErrors};

/// Raw query string of `GET /api/candidates`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCandidatesParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub governorate: Option<String>,
    pub gender: Option<String>,
    pub party: Option<String>,
    pub nomination_type: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Name,
    BallotNumber,
    Votes,
    CreatedAt,
    #[default]
    CandidateSequence,
}

impl SortKey {
    pub const ALLOWED: [&'static str; 4] = ["name", "ballotNumber", "votes", "createdAt"];

    fn column(self) -> &'static str {
        match self {
            SortKey::Name => "full_name",
            SortKey::BallotNumber => "ballot_number",
            SortKey::Votes => "votes",
            SortKey::CreatedAt => "created_at",
            SortKey::CandidateSequence => "candidate_sequence",
        }
    }
}

impl FromStr for SortKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "ballotNumber" => Ok(SortKey::BallotNumber),
            "votes" => Ok(SortKey::Votes),
            "createdAt" => Ok(SortKey::CreatedAt),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    fn sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(()),
        }
    }
}

/// Filters applied to every candidate listing; duplicates are always excluded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateFilters {
    /// Exact match on the raw governorate text
    pub governorate: Option<String>,
    pub gender: Option<Gender>,
    /// Case-insensitive substring of the party name
    pub party: Option<String>,
    pub nomination_type: Option<NominationType>,
    /// Case-insensitive substring of any of the three name fields
    pub search: Option<String>,
}

/// Validated listing request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCandidatesQuery {
    pub page: PageRequest,
    pub filters: CandidateFilters,
    pub sort: SortKey,
    pub order: SortOrder,
}

/// Projection returned by the listing
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CandidateListItem {
    pub id: Uuid,
    pub full_name: String,
    pub full_name_arabic: Option<String>,
    pub full_name_kurdish: Option<String>,
    pub candidate_sequence: i32,
    pub gender: Gender,
    pub governorate_name: Option<String>,
    pub party_name: Option<String>,
    pub nomination_type: NominationType,
    pub votes: i64,
    pub photo_url: Option<String>,
    pub status: CandidateStatus,
}

pub type ListCandidatesResponse = Paginated<CandidateListItem>;

#[derive(Debug, thiserror::Error)]
pub enum ListCandidatesError {
    #[error("Invalid query parameters: {0}")]
    Validation(ValidationErrors),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ListCandidatesParams {
    /// Check every parameter, collecting all failures
    pub fn validate(&self) -> Result<ListCandidatesQuery, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let page = parse_integer(&mut errors, "page", self.page.as_deref()).unwrap_or(1);
        if page < 1 {
            errors.add("page", "Page must be greater than 0");
        }

        // Oversized limits are capped rather than rejected
        let limit = parse_integer(&mut errors, "limit", self.limit.as_deref())
            .unwrap_or(DEFAULT_LIMIT);
        if limit < 1 {
            errors.add("limit", "Limit must be greater than 0");
        }
        let limit = limit.min(MAX_LIMIT);
        if page >= 1 && limit >= 1 && (page - 1).checked_mul(limit).is_none() {
            errors.add("page", "Page is out of range");
        }

        let gender = parse_choice::<Gender>(
            &mut errors,
            "gender",
            self.gender.as_deref(),
            &["Male", "Female"],
        );
        let nomination_type = parse_choice::<NominationType>(
            &mut errors,
            "nominationType",
            self.nomination_type.as_deref(),
            &["Party", "Independent", "Coalition", "Individual"],
        );
        let sort = parse_choice::<SortKey>(&mut errors, "sort", self.sort.as_deref(), &SortKey::ALLOWED)
            .unwrap_or_default();
        let order = parse_choice::<SortOrder>(&mut errors, "order", self.order.as_deref(), &["asc", "desc"])
            .unwrap_or_default();

        errors.into_result()?;

        Ok(ListCandidatesQuery {
            page: PageRequest::new(page, limit),
            filters: CandidateFilters {
                governorate: non_blank(self.governorate.as_deref()).map(str::to_string),
                gender,
                party: non_blank(self.party.as_deref()).map(str::to_string),
                nomination_type,
                search: non_blank(self.search.as_deref()).map(str::to_string),
            },
            sort,
            order,
        })
    }
}

/// `%term%` with LIKE wildcards in the term escaped
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Append the WHERE clause for `filters`
pub fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &CandidateFilters) {
    builder.push(" WHERE duplicate_of_id IS NULL");

    if let Some(governorate) = &filters.governorate {
        builder.push(" AND governorate_name = ").push_bind(governorate.clone());
    }
    if let Some(gender) = filters.gender {
        builder.push(" AND gender = ").push_bind(gender);
    }
    if let Some(party) = &filters.party {
        builder.push(" AND party_name ILIKE ").push_bind(contains_pattern(party));
    }
    if let Some(nomination_type) = filters.nomination_type {
        builder.push(" AND nomination_type = ").push_bind(nomination_type);
    }
    if let Some(search) = &filters.search {
        let pattern = contains_pattern(search);
        builder
            .push(" AND (full_name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR full_name_arabic ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR full_name_kurdish ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

fn count_query(filters: &CandidateFilters) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM election_candidates");
    push_filters(&mut builder, filters);
    builder
}

fn page_query(query: &ListCandidatesQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(
        "SELECT id, full_name, full_name_arabic, full_name_kurdish, candidate_sequence, gender, \
         governorate_name, party_name, nomination_type, votes, photo_url, status \
         FROM election_candidates",
    );
    push_filters(&mut builder, &query.filters);
    builder
        .push(" ORDER BY ")
        .push(query.sort.column())
        .push(" ")
        .push(query.order.sql())
        .push(", id ASC LIMIT ")
        .push_bind(query.page.limit())
        .push(" OFFSET ")
        .push_bind(query.page.offset());
    builder
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    params: ListCandidatesParams,
) -> Result<ListCandidatesResponse, ListCandidatesError> {
    let query = params.validate().map_err(ListCandidatesError::Validation)?;

    let total: i64 = count_query(&query.filters)
        .build_query_scalar::<i64>()
        .fetch_one(&pool)
        .await?;

    let items = page_query(&query)
        .build_query_as::<CandidateListItem>()
        .fetch_all(&pool)
        .await?;

    Ok(Paginated::new(items, &query.page, total))
}
