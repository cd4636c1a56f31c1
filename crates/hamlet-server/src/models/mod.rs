//! Database models
//!
//! Row types shared by the candidate and civic features. They serialize
//! with camelCase keys, which is what API clients consume.

use chrono::{DateTime, Utc};
use hamlet_common::types::{CandidateStatus, Gender, NominationType};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Governorate model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Governorate {
    pub id: Uuid,
    pub name: String,
    pub name_arabic: Option<String>,
    pub name_kurdish: Option<String>,
    pub code: String,
    pub slug: String,
    pub registered_voters: Option<i64>,
    pub polling_stations: Option<i32>,
}

/// Party model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub id: Uuid,
    pub name: String,
    pub name_arabic: Option<String>,
    pub name_kurdish: Option<String>,
    pub code: String,
    pub ballot_number: Option<i32>,
    pub logo_url: Option<String>,
}

/// Public part of a social profile linked to a candidate
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SocialProfile {
    pub id: Uuid,
    pub name: String,
    pub avatar_url: Option<String>,
    pub verified: bool,
}

/// Full election candidate row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: Uuid,
    pub unique_candidate_id: String,
    pub full_name: String,
    pub full_name_arabic: Option<String>,
    pub full_name_kurdish: Option<String>,
    pub name_on_ballot: Option<String>,
    pub candidate_sequence: i32,
    pub ballot_number: Option<i32>,
    pub voter_number: Option<String>,
    pub gender: Gender,
    pub nomination_type: NominationType,
    pub status: CandidateStatus,
    pub votes: i64,
    pub photo_url: Option<String>,
    pub party_id: Option<Uuid>,
    pub party_name: Option<String>,
    pub governorate_id: Option<Uuid>,
    pub governorate_name: Option<String>,
    pub electoral_district: Option<String>,
    pub duplicate_of_id: Option<Uuid>,
    pub social_user_id: Option<Uuid>,
    pub source_file: Option<String>,
    pub source_row_id: Option<i32>,
    pub raw_data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column list matching [`Governorate`]
pub const GOVERNORATE_COLUMNS: &str =
    "id, name, name_arabic, name_kurdish, code, slug, registered_voters, polling_stations";

/// Column list matching [`Party`]
pub const PARTY_COLUMNS: &str = "id, name, name_arabic, name_kurdish, code, ballot_number, logo_url";
