//! Import data types

use hamlet_common::normalize::normalize_token;
use hamlet_common::types::{Gender, NominationType};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::columns::normalize_header;

/// One source row keyed by normalized header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line/position in the source, as reported in errors
    pub row: usize,
    values: BTreeMap<String, String>,
}

impl RawRecord {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            values: BTreeMap::new(),
        }
    }

    /// Add a column. A repeated header keeps its first value.
    pub fn insert(&mut self, header: &str, value: impl Into<String>) {
        self.values
            .entry(normalize_header(header))
            .or_insert_with(|| value.into());
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.values.get(&normalize_header(header)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect(),
        )
    }
}

/// Logical fields pulled out of a [`RawRecord`], trimmed, blanks as `None`.
///
/// Also stored as `raw_data` and attached to error entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ballot_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_on_ballot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_sequence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nomination_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electoral_district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voter_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name_arabic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name_kurdish: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_candidate_id: Option<String>,
}

impl ExtractedFields {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Stable identifier for a source candidate.
///
/// SHA-256 over the normalized full name, sequence, party ballot number and
/// district, so re-running or re-ordering a file produces the same ids.
pub fn derive_unique_candidate_id(
    full_name: &str,
    candidate_sequence: i32,
    ballot_number: Option<&str>,
    electoral_district: Option<&str>,
) -> String {
    let key = [
        normalize_token(full_name),
        candidate_sequence.to_string(),
        normalize_token(ballot_number.unwrap_or_default()),
        normalize_token(electoral_district.unwrap_or_default()),
    ]
    .join("|");

    format!("{:x}", Sha256::digest(key.as_bytes()))
}

/// A row that passed validation and is ready for party/governorate resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRow {
    pub row: usize,
    pub fields: ExtractedFields,
    pub unique_candidate_id: String,
    pub full_name: String,
    pub candidate_sequence: i32,
    pub ballot_number: Option<i32>,
    pub gender: Gender,
    pub nomination_type: NominationType,
}

/// Party upsert input, keyed case-insensitively by `name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewParty {
    pub name: String,
    pub code: String,
    pub ballot_number: Option<i32>,
}

/// Governorate upsert input, keyed case-insensitively by canonical `name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGovernorate {
    pub name: String,
    pub name_arabic: Option<String>,
    pub code: String,
    pub slug: String,
}

/// Candidate row as written to `election_candidates`
#[derive(Debug, Clone, PartialEq)]
pub struct NewCandidate {
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
    pub party_id: Option<Uuid>,
    pub party_name: Option<String>,
    pub governorate_id: Option<Uuid>,
    pub governorate_name: Option<String>,
    pub electoral_district: Option<String>,
    pub source_file: String,
    pub source_row_id: i32,
    pub raw_data: serde_json::Value,
}

/// Per-row failure entry, written to the error log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportError {
    pub row: usize,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Outcome of an import run
///
/// Every processed row ends up in exactly one of `imported`, `duplicates`
/// or `skipped`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub processed: usize,
    pub imported: usize,
    pub duplicates: usize,
    pub skipped: usize,
    pub errors: Vec<ImportError>,
}

impl ImportReport {
    pub fn skip(&mut self, row: usize, error: impl Into<String>, data: Option<serde_json::Value>) {
        self.skipped += 1;
        self.errors.push(ImportError {
            row,
            error: error.into(),
            data,
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
