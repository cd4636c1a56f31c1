//! Row-by-row candidate import
//!
//! Rows are validated, resolved against the store and buffered. A full batch
//! is flushed as one bulk insert; the remainder is flushed at the end. All
//! failures are per row and recorded in the returned [`ImportReport`].

use anyhow::Context;
use hamlet_common::normalize::{
    governorate_code, governorate_slug, normalize_governorate, parse_gender,
    parse_nomination_type, party_code,
};
use std::path::Path;

use super::columns::extract;
use super::config::ImportConfig;
use super::models::{
    derive_unique_candidate_id, ImportError, ImportReport, NewCandidate, NewGovernorate,
    NewParty, RawRecord, ValidatedRow,
};
use super::source::RecordResult;
use super::storage::{CandidateStore, StoreError, StoreResult};

/// Number of errors echoed to the log after a run
pub const LOGGED_ERRORS: usize = 10;

/// Check required fields and parse typed values
pub fn validate_row(record: &RawRecord) -> Result<ValidatedRow, ImportError> {
    let fields = extract(record);
    let reject = |error: String| ImportError {
        row: record.row,
        error,
        data: Some(fields.to_json()),
    };

    let Some(full_name) = fields.full_name.clone() else {
        return Err(reject("Missing full name".to_string()));
    };
    let Some(sequence) = fields.candidate_sequence.as_deref() else {
        return Err(reject("Missing candidate sequence".to_string()));
    };
    let Some(gender) = fields.gender.as_deref() else {
        return Err(reject("Missing gender".to_string()));
    };

    let gender = parse_gender(gender).map_err(|e| reject(e.to_string()))?;
    let nomination_type = parse_nomination_type(fields.nomination_type.as_deref().unwrap_or(""));
    let candidate_sequence: i32 = sequence
        .parse()
        .map_err(|_| reject("Invalid candidate sequence".to_string()))?;

    let ballot_number = fields
        .ballot_number
        .as_deref()
        .and_then(|n| n.parse::<i32>().ok());

    let unique_candidate_id = fields.unique_candidate_id.clone().unwrap_or_else(|| {
        derive_unique_candidate_id(
            &full_name,
            candidate_sequence,
            fields.ballot_number.as_deref(),
            fields.electoral_district.as_deref(),
        )
    });

    Ok(ValidatedRow {
        row: record.row,
        fields,
        unique_candidate_id,
        full_name,
        candidate_sequence,
        ballot_number,
        gender,
        nomination_type,
    })
}

/// Resolve party and governorate ids and build the insertable row
pub async fn resolve_row<S>(store: &S, row: ValidatedRow, source_file: &str) -> StoreResult<NewCandidate>
where
    S: CandidateStore + ?Sized,
{
    let party_id = match row.fields.name_on_ballot.as_deref() {
        Some(name) => Some(
            store
                .upsert_party(&NewParty {
                    name: name.to_string(),
                    code: party_code(name),
                    ballot_number: row.ballot_number,
                })
                .await?,
        ),
        None => None,
    };

    let district = row.fields.electoral_district.as_deref();
    let governorate_id = match district.and_then(|raw| normalize_governorate(raw).map(|n| (raw, n))) {
        Some((raw, canonical)) => Some(
            store
                .upsert_governorate(&NewGovernorate {
                    name: canonical.to_string(),
                    name_arabic: Some(raw.to_string()),
                    code: governorate_code(canonical),
                    slug: governorate_slug(canonical),
                })
                .await?,
        ),
        None => None,
    };

    let raw_data = row.fields.to_json();
    let fields = row.fields;

    Ok(NewCandidate {
        unique_candidate_id: row.unique_candidate_id,
        full_name: row.full_name,
        full_name_arabic: fields.full_name_arabic,
        full_name_kurdish: fields.full_name_kurdish,
        name_on_ballot: fields.name_on_ballot.clone(),
        candidate_sequence: row.candidate_sequence,
        ballot_number: row.ballot_number,
        voter_number: fields.voter_number,
        gender: row.gender,
        nomination_type: row.nomination_type,
        party_id,
        party_name: fields.name_on_ballot,
        governorate_id,
        governorate_name: fields.electoral_district.clone(),
        electoral_district: fields.electoral_district,
        source_file: source_file.to_string(),
        source_row_id: i32::try_from(row.row).unwrap_or(i32::MAX),
        raw_data,
    })
}

fn skip_failed_insert(report: &mut ImportReport, row: NewCandidate, error: &StoreError) {
    report.skip(
        usize::try_from(row.source_row_id).unwrap_or_default(),
        format!("Batch insert failed: {}", error),
        Some(row.raw_data),
    );
}

/// Insert rows one at a time after a failed bulk insert
async fn insert_rows_individually<S>(store: &S, rows: Vec<NewCandidate>, report: &mut ImportReport)
where
    S: CandidateStore + ?Sized,
{
    for row in rows {
        match store.insert_batch(std::slice::from_ref(&row)).await {
            Ok(0) => report.duplicates += 1,
            Ok(_) => report.imported += 1,
            Err(e) => {
                tracing::warn!(row = row.source_row_id, error = %e, "Row insert failed");
                skip_failed_insert(report, row, &e);
            },
        }
    }
}

async fn flush_batch<S>(store: &S, batch: &mut Vec<NewCandidate>, batch_number: usize, report: &mut ImportReport)
where
    S: CandidateStore + ?Sized,
{
    let rows = std::mem::take(batch);

    match store.insert_batch(&rows).await {
        Ok(inserted) => {
            let inserted = usize::try_from(inserted).unwrap_or(rows.len()).min(rows.len());
            report.imported += inserted;
            report.duplicates += rows.len() - inserted;
            tracing::info!(
                batch = batch_number,
                inserted,
                duplicates = rows.len() - inserted,
                total_imported = report.imported,
                processed = report.processed,
                "Batch flushed"
            );
        },
        Err(e) if rows.len() > 1 => {
            tracing::warn!(
                batch = batch_number,
                rows = rows.len(),
                error = %e,
                "Batch insert failed, retrying rows one at a time"
            );
            insert_rows_individually(store, rows, report).await;
        },
        Err(e) => {
            tracing::error!(batch = batch_number, error = %e, "Batch insert failed");
            for row in rows {
                skip_failed_insert(report, row, &e);
            }
        },
    }
}

/// Import `records` into `store`, honouring the row limit and batch size
pub async fn run_import<I, S>(records: I, store: &S, config: &ImportConfig) -> ImportReport
where
    I: IntoIterator<Item = RecordResult>,
    S: CandidateStore + ?Sized,
{
    let mut report = ImportReport::default();
    let batch_size = config.batch_size.max(1);
    let mut batch: Vec<NewCandidate> = Vec::with_capacity(batch_size);
    let mut batch_number = 0;
    let source_file = config.source_label();

    for result in records.into_iter().take(config.limit.unwrap_or(usize::MAX)) {
        report.processed += 1;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(row = e.row, "{}", e.message);
                report.skip(e.row, e.message, None);
                continue;
            },
        };

        let validated = match validate_row(&record) {
            Ok(validated) => validated,
            Err(e) => {
                tracing::debug!(row = e.row, error = %e.error, "Row skipped");
                report.skip(e.row, e.error, e.data);
                continue;
            },
        };

        let row = validated.row;
        let data = validated.fields.to_json();
        match resolve_row(store, validated, &source_file).await {
            Ok(candidate) => batch.push(candidate),
            Err(e) => {
                tracing::warn!(row, error = %e, "Failed to resolve party or governorate");
                report.skip(row, e.to_string(), Some(data));
                continue;
            },
        }

        if batch.len() >= batch_size {
            batch_number += 1;
            flush_batch(store, &mut batch, batch_number, &mut report).await;
        }
    }

    if !batch.is_empty() {
        batch_number += 1;
        flush_batch(store, &mut batch, batch_number, &mut report).await;
    }

    report
}

/// Log totals and the first few errors
pub fn log_summary(report: &ImportReport) {
    tracing::info!(
        processed = report.processed,
        imported = report.imported,
        duplicates = report.duplicates,
        skipped = report.skipped,
        errors = report.errors.len(),
        "Import complete"
    );

    if report.errors.len() > LOGGED_ERRORS {
        tracing::warn!(
            "{} errors occurred. Showing first {}",
            report.errors.len(),
            LOGGED_ERRORS
        );
    }
    for error in report.errors.iter().take(LOGGED_ERRORS) {
        tracing::warn!(row = error.row, "{}", error.error);
    }
}

/// Write all errors as pretty JSON, creating parent directories
pub fn write_error_log(path: &Path, errors: &[ImportError]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(errors)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), count = errors.len(), "Error log written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hamlet_common::types::{Gender, NominationType};

    fn record(pairs: &[(&str, &str)]) -> RawRecord {
        let mut record = RawRecord::new(4);
        for (header, value) in pairs {
            record.insert(header, *value);
        }
        record
    }

    fn valid_pairs() -> Vec<(&'static str, &'static str)> {
        vec![
            ("fullName", "Ali Hassan"),
            ("candidateSequence", "12"),
            ("gender", "ذكر"),
        ]
    }

    #[test]
    fn test_validate_parses_typed_values() {
        let mut pairs = valid_pairs();
        pairs.push(("nominationType", "مستقل"));
        pairs.push(("ballotNumber", "105"));
        let row = validate_row(&record(&pairs)).unwrap();

        assert_eq!(row.row, 4);
        assert_eq!(row.full_name, "Ali Hassan");
        assert_eq!(row.candidate_sequence, 12);
        assert_eq!(row.gender, Gender::Male);
        assert_eq!(row.nomination_type, NominationType::Independent);
        assert_eq!(row.ballot_number, Some(105));
        assert_eq!(row.unique_candidate_id.len(), 64);
    }

    #[test]
    fn test_required_fields_checked_in_order() {
        let err = validate_row(&record(&[("gender", "x")])).unwrap_err();
        assert_eq!(err.error, "Missing full name");
        assert_eq!(err.row, 4);

        let err = validate_row(&record(&[("fullName", "Ali")])).unwrap_err();
        assert_eq!(err.error, "Missing candidate sequence");

        let err = validate_row(&record(&[("fullName", "Ali"), ("candidateSequence", "1")])).unwrap_err();
        assert_eq!(err.error, "Missing gender");
        assert_eq!(
            err.data,
            Some(serde_json::json!({"fullName": "Ali", "candidateSequence": "1"}))
        );
    }

    #[test]
    fn test_unknown_gender_rejects_row() {
        let err = validate_row(&record(&[
            ("fullName", "Ali"),
            ("candidateSequence", "1"),
            ("gender", "unknown"),
        ]))
        .unwrap_err();
        assert_eq!(err.error, "Invalid gender value: \"unknown\"");
    }

    #[test]
    fn test_unknown_nomination_type_defaults_to_independent() {
        let mut pairs = valid_pairs();
        pairs.push(("nominationType", "something else"));
        let row = validate_row(&record(&pairs)).unwrap();
        assert_eq!(row.nomination_type, NominationType::Independent);
    }

    #[test]
    fn test_non_numeric_sequence_rejected() {
        let err = validate_row(&record(&[
            ("fullName", "Ali"),
            ("candidateSequence", "twelve"),
            ("gender", "M"),
        ]))
        .unwrap_err();
        assert_eq!(err.error, "Invalid candidate sequence");
    }

    #[test]
    fn test_source_unique_id_takes_precedence() {
        let mut pairs = valid_pairs();
        pairs.push(("uniqueCandidateId", "cand-0042"));
        let row = validate_row(&record(&pairs)).unwrap();
        assert_eq!(row.unique_candidate_id, "cand-0042");
    }

    /// Records every governorate upsert
    #[derive(Default)]
    struct RecordingStore {
        governorates: tokio::sync::Mutex<Vec<NewGovernorate>>,
    }

    #[async_trait::async_trait]
    impl CandidateStore for RecordingStore {
        async fn upsert_party(&self, _party: &NewParty) -> StoreResult<uuid::Uuid> {
            Ok(uuid::Uuid::new_v4())
        }

        async fn upsert_governorate(&self, governorate: &NewGovernorate) -> StoreResult<uuid::Uuid> {
            self.governorates.lock().await.push(governorate.clone());
            Ok(uuid::Uuid::new_v4())
        }

        async fn insert_batch(&self, candidates: &[NewCandidate]) -> StoreResult<u64> {
            Ok(candidates.len() as u64)
        }
    }

    #[tokio::test]
    async fn test_governorate_keeps_source_spelling() {
        let store = RecordingStore::default();
        let mut pairs = valid_pairs();
        pairs.push(("electoralDistrict", " bagdad "));
        let row = validate_row(&record(&pairs)).unwrap();

        let candidate = resolve_row(&store, row, "candidates.csv").await.unwrap();

        let governorates = store.governorates.lock().await;
        assert_eq!(governorates.len(), 1);
        assert_eq!(governorates[0].name, "Baghdad");
        assert_eq!(governorates[0].name_arabic.as_deref(), Some("bagdad"));
        assert_eq!(governorates[0].slug, "baghdad");
        assert!(candidate.governorate_id.is_some());
        assert_eq!(candidate.governorate_name.as_deref(), Some("bagdad"));
    }
}
