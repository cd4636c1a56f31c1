//! Candidate source readers
//!
//! CSV files are streamed record by record. JSON exports are a single array
//! of objects. A record that cannot be decoded is yielded as a
//! [`RecordError`] and the stream continues.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::models::RawRecord;

/// Failures that prevent reading the source at all
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to open source file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported source format for {0} (expected .csv or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("Failed to read CSV header: {0}")]
    CsvHeader(#[from] csv::Error),

    #[error("Failed to parse JSON source: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON source must be an array of candidate objects")]
    NotAnArray,
}

/// A single undecodable record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Row {row}: {message}")]
pub struct RecordError {
    pub row: usize,
    pub message: String,
}

pub type RecordResult = Result<RawRecord, RecordError>;

pub type RecordStream = Box<dyn Iterator<Item = RecordResult> + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Json,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(SourceError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Open `path` and return its records, format chosen by extension
pub fn open_source(path: &Path) -> Result<RecordStream, SourceError> {
    let format = SourceFormat::from_path(path)?;
    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    tracing::debug!(path = %path.display(), ?format, "Opened candidate source");

    match format {
        SourceFormat::Csv => csv_records(reader),
        SourceFormat::Json => json_records(reader),
    }
}

/// CSV records; row numbers count the header line, so the first record is row 2
pub fn csv_records<R>(reader: R) -> Result<RecordStream, SourceError>
where
    R: Read + Send + 'static,
{
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers()?.clone();

    let records = reader
        .into_records()
        .enumerate()
        .map(move |(index, result)| {
            let row = index + 2;
            let record = result.map_err(|e| RecordError {
                row,
                message: format!("Failed to decode CSV record: {}", e),
            })?;

            let mut raw = RawRecord::new(row);
            for (header, value) in headers.iter().zip(record.iter()) {
                raw.insert(header, value);
            }
            Ok(raw)
        });

    Ok(Box::new(records))
}

/// JSON array records; the first element is row 1
pub fn json_records<R: Read>(reader: R) -> Result<RecordStream, SourceError> {
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    let serde_json::Value::Array(items) = value else {
        return Err(SourceError::NotAnArray);
    };

    let records = items.into_iter().enumerate().map(|(index, item)| {
        let row = index + 1;
        let serde_json::Value::Object(object) = item else {
            return Err(RecordError {
                row,
                message: "Record is not a JSON object".to_string(),
            });
        };

        let mut raw = RawRecord::new(row);
        for (key, value) in object {
            match value {
                serde_json::Value::Null => {},
                serde_json::Value::String(s) => raw.insert(&key, s),
                other => raw.insert(&key, other.to_string()),
            }
        }
        Ok(raw)
    });

    Ok(Box::new(records))
}
