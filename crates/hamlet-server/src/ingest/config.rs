//! Import configuration
//!
//! Settings for one run of the candidate import.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Rows per bulk insert
pub const BATCH_SIZE: usize = 100;

/// Default candidate source file
pub const DEFAULT_SOURCE: &str = "data/ElectionCandidates_Original.csv";

/// Default path of the JSON error log
pub const DEFAULT_ERROR_LOG: &str = "logs/import_errors.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportConfig {
    /// CSV or JSON file to read
    pub source: PathBuf,
    /// Where the per-row errors are written when any occur
    pub error_log: PathBuf,
    /// Stop after this many source rows
    pub limit: Option<usize>,
    /// Resolve and count rows without writing to the database
    pub dry_run: bool,
    pub batch_size: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            error_log: PathBuf::from(DEFAULT_ERROR_LOG),
            limit: None,
            dry_run: false,
            batch_size: BATCH_SIZE,
        }
    }
}

impl ImportConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.batch_size == 0 {
            anyhow::bail!("batch_size must be greater than 0");
        }
        if self.limit == Some(0) {
            anyhow::bail!("limit must be greater than 0");
        }
        Ok(())
    }

    /// Source path as recorded in `election_candidates.source_file`
    pub fn source_label(&self) -> String {
        self.source.display().to_string()
    }
}
