//! Candidate import pipeline
//!
//! Reads the official candidate list (CSV) or the JSON export, normalizes
//! each row and loads it into PostgreSQL in batches.
//!
//! # Architecture
//!
//! - [`source`]: CSV/JSON readers producing [`RawRecord`]s
//! - [`columns`]: header keys per logical field, first match wins
//! - [`pipeline`]: validation, party/governorate resolution, batching
//! - [`storage`]: [`CandidateStore`] with PostgreSQL and in-memory backends
//!
//! # Example
//!
//! ```no_run
//! use hamlet_server::ingest::{open_source, run_import, ImportConfig, MemoryCandidateStore};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ImportConfig::default();
//! let records = open_source(&config.source)?;
//! let store = MemoryCandidateStore::new();
//! let report = run_import(records, &store, &config).await;
//! println!("imported {} of {}", report.imported, report.processed);
//! # Ok(())
//! # }
//! ```

pub mod columns;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod source;
pub mod storage;

pub use config::{ImportConfig, BATCH_SIZE};
pub use models::{ImportError, ImportReport, NewCandidate, RawRecord};
pub use pipeline::{log_summary, run_import, write_error_log};
pub use source::{open_source, RecordError, SourceError};
pub use storage::{CandidateStore, MemoryCandidateStore, PgCandidateStore, StoreError};
