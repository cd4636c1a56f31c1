//! Candidate import binary
//!
//! Loads the official candidate list into the database.
//!
//! Usage:
//!   import-candidates
//!   import-candidates --limit 100
//!   import-candidates --source data/candidates.json --dry-run

use anyhow::{Context, Result};
use clap::Parser;
use hamlet_common::logging::{init_logging, LogConfig, LogLevel};
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

use hamlet_server::{
    config::Config,
    db,
    ingest::{
        config::{DEFAULT_ERROR_LOG, DEFAULT_SOURCE},
        log_summary, open_source, run_import, write_error_log, ImportConfig, ImportReport,
        MemoryCandidateStore, PgCandidateStore, BATCH_SIZE,
    },
};

/// Import election candidates from CSV or JSON
#[derive(Parser, Debug)]
#[command(name = "import-candidates")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Import at most this many rows
    #[arg(long)]
    limit: Option<usize>,

    /// Candidate file (.csv or .json)
    #[arg(long, default_value = DEFAULT_SOURCE)]
    source: PathBuf,

    /// Where to write the per-row error log
    #[arg(long, default_value = DEFAULT_ERROR_LOG)]
    error_log: PathBuf,

    /// Validate and resolve rows without writing to the database
    #[arg(long)]
    dry_run: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Info })
        .log_file_prefix("import-candidates")
        .filter_directives("sqlx=warn")
        .build();
    let log_config = log_config.merge_env().unwrap_or_else(|e| {
        eprintln!("Ignoring invalid logging environment: {}", e);
        LogConfig::default()
    });
    let _guard = match init_logging(&log_config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        },
    };

    let config = ImportConfig {
        source: cli.source,
        error_log: cli.error_log,
        limit: cli.limit,
        dry_run: cli.dry_run,
        batch_size: BATCH_SIZE,
    };

    if let Err(e) = run(&config).await {
        error!(error = %e, "Import failed");
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run(config: &ImportConfig) -> Result<()> {
    config.validate()?;

    info!(source = %config.source.display(), limit = ?config.limit, dry_run = config.dry_run, "Starting candidate import");

    // Fails before any database work when the file is missing
    let records = open_source(&config.source)?;

    let report = if config.dry_run {
        let store = MemoryCandidateStore::new();
        let report = run_import(records, &store, config).await;
        info!(
            parties = store.party_count().await,
            governorates = store.governorate_count().await,
            "Dry run: nothing was written"
        );
        report
    } else {
        let server_config = Config::load()?;
        let pool = db::create_pool(&server_config.database)
            .await
            .context("Failed to connect to the database")?;

        let result = match db::run_migrations(&pool).await {
            Ok(()) => Ok(run_import(records, &PgCandidateStore::new(pool.clone()), config).await),
            Err(e) => Err(e),
        };
        pool.close().await;
        result?
    };

    finish(config, &report)
}

fn finish(config: &ImportConfig, report: &ImportReport) -> Result<()> {
    log_summary(report);

    if report.has_errors() {
        write_error_log(&config.error_log, &report.errors)?;
    }

    Ok(())
}
