//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the daily snapshot files
//! - builds the pivot table for the query
//! - prints the table and writes optional exports

use std::io::Write;

use clap::Parser;

use crate::cli::Cli;
use crate::domain::ReportConfig;
use crate::error::AppError;
use crate::query::PathQuery;

pub mod pipeline;

/// Entry point for the `epi` binary.
///
/// Usage errors are reported by clap, which exits with status 2.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = report_config_from_args(&cli);
    handle_report(&config)
}

fn handle_report(config: &ReportConfig) -> Result<(), AppError> {
    let run = pipeline::run_report(config);

    if config.summary {
        eprint!("{}", crate::report::format_ingest_summary(&run.ingest.summary));
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(crate::report::to_csv(&run.table).as_bytes())?;
    stdout.flush()?;

    // Optional exports.
    if let Some(path) = &config.export_csv {
        crate::io::export::write_pivot_csv(path, &run.table)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::export::write_pivot_json(path, &run.table)?;
    }

    Ok(())
}

pub fn report_config_from_args(cli: &Cli) -> ReportConfig {
    ReportConfig {
        query: PathQuery::parse(&cli.query),
        inputs: cli.files.clone(),
        stat: cli.stat,
        zero_unresolved: cli.zero_unresolved,
        export_csv: cli.export.clone(),
        export_json: cli.export_json.clone(),
        summary: cli.summary,
    }
}
