//! Command-line parsing for the snapshot pivot tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! tree/query/report code.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::StatField;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "epi",
    version,
    about = "Pivot daily case snapshot CSVs into a date x location table"
)]
pub struct Cli {
    /// Location path `Country.State.Locality`; `*` expands every child at that
    /// level. Missing trailing segments are wildcards.
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Daily snapshot CSV files (one per date, named e.g. `01-22-2020.csv`).
    #[arg(value_name = "FILES", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Which counter to report.
    #[arg(short = 's', long, value_enum, env = "EPI_STAT", default_value_t = StatField::Confirmed)]
    pub stat: StatField,

    /// Emit an all-zero row for dates on which the query path does not exist
    /// (by default those dates are omitted).
    #[arg(long)]
    pub zero_unresolved: bool,

    /// Also write the CSV table to this file.
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Write the table as JSON to this file.
    #[arg(long = "export-json", value_name = "PATH")]
    pub export_json: Option<PathBuf>,

    /// Print loaded/skipped input files to stderr.
    #[arg(long)]
    pub summary: bool,
}
