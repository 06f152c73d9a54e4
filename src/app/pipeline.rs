//! Shared "report pipeline" logic.
//!
//! Keeping this in one place keeps the core workflow free of presentation:
//! files -> snapshots -> time series -> query + union -> pivot table
//!
//! The caller decides what to print or export.

use crate::domain::ReportConfig;
use crate::io::ingest::{IngestedSeries, load_series};
use crate::report::{PivotOptions, PivotTable, build_pivot};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedSeries,
    pub table: PivotTable,
}

/// Ingest every input file and build the pivot table for the configured query.
pub fn run_report(config: &ReportConfig) -> RunOutput {
    let ingest = load_series(config.inputs.as_slice());
    if ingest.series.is_empty() {
        tracing::warn!(inputs = config.inputs.len(), "no input file could be loaded");
    }

    let options = PivotOptions {
        stat: config.stat,
        zero_unresolved: config.zero_unresolved,
    };
    let table = build_pivot(&ingest.series, &config.query, &options);
    tracing::info!(
        query = %config.query,
        first_date = ingest.series.dates().next().unwrap_or("-"),
        last_date = ingest.series.dates().next_back().unwrap_or("-"),
        stat = config.stat.display_name(),
        columns = table.columns.len(),
        rows = table.rows.len(),
        "pivot built"
    );

    RunOutput { ingest, table }
}
