//! Text rendering for pivot tables and ingest summaries.
//!
//! We keep formatting code in one place so:
//! - the tree/query code stays free of output concerns
//! - stdout and file exports render identical CSV

use crate::io::ingest::IngestSummary;
use crate::report::PivotTable;

/// Render the pivot as CSV: `Date,"<name>",...` then `<date>,<n>,...` per row.
pub fn to_csv(table: &PivotTable) -> String {
    let mut out = String::from("Date");
    for name in &table.columns {
        out.push(',');
        out.push_str(&quote(name));
    }
    out.push('\n');

    for row in &table.rows {
        out.push_str(&row.date);
        for value in &row.values {
            out.push(',');
            out.push_str(&value.to_string());
        }
        out.push('\n');
    }

    out
}

/// Human-readable ingest summary (loaded + skipped files).
pub fn format_ingest_summary(summary: &IngestSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Loaded {} file(s), skipped {}.\n",
        summary.loaded.len(),
        summary.skipped.len()
    ));

    for file in &summary.loaded {
        let mut line = format!(
            "  {} {:<8} rows={}",
            file.date,
            file.schema.display_name(),
            file.rows
        );
        if file.defaulted_fields > 0 {
            line.push_str(&format!(" defaulted={}", file.defaulted_fields));
        }
        if file.replaced_earlier {
            line.push_str(" (replaced earlier file)");
        }
        line.push_str(&format!("  {}", file.path.display()));
        out.push_str(line.trim_end());
        out.push('\n');
    }

    if !summary.skipped.is_empty() {
        out.push_str("Skipped:\n");
        for file in &summary.skipped {
            out.push_str(&format!("  {}: {}\n", file.path.display(), file.reason));
        }
    }

    out
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}
