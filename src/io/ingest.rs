//! CSV ingest for daily snapshot files.
//!
//! Each file is one date. Two upstream layouts exist:
//!
//! - **Legacy**: `Province/State, Country/Region, Confirmed, Deaths, Recovered`
//! - **Admin2**: `Admin2, Province_State, Country_Region, Confirmed, Deaths, Recovered, Active`
//!
//! Design goals:
//! - **Explicit fallback**: each layout is tried via `parse_as`, first `Ok` wins
//! - **Atomic files**: a file either becomes a complete snapshot or is skipped
//! - **Lenient counters**: empty or malformed numbers count as zero

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::StatRecord;
use crate::tree::{AggregationNode, Snapshot, TimeSeries};

/// Upstream file layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    Legacy,
    Admin2,
}

/// Column names for one layout. Location columns run broadest first.
struct Layout {
    locations: &'static [&'static str],
    confirmed: &'static str,
    deaths: &'static str,
    recovered: &'static str,
    active: Option<&'static str>,
}

const LEGACY: Layout = Layout {
    locations: &["Country/Region", "Province/State"],
    confirmed: "Confirmed",
    deaths: "Deaths",
    recovered: "Recovered",
    active: None,
};

const ADMIN2: Layout = Layout {
    locations: &["Country_Region", "Province_State", "Admin2"],
    confirmed: "Confirmed",
    deaths: "Deaths",
    recovered: "Recovered",
    active: Some("Active"),
};

impl Schema {
    /// Layouts in the order they are attempted.
    pub const ALL: [Schema; 2] = [Schema::Legacy, Schema::Admin2];

    pub fn display_name(self) -> &'static str {
        match self {
            Schema::Legacy => "legacy",
            Schema::Admin2 => "admin2",
        }
    }

    fn layout(self) -> &'static Layout {
        match self {
            Schema::Legacy => &LEGACY,
            Schema::Admin2 => &ADMIN2,
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("missing column `{column}` for {schema} layout")]
    MissingColumn { schema: Schema, column: &'static str },
    #[error("CSV error under {schema} layout: {source}")]
    Csv { schema: Schema, source: csv::Error },
    #[error("'{}' matches no known layout ({reasons})", .path.display())]
    Unrecognized { path: PathBuf, reasons: String },
}

/// A fully built snapshot plus what it took to build it.
#[derive(Debug, Clone)]
pub struct ParsedSnapshot {
    pub snapshot: Snapshot,
    pub schema: Schema,
    pub rows: usize,
    /// Non-empty counter fields that failed to parse and were read as zero.
    pub defaulted_fields: usize,
}

#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub date: String,
    pub schema: Schema,
    pub rows: usize,
    pub defaulted_fields: usize,
    /// An earlier input already supplied this date and was replaced.
    pub replaced_earlier: bool,
}

#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct IngestSummary {
    pub loaded: Vec<LoadedFile>,
    pub skipped: Vec<SkippedFile>,
}

/// Ingest output: the series plus per-file bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct IngestedSeries {
    pub series: TimeSeries,
    pub summary: IngestSummary,
}

/// Load every input in order. Unreadable or unrecognized files are skipped;
/// a later file for the same date replaces the earlier one.
pub fn load_series<P: AsRef<Path>>(paths: &[P]) -> IngestedSeries {
    let mut out = IngestedSeries::default();

    for path in paths {
        let path = path.as_ref();
        match load_snapshot(path) {
            Ok(parsed) => {
                let date = parsed.snapshot.date().to_string();
                let replaced_earlier = out.series.insert(parsed.snapshot).is_some();
                if replaced_earlier {
                    tracing::warn!(path = %path.display(), %date, "replacing earlier snapshot for this date");
                }
                tracing::debug!(
                    path = %path.display(),
                    %date,
                    schema = %parsed.schema,
                    rows = parsed.rows,
                    "loaded snapshot"
                );
                out.summary.loaded.push(LoadedFile {
                    path: path.to_path_buf(),
                    date,
                    schema: parsed.schema,
                    rows: parsed.rows,
                    defaulted_fields: parsed.defaulted_fields,
                    replaced_earlier,
                });
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping input file");
                out.summary.skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        loaded = out.summary.loaded.len(),
        skipped = out.summary.skipped.len(),
        dates = out.series.len(),
        "ingest complete"
    );
    out
}

/// Read one file and parse it under the first layout that accepts it.
pub fn load_snapshot(path: &Path) -> Result<ParsedSnapshot, IngestError> {
    let data = std::fs::read(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let date = date_key_from_path(path);

    let mut reasons = Vec::new();
    for schema in Schema::ALL {
        match parse_as(schema, &data, &date) {
            Ok(parsed) => return Ok(parsed),
            Err(e) => {
                tracing::debug!(path = %path.display(), %schema, error = %e, "layout rejected");
                reasons.push(e.to_string());
            }
        }
    }

    Err(IngestError::Unrecognized {
        path: path.to_path_buf(),
        reasons: reasons.join("; "),
    })
}

/// Parse CSV bytes under one layout into a snapshot for `date`.
///
/// Every row is inserted with its full location path, so each named location
/// gets an own-total child. Any CSV error fails the whole file.
pub fn parse_as(schema: Schema, data: &[u8], date: &str) -> Result<ParsedSnapshot, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|source| IngestError::Csv { schema, source })?
        .clone();
    let columns = ColumnIndex::resolve(schema, &build_header_map(&headers))?;

    let mut root = AggregationNode::new();
    let mut rows = 0usize;
    let mut defaulted_fields = 0usize;

    for result in reader.records() {
        let record = result.map_err(|source| IngestError::Csv { schema, source })?;
        rows += 1;

        let names: Vec<&str> = columns
            .locations
            .iter()
            .map(|&idx| record.get(idx).unwrap_or(""))
            .collect();

        let mut count = |idx: Option<usize>| -> u64 {
            let raw = idx.and_then(|i| record.get(i)).unwrap_or("");
            parse_count(raw).unwrap_or_else(|| {
                tracing::debug!(date, value = raw, "malformed counter read as zero");
                defaulted_fields += 1;
                0
            })
        };
        let stats = StatRecord::new(
            count(Some(columns.confirmed)),
            count(Some(columns.deaths)),
            count(Some(columns.recovered)),
            count(columns.active),
        );

        root.insert_location(names.as_slice(), stats);
    }

    Ok(ParsedSnapshot {
        snapshot: Snapshot::new(date, root),
        schema,
        rows,
        defaulted_fields,
    })
}

/// Date identifier for an input file: the base name without extension,
/// normalized to `YYYY-MM-DD` when it is a recognizable date.
pub fn date_key_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    normalize_date_stem(&stem)
}

/// Upstream names daily files `MM-DD-YYYY`; rewriting them as ISO dates keeps
/// lexicographic order chronological. Unrecognized stems pass through.
pub fn normalize_date_stem(stem: &str) -> String {
    const FMTS: [&str; 2] = ["%Y-%m-%d", "%m-%d-%Y"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(stem, fmt) {
            return d.format("%Y-%m-%d").to_string();
        }
    }
    stem.to_string()
}

/// Resolved column positions for one layout.
struct ColumnIndex {
    locations: Vec<usize>,
    confirmed: usize,
    deaths: usize,
    recovered: usize,
    active: Option<usize>,
}

impl ColumnIndex {
    fn resolve(schema: Schema, header_map: &HashMap<String, usize>) -> Result<Self, IngestError> {
        let layout = schema.layout();
        let find = |column: &'static str| {
            header_map
                .get(&normalize_header_name(column))
                .copied()
                .ok_or(IngestError::MissingColumn { schema, column })
        };

        let locations = layout
            .locations
            .iter()
            .map(|&column| find(column))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            locations,
            confirmed: find(layout.confirmed)?,
            deaths: find(layout.deaths)?,
            recovered: find(layout.recovered)?,
            active: layout.active.map(find).transpose()?,
        })
    }
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Upstream files are often saved with a UTF-8 BOM in front of the first
    // header; without stripping it that column never matches.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

/// Parse a counter field. Empty means zero; `None` means malformed.
fn parse_count(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0);
    }
    if let Ok(v) = raw.parse::<u64>() {
        return Some(v);
    }
    // Some exports write counts as floats (`12.0`). Values past `u64::MAX`
    // would saturate in the cast, so they count as malformed.
    let v = raw.parse::<f64>().ok()?;
    if v.is_finite() && v >= 0.0 && v < u64::MAX as f64 {
        Some(v.trunc() as u64)
    } else {
        None
    }
}
