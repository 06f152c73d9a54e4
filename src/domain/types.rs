//! Shared domain types.
//!
//! These types are intentionally kept small and serializable so they can be:
//!
//! - accumulated in-memory while building snapshot trees
//! - exported to JSON/CSV as part of the pivot table
//! - selected from the command line (`StatField`)

use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::query::PathQuery;

/// Cumulative case counters reported by one source row (or accumulated over
/// many rows at an aggregation node).
///
/// The all-zero record (`Default`) is the identity for [`StatRecord::combine`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRecord {
    pub confirmed: u64,
    pub deaths: u64,
    pub recovered: u64,
    pub active: u64,
}

impl StatRecord {
    pub fn new(confirmed: u64, deaths: u64, recovered: u64, active: u64) -> Self {
        Self {
            confirmed,
            deaths,
            recovered,
            active,
        }
    }

    /// Componentwise sum of two records, saturating at `u64::MAX`.
    pub fn combine(self, other: StatRecord) -> StatRecord {
        StatRecord {
            confirmed: self.confirmed.saturating_add(other.confirmed),
            deaths: self.deaths.saturating_add(other.deaths),
            recovered: self.recovered.saturating_add(other.recovered),
            active: self.active.saturating_add(other.active),
        }
    }
}

impl Add for StatRecord {
    type Output = StatRecord;

    fn add(self, rhs: StatRecord) -> StatRecord {
        self.combine(rhs)
    }
}

impl AddAssign for StatRecord {
    fn add_assign(&mut self, rhs: StatRecord) {
        *self = self.combine(rhs);
    }
}

impl Sum for StatRecord {
    fn sum<I: Iterator<Item = StatRecord>>(iter: I) -> StatRecord {
        iter.fold(StatRecord::default(), StatRecord::combine)
    }
}

/// Which counter a pivot table reports.
///
/// The upstream tool only ever reported `confirmed`; the other three are
/// selectable via `--stat`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StatField {
    #[default]
    Confirmed,
    Deaths,
    Recovered,
    Active,
}

impl StatField {
    pub const ALL: [StatField; 4] = [
        StatField::Confirmed,
        StatField::Deaths,
        StatField::Recovered,
        StatField::Active,
    ];

    /// Extract this counter from a record.
    pub fn get(self, record: &StatRecord) -> u64 {
        match self {
            StatField::Confirmed => record.confirmed,
            StatField::Deaths => record.deaths,
            StatField::Recovered => record.recovered,
            StatField::Active => record.active,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            StatField::Confirmed => "confirmed",
            StatField::Deaths => "deaths",
            StatField::Recovered => "recovered",
            StatField::Active => "active",
        }
    }
}

/// Fully resolved run configuration (CLI args + environment defaults).
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub query: PathQuery,
    pub inputs: Vec<PathBuf>,
    pub stat: StatField,
    /// Emit an all-zero row for dates whose literal query path does not
    /// resolve, instead of dropping them.
    pub zero_unresolved: bool,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
    pub summary: bool,
}
