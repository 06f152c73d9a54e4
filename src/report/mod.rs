//! Reporting: location union + date x location pivot.
//!
//! The pivot is built in two pure passes over the series:
//!
//! 1. union the names selected on every date (so a location seen on any date
//!    gets a column)
//! 2. emit one row per date, zero-filling locations that date did not select
//!
//! Rendering lives in `format` so the table itself stays easy to test.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::StatField;
use crate::query::{PathQuery, Resolution};
use crate::tree::TimeSeries;

pub mod format;

pub use format::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PivotOptions {
    pub stat: StatField,
    /// Emit an all-zero row for dates whose literal path does not resolve.
    /// Such dates are dropped otherwise.
    pub zero_unresolved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotRow {
    pub date: String,
    /// One value per column, in column order.
    pub values: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotTable {
    pub query: String,
    pub stat: StatField,
    /// Location names, sorted.
    pub columns: Vec<String>,
    pub rows: Vec<PivotRow>,
}

/// Union of every location name the query selects across all dates.
pub fn collect_locations(series: &TimeSeries, query: &PathQuery) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for snapshot in series.iter() {
        let resolution = query.resolve(snapshot.root());
        if let Some(selection) = resolution.selection() {
            names.extend(selection.keys().map(|name| name.to_string()));
        }
    }
    names
}

/// Build the date x location table for `query`.
pub fn build_pivot(series: &TimeSeries, query: &PathQuery, options: &PivotOptions) -> PivotTable {
    let columns: Vec<String> = collect_locations(series, query).into_iter().collect();

    let mut rows = Vec::with_capacity(series.len());
    for snapshot in series.iter() {
        let resolution = query.resolve(snapshot.root());
        let selection = match &resolution {
            Resolution::Selected(selection) => selection,
            Resolution::Unresolved { level } => {
                tracing::debug!(
                    date = snapshot.date(),
                    level = level.display_name(),
                    %query,
                    "query path not present on this date"
                );
                if options.zero_unresolved {
                    rows.push(PivotRow {
                        date: snapshot.date().to_string(),
                        values: vec![0; columns.len()],
                    });
                }
                continue;
            }
        };

        let values = columns
            .iter()
            .map(|name| {
                selection
                    .get(name.as_str())
                    .map(|node| options.stat.get(&node.stats()))
                    .unwrap_or(0)
            })
            .collect();

        rows.push(PivotRow {
            date: snapshot.date().to_string(),
            values,
        });
    }

    PivotTable {
        query: query.to_string(),
        stat: options.stat,
        columns,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StatRecord;
    use crate::tree::{AggregationNode, Snapshot};

    fn snapshot(date: &str, rows: &[(&str, &str, StatRecord)]) -> Snapshot {
        let mut root = AggregationNode::new();
        for (country, state, record) in rows {
            root.insert_location(&[*country, *state], *record);
        }
        Snapshot::new(date, root)
    }

    fn value(table: &PivotTable, date: &str, location: &str) -> Option<u64> {
        let col = table.columns.iter().position(|c| c == location)?;
        let row = table.rows.iter().find(|r| r.date == date)?;
        row.values.get(col).copied()
    }

    fn confirmed(n: u64) -> StatRecord {
        StatRecord::new(n, 0, 0, 0)
    }

    fn sample_series() -> TimeSeries {
        vec![
            snapshot("2020-01-22", &[("China", "Hubei", StatRecord::new(444, 17, 28, 0))]),
            snapshot(
                "2020-01-23",
                &[
                    ("China", "Hubei", StatRecord::new(549, 24, 31, 0)),
                    ("Japan", "", confirmed(1)),
                ],
            ),
            snapshot("2020-01-24", &[("Japan", "", confirmed(2))]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn columns_are_union_across_dates() {
        let series = sample_series();
        let names = collect_locations(&series, &PathQuery::parse("*"));
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["China", "Japan"]);
    }

    #[test]
    fn absent_locations_are_zero_filled() {
        let series = sample_series();
        let table = build_pivot(&series, &PathQuery::parse("*"), &PivotOptions::default());

        assert_eq!(table.rows.len(), 3);
        assert_eq!(value(&table, "2020-01-22", "China"), Some(444));
        assert_eq!(value(&table, "2020-01-22", "Japan"), Some(0));
        assert_eq!(value(&table, "2020-01-23", "China"), Some(549));
        assert_eq!(value(&table, "2020-01-24", "China"), Some(0));
        assert_eq!(value(&table, "2020-01-24", "Japan"), Some(2));
    }

    #[test]
    fn selected_stat_is_reported() {
        let series = sample_series();
        let options = PivotOptions {
            stat: StatField::Deaths,
            ..PivotOptions::default()
        };
        let table = build_pivot(&series, &PathQuery::parse("China.*"), &options);
        assert_eq!(table.columns, vec!["Hubei".to_string()]);
        assert_eq!(table.stat, StatField::Deaths);
        assert_eq!(value(&table, "2020-01-23", "Hubei"), Some(24));
    }

    #[test]
    fn unresolved_dates_are_dropped_by_default() {
        let series = sample_series();
        let table = build_pivot(&series, &PathQuery::parse("China.*"), &PivotOptions::default());
        let dates: Vec<&str> = table.rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2020-01-22", "2020-01-23"]);
        assert_eq!(table.columns, vec!["Hubei".to_string()]);
    }

    #[test]
    fn unresolved_dates_can_be_zero_filled() {
        let series = sample_series();
        let options = PivotOptions {
            zero_unresolved: true,
            ..PivotOptions::default()
        };
        let table = build_pivot(&series, &PathQuery::parse("China.*"), &options);
        let dates: Vec<&str> = table.rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2020-01-22", "2020-01-23", "2020-01-24"]);
        assert_eq!(table.rows[2].values, vec![0]);
    }

    #[test]
    fn empty_series_has_no_columns_or_rows() {
        let table = build_pivot(&TimeSeries::new(), &PathQuery::parse("*"), &PivotOptions::default());
        assert!(table.columns.is_empty());
        assert!(table.rows.is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_series() -> impl Strategy<Value = TimeSeries> {
            let country = prop::sample::select(vec!["China", "Italy", "Japan", "US", "Iran"]);
            let day = prop::collection::vec((country, 0u64..10_000), 0..6);
            prop::collection::vec(day, 1..6).prop_map(|days| {
                days.into_iter()
                    .enumerate()
                    .map(|(i, rows)| {
                        let mut root = AggregationNode::new();
                        for (country, n) in rows {
                            root.insert_location(&[country, ""], StatRecord::new(n, 0, 0, 0));
                        }
                        Snapshot::new(format!("2020-03-{:02}", i + 1), root)
                    })
                    .collect()
            })
        }

        proptest! {
            #[test]
            fn every_expanded_name_gets_a_column(series in arb_series()) {
                let table = build_pivot(&series, &PathQuery::parse("*"), &PivotOptions::default());
                let mut expected = BTreeSet::new();
                for snapshot in series.iter() {
                    for (name, _) in snapshot.root().named_children() {
                        expected.insert(name.to_string());
                    }
                }
                let columns: BTreeSet<String> = table.columns.iter().cloned().collect();
                prop_assert_eq!(columns, expected);
            }

            #[test]
            fn cells_match_tree_or_zero(series in arb_series()) {
                let table = build_pivot(&series, &PathQuery::parse("*"), &PivotOptions::default());
                prop_assert_eq!(table.rows.len(), series.len());
                for (row, snapshot) in table.rows.iter().zip(series.iter()) {
                    for (col, name) in table.columns.iter().enumerate() {
                        let expected = snapshot
                            .root()
                            .child(name)
                            .map(|node| node.stats().confirmed)
                            .unwrap_or(0);
                        prop_assert_eq!(row.values[col], expected);
                    }
                }
            }
        }
    }
}
