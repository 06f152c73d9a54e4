//! Per-date snapshots and the date-ordered store they live in.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::tree::node::AggregationNode;

/// The aggregation tree for a single date.
///
/// A snapshot is built completely before it reaches a [`TimeSeries`] and only
/// shared immutably afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    date: String,
    root: AggregationNode,
}

impl Snapshot {
    pub fn new(date: impl Into<String>, root: AggregationNode) -> Self {
        Self {
            date: date.into(),
            root,
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn root(&self) -> &AggregationNode {
        &self.root
    }
}

/// Snapshots keyed by date identifier, iterated in ascending key order.
///
/// ISO-like identifiers (`YYYY-MM-DD`) make lexicographic order chronological.
#[derive(Debug, Clone, Default)]
pub struct TimeSeries {
    snapshots: BTreeMap<String, Snapshot>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a snapshot, replacing (not merging with) any earlier snapshot of
    /// the same date. Returns the replaced snapshot, if any.
    pub fn insert(&mut self, snapshot: Snapshot) -> Option<Snapshot> {
        match self.snapshots.entry(snapshot.date.clone()) {
            Entry::Occupied(mut slot) => Some(std::mem::replace(slot.get_mut(), snapshot)),
            Entry::Vacant(slot) => {
                slot.insert(snapshot);
                None
            }
        }
    }

    pub fn get(&self, date: &str) -> Option<&Snapshot> {
        self.snapshots.get(date)
    }

    /// Snapshots in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.values()
    }

    /// Date keys, ascending.
    pub fn dates(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.snapshots.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl FromIterator<Snapshot> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = Snapshot>>(iter: I) -> Self {
        let mut series = TimeSeries::new();
        for snapshot in iter {
            series.insert(snapshot);
        }
        series
    }
}
