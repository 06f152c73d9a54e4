//! Hierarchical aggregation node (country -> state -> locality).
//!
//! Every insertion adds its record to each node on the path from the root to
//! the target, so a node's stats always equal the sum of all records inserted
//! at or below it.

use std::collections::BTreeMap;

use crate::domain::StatRecord;

/// Child name holding a location's own totals, as opposed to a named
/// subdivision of it.
pub const OWN_TOTAL: &str = "";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationNode {
    stats: StatRecord,
    children: BTreeMap<String, AggregationNode>,
}

impl AggregationNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk (creating as needed) the nodes named by `path` and combine
    /// `record` into every node visited, including `self` and the last node.
    pub fn insert<S: AsRef<str>>(&mut self, path: &[S], record: StatRecord) {
        let mut node = self;
        node.stats += record;
        for name in path {
            node = node.children.entry(name.as_ref().to_string()).or_default();
            node.stats += record;
        }
    }

    /// Insert a source row located at `names` (broadest first).
    ///
    /// The path is terminated with [`OWN_TOTAL`] so `child("")` of the
    /// narrowest named node holds the rows reported for that exact location.
    pub fn insert_location<S: AsRef<str>>(&mut self, names: &[S], record: StatRecord) {
        let mut path: Vec<&str> = names.iter().map(|name| name.as_ref()).collect();
        path.push(OWN_TOTAL);
        self.insert(path.as_slice(), record);
    }

    pub fn child(&self, name: &str) -> Option<&AggregationNode> {
        self.children.get(name)
    }

    pub fn children(&self) -> &BTreeMap<String, AggregationNode> {
        &self.children
    }

    /// Children that name a real location (everything except [`OWN_TOTAL`]).
    pub fn named_children(&self) -> impl Iterator<Item = (&str, &AggregationNode)> {
        self.children
            .iter()
            .filter(|(name, _)| name.as_str() != OWN_TOTAL)
            .map(|(name, node)| (name.as_str(), node))
    }

    pub fn stats(&self) -> StatRecord {
        self.stats
    }
}
