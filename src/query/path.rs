//! Location path queries (`Country.State.Locality`, `*` = wildcard).
//!
//! A query selects exactly one tabulation level per snapshot:
//!
//! - literal segments descend one level each
//! - the first wildcard stops descent and selects every named child there
//! - a fully literal path selects the resolved node itself

use std::collections::BTreeMap;
use std::fmt;

use crate::tree::AggregationNode;

pub const WILDCARD: &str = "*";

/// Hierarchy level a query segment applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Country,
    State,
    Locality,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Country, Level::State, Level::Locality];

    pub fn display_name(self) -> &'static str {
        match self {
            Level::Country => "country",
            Level::State => "state",
            Level::Locality => "locality",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Wildcard,
}

impl Segment {
    fn parse(s: &str) -> Self {
        if s == WILDCARD {
            Segment::Wildcard
        } else {
            Segment::Literal(s.to_string())
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(name) => write!(f, "{name}"),
            Segment::Wildcard => write!(f, "{WILDCARD}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathQuery {
    segments: [Segment; 3],
}

/// Locations selected in one snapshot, keyed (and therefore sorted) by name.
pub type Selection<'a> = BTreeMap<&'a str, &'a AggregationNode>;

/// Outcome of resolving a query against one snapshot tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    Selected(Selection<'a>),
    /// A literal segment named a child that does not exist at `level`.
    Unresolved { level: Level },
}

impl<'a> Resolution<'a> {
    /// Selected locations; unresolved queries select nothing.
    pub fn selection(&self) -> Option<&Selection<'a>> {
        match self {
            Resolution::Selected(selection) => Some(selection),
            Resolution::Unresolved { .. } => None,
        }
    }
}

impl PathQuery {
    pub fn new(country: Segment, state: Segment, locality: Segment) -> Self {
        Self {
            segments: [country, state, locality],
        }
    }

    /// Parse a dot-separated query.
    ///
    /// Segments beyond the third are ignored; missing trailing segments are
    /// wildcards. Parsing never fails: an empty segment is the literal empty
    /// name.
    pub fn parse(query: &str) -> Self {
        let mut parts = query.splitn(4, '.');
        let mut next = || parts.next().map(Segment::parse).unwrap_or(Segment::Wildcard);
        let country = next();
        let state = next();
        let locality = next();
        Self::new(country, state, locality)
    }

    /// Query that expands every country.
    pub fn all_countries() -> Self {
        Self::new(Segment::Wildcard, Segment::Wildcard, Segment::Wildcard)
    }

    pub fn segment(&self, level: Level) -> &Segment {
        &self.segments[level as usize]
    }

    /// Level at which the first wildcard expands, if any.
    pub fn wildcard_level(&self) -> Option<Level> {
        Level::ALL
            .into_iter()
            .find(|level| *self.segment(*level) == Segment::Wildcard)
    }

    /// Resolve this query against one snapshot tree.
    pub fn resolve<'a>(&'a self, root: &'a AggregationNode) -> Resolution<'a> {
        let mut node = root;
        for level in Level::ALL {
            match self.segment(level) {
                Segment::Wildcard => {
                    return Resolution::Selected(node.named_children().collect());
                }
                Segment::Literal(name) => match node.child(name) {
                    Some(child) => node = child,
                    None => return Resolution::Unresolved { level },
                },
            }
        }

        let mut selection = Selection::new();
        if let Segment::Literal(name) = self.segment(Level::Locality) {
            selection.insert(name.as_str(), node);
        }
        Resolution::Selected(selection)
    }
}

impl Default for PathQuery {
    fn default() -> Self {
        Self::all_countries()
    }
}

impl fmt::Display for PathQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [country, state, locality] = &self.segments;
        write!(f, "{country}.{state}.{locality}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StatRecord;

    fn lit(s: &str) -> Segment {
        Segment::Literal(s.to_string())
    }

    fn us_tree() -> AggregationNode {
        let mut root = AggregationNode::new();
        root.insert_location(&["US", "California", "Los Angeles"], StatRecord::new(100, 2, 0, 98));
        root.insert_location(&["US", "California", "San Diego"], StatRecord::new(40, 1, 0, 39));
        root.insert_location(&["US", "California", ""], StatRecord::new(5, 0, 0, 5));
        root.insert_location(&["US", "Ohio", "Franklin"], StatRecord::new(7, 0, 0, 7));
        root.insert_location(&["Italy", "Lombardia"], StatRecord::new(300, 20, 10, 270));
        root
    }

    #[test]
    fn parse_fills_missing_segments_with_wildcards() {
        assert_eq!(PathQuery::parse("*"), PathQuery::all_countries());
        assert_eq!(
            PathQuery::parse("US"),
            PathQuery::new(lit("US"), Segment::Wildcard, Segment::Wildcard)
        );
        assert_eq!(
            PathQuery::parse("US.California.*"),
            PathQuery::new(lit("US"), lit("California"), Segment::Wildcard)
        );
    }

    #[test]
    fn parse_ignores_segments_beyond_third() {
        assert_eq!(
            PathQuery::parse("US.California.Los Angeles.extra.more"),
            PathQuery::new(lit("US"), lit("California"), lit("Los Angeles"))
        );
    }

    #[test]
    fn parse_keeps_empty_literals() {
        assert_eq!(
            PathQuery::parse("Japan..*"),
            PathQuery::new(lit("Japan"), lit(""), Segment::Wildcard)
        );
        assert_eq!(PathQuery::parse("Italy.*.*").to_string(), "Italy.*.*");
    }

    #[test]
    fn country_wildcard_selects_every_country() {
        let root = us_tree();
        let query = PathQuery::parse("*");
        let selection = query.resolve(&root).selection().cloned().unwrap();
        let names: Vec<&str> = selection.keys().copied().collect();
        assert_eq!(names, vec!["Italy", "US"]);
        assert_eq!(selection["US"].stats().confirmed, 152);
    }

    #[test]
    fn wildcard_excludes_own_total_child() {
        let root = us_tree();
        let query = PathQuery::parse("US.California.*");
        let resolution = query.resolve(&root);
        let selection = resolution.selection().unwrap();
        let names: Vec<&str> = selection.keys().copied().collect();
        assert_eq!(names, vec!["Los Angeles", "San Diego"]);
        assert_eq!(selection["San Diego"].stats().deaths, 1);
    }

    #[test]
    fn first_wildcard_wins() {
        let root = us_tree();
        let query = PathQuery::parse("US.*.Los Angeles");
        assert_eq!(query.wildcard_level(), Some(Level::State));
        let resolution = query.resolve(&root);
        let names: Vec<&str> = resolution.selection().unwrap().keys().copied().collect();
        assert_eq!(names, vec!["California", "Ohio"]);
    }

    #[test]
    fn missing_literal_is_unresolved() {
        let root = us_tree();
        let query = PathQuery::parse("US.Texas.*");
        let resolution = query.resolve(&root);
        assert_eq!(resolution, Resolution::Unresolved { level: Level::State });
        assert!(resolution.selection().is_none());

        let query = PathQuery::parse("France");
        assert_eq!(
            query.resolve(&root),
            Resolution::Unresolved { level: Level::Country }
        );
    }

    #[test]
    fn fully_literal_path_selects_the_node_itself() {
        let root = us_tree();
        let query = PathQuery::parse("US.California.Los Angeles");
        assert_eq!(query.wildcard_level(), None);

        let first = query.resolve(&root);
        let second = query.resolve(&root);
        assert_eq!(first, second);

        let selection = first.selection().unwrap();
        assert_eq!(selection.len(), 1);
        assert_eq!(selection["Los Angeles"].stats(), StatRecord::new(100, 2, 0, 98));
    }

    #[test]
    fn country_level_data_with_empty_state() {
        let mut root = AggregationNode::new();
        root.insert_location(&["Japan", ""], StatRecord::new(2, 0, 0, 0));
        let query = PathQuery::parse("Japan.*");
        let resolution = query.resolve(&root);
        assert!(matches!(resolution, Resolution::Selected(_)));
        assert!(resolution.selection().unwrap().is_empty());
    }
}
