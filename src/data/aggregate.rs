use std::collections::BTreeMap;

use super::filter::FilteredTable;
use super::model::Column;

/// Row counts per distinct value of one column.
///
/// Groups are ordered lexically by key, so the same input always produces
/// the same sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationResult {
    pub column: Column,
    pub groups: Vec<(String, usize)>,
}

impl AggregationResult {
    /// Sum of all group counts.
    pub fn total(&self) -> usize {
        self.groups.iter().map(|(_, count)| count).sum()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Count for a single key, if present.
    #[cfg(test)]
    pub fn count_of(&self, key: &str) -> Option<usize> {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, count)| *count)
    }
}

/// Group the rows of `filtered` by `by` and count each group.
pub fn aggregate(filtered: &FilteredTable<'_>, by: Column) -> AggregationResult {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in filtered.rows() {
        *counts.entry(row.get(by)).or_default() += 1;
    }
    AggregationResult {
        column: by,
        groups: counts
            .into_iter()
            .map(|(key, count)| (key.to_string(), count))
            .collect(),
    }
}
