use std::collections::BTreeSet;

use super::model::{Column, Engagement, EngagementTable};

// ---------------------------------------------------------------------------
// Selection: which values are chosen per column
// ---------------------------------------------------------------------------

/// Per-column selection state.
///
/// An empty set means "no constraint on that column", so a default
/// `Selection` keeps every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    sets: [BTreeSet<String>; 3],
}

impl Selection {
    /// Selected values for `column`.
    pub fn get(&self, column: Column) -> &BTreeSet<String> {
        &self.sets[column.index()]
    }

    pub fn contains(&self, column: Column, value: &str) -> bool {
        self.get(column).contains(value)
    }

    /// Add or remove a single value. Returns whether it is now selected.
    pub fn toggle(&mut self, column: Column, value: &str) -> bool {
        let set = &mut self.sets[column.index()];
        if set.remove(value) {
            false
        } else {
            set.insert(value.to_string());
            true
        }
    }

    #[cfg(test)]
    pub fn insert(&mut self, column: Column, value: impl Into<String>) {
        self.sets[column.index()].insert(value.into());
    }

    pub fn clear(&mut self, column: Column) {
        self.sets[column.index()].clear();
    }

    pub fn clear_all(&mut self) {
        for set in &mut self.sets {
            set.clear();
        }
    }

    /// True when no column carries a constraint.
    pub fn is_empty(&self) -> bool {
        self.sets.iter().all(BTreeSet::is_empty)
    }

    /// Drop selected values that no longer occur in `table`.
    pub fn retain_present(&mut self, table: &EngagementTable) {
        for column in Column::ALL {
            let present = table.unique_values(column);
            self.sets[column.index()].retain(|v| present.iter().any(|p| p == v));
        }
    }

    /// Whether `row` passes every active column constraint.
    pub fn matches(&self, row: &Engagement) -> bool {
        Column::ALL.iter().all(|&column| {
            let selected = self.get(column);
            selected.is_empty() || selected.contains(row.get(column))
        })
    }
}

// ---------------------------------------------------------------------------
// FilteredTable: a read-only view over the rows passing a selection
// ---------------------------------------------------------------------------

/// Rows of a table that passed a [`Selection`], kept in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredTable<'a> {
    table: &'a EngagementTable,
    indices: Vec<usize>,
}

impl<'a> FilteredTable<'a> {
    /// A view over an entire table.
    pub fn all(table: &'a EngagementTable) -> Self {
        FilteredTable {
            table,
            indices: (0..table.len()).collect(),
        }
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over the retained rows.
    pub fn rows(&self) -> impl Iterator<Item = &'a Engagement> + '_ {
        let rows = self.table.rows();
        self.indices.iter().map(move |&i| &rows[i])
    }
}

/// Apply `selection` to `table`.
///
/// A row passes when, for every column with a non-empty selection, its
/// value is one of the selected values. With an empty selection nothing is
/// filtered and the result covers the whole table.
pub fn filter<'a>(table: &'a EngagementTable, selection: &Selection) -> FilteredTable<'a> {
    if selection.is_empty() {
        return FilteredTable::all(table);
    }
    let indices = table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| selection.matches(row))
        .map(|(i, _)| i)
        .collect();
    FilteredTable { table, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> EngagementTable {
        EngagementTable::from_rows(vec![
            Engagement::new("S1", "C1", "P1"),
            Engagement::new("S1", "C2", "P1"),
            Engagement::new("S2", "C1", "P2"),
        ])
    }

    fn collect<'a>(view: &FilteredTable<'a>) -> Vec<&'a Engagement> {
        view.rows().collect()
    }

    #[test]
    fn empty_selection_is_identity() {
        let table = sample_table();
        let view = filter(&table, &Selection::default());

        assert_eq!(view.len(), table.len());
        assert_eq!(collect(&view), table.rows().iter().collect::<Vec<_>>());
    }

    #[test]
    fn single_column_selection_is_sound_and_complete() {
        let table = sample_table();
        let mut selection = Selection::default();
        selection.insert(Column::Company, "C1");

        let view = filter(&table, &selection);
        let kept = collect(&view);

        assert!(kept.iter().all(|r| r.company == "C1"));
        let expected = table.rows().iter().filter(|r| r.company == "C1").count();
        assert_eq!(kept.len(), expected);
    }

    #[test]
    fn values_within_a_column_are_ored() {
        let table = sample_table();
        let mut selection = Selection::default();
        selection.insert(Column::Company, "C1");
        selection.insert(Column::Company, "C2");

        assert_eq!(filter(&table, &selection).len(), 3);
    }

    #[test]
    fn columns_are_anded() {
        let table = sample_table();
        let mut selection = Selection::default();
        selection.insert(Column::Supplier, "S1");
        selection.insert(Column::Company, "C1");

        let view = filter(&table, &selection);
        let kept = collect(&view);
        assert_eq!(kept, vec![&Engagement::new("S1", "C1", "P1")]);
    }

    #[test]
    fn no_match_gives_empty_view() {
        let table = sample_table();
        let mut selection = Selection::default();
        selection.insert(Column::Supplier, "S9");

        let view = filter(&table, &selection);
        assert!(view.is_empty());
        assert!(view.into_indices().is_empty());
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = Selection::default();
        assert!(selection.toggle(Column::Product, "P1"));
        assert!(selection.contains(Column::Product, "P1"));
        assert!(!selection.toggle(Column::Product, "P1"));
        assert!(selection.is_empty());
    }

    #[test]
    fn retain_present_drops_stale_values() {
        let table = sample_table();
        let mut selection = Selection::default();
        selection.insert(Column::Supplier, "S1");
        selection.insert(Column::Supplier, "gone");

        selection.retain_present(&table);
        assert_eq!(selection.get(Column::Supplier).len(), 1);
        assert!(selection.contains(Column::Supplier, "S1"));
    }
}
