use std::path::PathBuf;
use std::sync::Arc;

use crate::dashboard::{build_dashboard, Dashboard};
use crate::data::filter::Selection;
use crate::data::loader::LoaderConfig;
use crate::data::model::{Column, EngagementTable};
use crate::data::source::{FileSource, TableCache};
use crate::error::{EmptyResultWarning, LoadError};

pub const IDLE_MESSAGE: &str = "Please select your filters and click 'Search' to see the data.";

// ---------------------------------------------------------------------------
// View – what the central panel shows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Nothing computed for the current selection yet.
    Idle,
    /// Search ran and matched no rows.
    NoResults(EmptyResultWarning),
    /// Search ran and produced charts.
    Results(Dashboard),
}

impl View {
    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        !matches!(self, View::Idle)
    }
}

/// A discrete user interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Toggle { column: Column, value: String },
    ClearColumn(Column),
    ClearAll,
    Search,
    Reload,
    Open(PathBuf),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    cache: TableCache,

    /// Settings applied to files opened from the UI.
    loader_config: LoaderConfig,

    /// Currently active table (shared, never mutated).
    pub table: Arc<EngagementTable>,

    /// Per-column filter selections.
    pub selection: Selection,

    /// Result of the last search, or `Idle` since the last interaction.
    pub view: View,

    /// Per-column text used to narrow the option lists.
    pub option_queries: [String; 3],

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load the table through `cache`. A load failure here is fatal.
    pub fn new(mut cache: TableCache, loader_config: LoaderConfig) -> Result<Self, LoadError> {
        let table = cache.get()?;
        Ok(Self {
            cache,
            loader_config,
            table,
            selection: Selection::default(),
            view: View::Idle,
            option_queries: Default::default(),
            status_message: None,
        })
    }

    pub fn source_description(&self) -> String {
        self.cache.describe()
    }

    pub fn option_query_mut(&mut self, column: Column) -> &mut String {
        &mut self.option_queries[column.index()]
    }

    /// Apply one event.
    ///
    /// Only `Search` runs the pipeline; every other interaction leaves the
    /// view `Idle` until the next search.
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Toggle { column, value } => {
                self.selection.toggle(column, &value);
                self.view = View::Idle;
            }
            Event::ClearColumn(column) => {
                self.selection.clear(column);
                self.view = View::Idle;
            }
            Event::ClearAll => {
                self.selection.clear_all();
                self.view = View::Idle;
            }
            Event::Search => self.search(),
            Event::Reload => {
                let result = self.cache.refresh();
                self.install(result);
            }
            Event::Open(path) => {
                let source = FileSource::new(path, self.loader_config.clone());
                let result = self.cache.replace_source(Box::new(source));
                self.install(result);
            }
        }
    }

    fn search(&mut self) {
        log::info!(
            "Search over {} rows ({} / {} / {} values selected)",
            self.table.len(),
            self.selection.get(Column::Supplier).len(),
            self.selection.get(Column::Company).len(),
            self.selection.get(Column::Product).len(),
        );
        self.view = match build_dashboard(&self.table, &self.selection) {
            Ok(dashboard) => View::Results(dashboard),
            Err(warning) => View::NoResults(warning),
        };
    }

    fn install(&mut self, result: Result<Arc<EngagementTable>, LoadError>) {
        match result {
            Ok(table) => {
                self.table = table;
                self.selection.retain_present(&self.table);
                self.view = View::Idle;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load data: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Engagement;
    use crate::data::source::tests::FakeSource;

    fn sample_rows() -> Vec<Engagement> {
        vec![
            Engagement::new("S1", "C1", "P1"),
            Engagement::new("S1", "C2", "P1"),
            Engagement::new("S2", "C1", "P2"),
        ]
    }

    fn state_with(source: FakeSource) -> AppState {
        AppState::new(TableCache::new(Box::new(source)), LoaderConfig::default()).unwrap()
    }

    fn toggle(column: Column, value: &str) -> Event {
        Event::Toggle {
            column,
            value: value.to_string(),
        }
    }

    #[test]
    fn starts_idle_with_options_available() {
        let state = state_with(FakeSource::new(sample_rows()));
        assert_eq!(state.view, View::Idle);
        assert_eq!(state.table.unique_values(Column::Supplier), ["S1", "S2"]);
    }

    #[test]
    fn selection_changes_do_not_compute() {
        let mut state = state_with(FakeSource::new(sample_rows()));
        state.handle(toggle(Column::Supplier, "S1"));
        assert_eq!(state.view, View::Idle);
        assert!(state.selection.contains(Column::Supplier, "S1"));
    }

    #[test]
    fn search_activates_and_interaction_returns_to_idle() {
        let mut state = state_with(FakeSource::new(sample_rows()));
        state.handle(toggle(Column::Supplier, "S1"));
        state.handle(Event::Search);

        match &state.view {
            View::Results(dashboard) => assert_eq!(dashboard.total_engagements, 2),
            other => panic!("expected results, got {other:?}"),
        }

        state.handle(toggle(Column::Company, "C1"));
        assert_eq!(state.view, View::Idle);
    }

    #[test]
    fn empty_search_shows_warning_and_allows_retry() {
        let mut state = state_with(FakeSource::new(sample_rows()));
        state.handle(toggle(Column::Supplier, "S9"));
        state.handle(Event::Search);
        assert_eq!(state.view, View::NoResults(EmptyResultWarning));

        state.handle(Event::ClearAll);
        state.handle(Event::Search);
        match &state.view {
            View::Results(dashboard) => assert_eq!(dashboard.total_engagements, 3),
            other => panic!("expected results, got {other:?}"),
        }
    }

    #[test]
    fn repeated_search_gives_identical_results() {
        let mut state = state_with(FakeSource::new(sample_rows()));
        state.handle(toggle(Column::Product, "P1"));
        state.handle(Event::Search);
        let first = state.view.clone();
        state.handle(Event::Search);
        assert_eq!(state.view, first);
    }

    #[test]
    fn reload_swaps_table_and_prunes_selection() {
        let source = FakeSource::new(sample_rows());
        let handles = source.handles();
        let mut state = state_with(source);
        state.handle(toggle(Column::Supplier, "S2"));
        state.handle(toggle(Column::Supplier, "S1"));
        state.handle(Event::Search);

        handles.rows.borrow_mut().retain(|r| r.supplier != "S2");
        state.handle(Event::Reload);

        assert_eq!(state.table.len(), 2);
        assert_eq!(state.view, View::Idle);
        assert!(!state.selection.contains(Column::Supplier, "S2"));
        assert!(state.selection.contains(Column::Supplier, "S1"));
        assert_eq!(handles.loads.get(), 2);
    }

    #[test]
    fn failed_reload_keeps_table_and_reports() {
        let source = FakeSource::new(sample_rows());
        let handles = source.handles();
        let mut state = state_with(source);
        state.handle(Event::Search);
        let before = Arc::clone(&state.table);

        handles.fail.set(true);
        state.handle(Event::Reload);

        assert!(Arc::ptr_eq(&before, &state.table));
        assert!(state.status_message.is_some());
        assert!(state.view.is_active());
    }

    #[test]
    fn opening_a_missing_file_reports_error() {
        let mut state = state_with(FakeSource::new(sample_rows()));
        state.handle(Event::Open(PathBuf::from("/definitely/not/here.xlsx")));

        assert_eq!(state.table.len(), 3);
        let msg = state.status_message.as_deref().unwrap_or_default();
        assert!(msg.contains("not found"));
    }

    #[test]
    fn startup_failure_is_fatal() {
        let source = FakeSource::new(sample_rows());
        source.fail.set(true);
        assert!(AppState::new(TableCache::new(Box::new(source)), LoaderConfig::default()).is_err());
    }
}
