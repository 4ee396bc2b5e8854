use std::path::PathBuf;
use std::sync::Arc;

use super::loader::{load_file, LoaderConfig};
use super::model::EngagementTable;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// DataSource – where an engagement table comes from
// ---------------------------------------------------------------------------

/// Anything that can produce a fresh engagement table.
pub trait DataSource {
    fn load(&self) -> Result<EngagementTable, LoadError>;

    /// Human-readable description for the status bar and logs.
    fn describe(&self) -> String;
}

/// A table read from a file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
    pub config: LoaderConfig,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>, config: LoaderConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }
}

impl DataSource for FileSource {
    fn load(&self) -> Result<EngagementTable, LoadError> {
        load_file(&self.path, &self.config)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// ---------------------------------------------------------------------------
// TableCache – load once, share, refresh on demand
// ---------------------------------------------------------------------------

/// Holds the loaded table and hands out shared read-only handles.
///
/// The source is read at most once until [`TableCache::invalidate`] or
/// [`TableCache::refresh`] is called.
pub struct TableCache {
    source: Box<dyn DataSource>,
    table: Option<Arc<EngagementTable>>,
}

impl TableCache {
    pub fn new(source: Box<dyn DataSource>) -> Self {
        Self {
            source,
            table: None,
        }
    }

    /// Cached table, loading it on first access.
    pub fn get(&mut self) -> Result<Arc<EngagementTable>, LoadError> {
        if let Some(table) = &self.table {
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(self.source.load()?);
        log::info!(
            "Loaded {} engagements from {}",
            table.len(),
            self.source.describe()
        );
        if table.is_empty() {
            log::warn!("{} has a header but no data rows", self.source.describe());
        }
        self.table = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Forget the cached table; the next [`TableCache::get`] reloads.
    pub fn invalidate(&mut self) {
        self.table = None;
    }

    /// Re-read the source. On failure the previously cached table is kept.
    pub fn refresh(&mut self) -> Result<Arc<EngagementTable>, LoadError> {
        let previous = self.table.clone();
        self.invalidate();
        match self.get() {
            Ok(table) => Ok(table),
            Err(e) => {
                self.table = previous;
                Err(e)
            }
        }
    }

    /// Load from `source` and, if that succeeds, make it the active source.
    pub fn replace_source(
        &mut self,
        source: Box<dyn DataSource>,
    ) -> Result<Arc<EngagementTable>, LoadError> {
        let table = Arc::new(source.load()?);
        log::info!(
            "Loaded {} engagements from {}",
            table.len(),
            source.describe()
        );
        self.source = source;
        self.table = Some(Arc::clone(&table));
        Ok(table)
    }

    #[cfg(test)]
    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    pub fn describe(&self) -> String {
        self.source.describe()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::data::model::Engagement;

    /// In-memory source that counts loads and can be switched to fail.
    pub(crate) struct FakeSource {
        pub rows: Rc<RefCell<Vec<Engagement>>>,
        pub loads: Rc<Cell<usize>>,
        pub fail: Rc<Cell<bool>>,
    }

    impl FakeSource {
        pub fn new(rows: Vec<Engagement>) -> Self {
            Self {
                rows: Rc::new(RefCell::new(rows)),
                loads: Rc::new(Cell::new(0)),
                fail: Rc::new(Cell::new(false)),
            }
        }

        pub fn handles(&self) -> Self {
            Self {
                rows: Rc::clone(&self.rows),
                loads: Rc::clone(&self.loads),
                fail: Rc::clone(&self.fail),
            }
        }
    }

    impl DataSource for FakeSource {
        fn load(&self) -> Result<EngagementTable, LoadError> {
            self.loads.set(self.loads.get() + 1);
            if self.fail.get() {
                return Err(LoadError::MissingHeader);
            }
            Ok(EngagementTable::from_rows(self.rows.borrow().clone()))
        }

        fn describe(&self) -> String {
            "fake".to_string()
        }
    }

    #[test]
    fn loads_once_and_shares_the_table() {
        let source = FakeSource::new(vec![Engagement::new("S1", "C1", "P1")]);
        let handles = source.handles();
        let mut cache = TableCache::new(Box::new(source));

        let a = cache.get().unwrap();
        let b = cache.get().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(handles.loads.get(), 1);
    }

    #[test]
    fn invalidate_forces_reload() {
        let source = FakeSource::new(vec![Engagement::new("S1", "C1", "P1")]);
        let handles = source.handles();
        let mut cache = TableCache::new(Box::new(source));

        cache.get().unwrap();
        cache.invalidate();
        assert!(!cache.is_loaded());
        cache.get().unwrap();
        assert_eq!(handles.loads.get(), 2);
    }

    #[test]
    fn refresh_picks_up_new_rows() {
        let source = FakeSource::new(vec![Engagement::new("S1", "C1", "P1")]);
        let handles = source.handles();
        let mut cache = TableCache::new(Box::new(source));
        let before = cache.get().unwrap();

        handles.rows.borrow_mut().push(Engagement::new("S2", "C2", "P2"));
        let after = cache.refresh().unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(handles.loads.get(), 2);
    }

    #[test]
    fn failed_refresh_keeps_previous_table() {
        let source = FakeSource::new(vec![Engagement::new("S1", "C1", "P1")]);
        let handles = source.handles();
        let mut cache = TableCache::new(Box::new(source));
        let before = cache.get().unwrap();

        handles.fail.set(true);
        assert!(cache.refresh().is_err());
        handles.fail.set(false);

        let kept = cache.get().unwrap();
        assert!(Arc::ptr_eq(&before, &kept));
        assert_eq!(handles.loads.get(), 2);
    }

    #[test]
    fn failed_replace_keeps_current_source() {
        let source = FakeSource::new(vec![Engagement::new("S1", "C1", "P1")]);
        let mut cache = TableCache::new(Box::new(source));
        cache.get().unwrap();

        let broken = FakeSource::new(Vec::new());
        broken.fail.set(true);
        assert!(cache.replace_source(Box::new(broken)).is_err());
        assert_eq!(cache.get().unwrap().len(), 1);
    }
}
