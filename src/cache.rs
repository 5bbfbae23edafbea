//! Memoized table loads keyed by file path.
//!
//! Entries live until they are invalidated explicitly; the cache never
//! checks the file for changes on its own.

use crate::error::Result;
use crate::ingestion::load_sales_table;
use crate::schema::{LoadOptions, SalesTable};
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct TableCache {
    options: LoadOptions,
    entries: HashMap<PathBuf, Arc<SalesTable>>,
}

impl TableCache {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            options,
            entries: HashMap::new(),
        }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Returns the cached table for `path`, loading it on first access.
    /// Failed loads are not remembered.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<SalesTable>> {
        if let Some(table) = self.entries.get(path) {
            debug!("Table cache hit for {}", path.display());
            return Ok(Arc::clone(table));
        }

        debug!("Table cache miss for {}", path.display());
        let table = Arc::new(load_sales_table(path, &self.options)?);
        self.entries.insert(path.to_path_buf(), Arc::clone(&table));
        Ok(table)
    }

    /// Drops the entry for `path`. Returns whether anything was cached.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TableCache {
    fn default() -> Self {
        Self::new(LoadOptions::default())
    }
}
