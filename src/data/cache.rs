use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::DataResult;
use super::loader::load_file;
use super::model::Table;

// ---------------------------------------------------------------------------
// Process-scoped load cache
// ---------------------------------------------------------------------------

/// Loaded tables keyed by canonical path.
///
/// Source files are treated as static: an entry lives until the user asks
/// for a reload (`invalidate`) or the cache is cleared. Failed loads are not
/// stored, so fixing the file and retrying works.
#[derive(Debug, Default)]
pub struct LoadCache {
    entries: HashMap<PathBuf, Arc<Table>>,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `path`, loading it on first use.
    pub fn get_or_load(&mut self, path: &Path) -> DataResult<Arc<Table>> {
        let key = cache_key(path);
        if let Some(table) = self.entries.get(&key) {
            log::debug!("Load cache hit for {}", key.display());
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(load_file(path)?);
        log::info!(
            "Loaded {} rows with columns {:?} from {}",
            table.len(),
            table.columns(),
            key.display()
        );
        self.entries.insert(key, Arc::clone(&table));
        Ok(table)
    }

    /// Drop the entry for `path`; the next `get_or_load` re-reads the file.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(&cache_key(path)).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(&cache_key(path))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Canonical path when the file exists, otherwise the path as given.
fn cache_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
