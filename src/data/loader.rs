//! CSV Data Loader Module
//! Reads the hotness CSV from disk and memoizes prepared tables by content hash.

use super::processor::{DataProcessor, ParseError, PreparedTable};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Memo of prepared tables keyed by an opaque cache key.
///
/// Entries are shared read-only and never replaced once inserted.
#[derive(Default)]
pub struct DataCache {
    entries: HashMap<String, Arc<PreparedTable>>,
}

impl DataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the table cached under `key`, or run `loader` and cache its result.
    /// Failed loads are not cached.
    pub fn get_or_load<F>(&mut self, key: &str, loader: F) -> Result<Arc<PreparedTable>, ParseError>
    where
        F: FnOnce() -> Result<PreparedTable, ParseError>,
    {
        if let Some(table) = self.entries.get(key) {
            debug!(key, "data cache hit");
            return Ok(Arc::clone(table));
        }

        debug!(key, "data cache miss");
        let table = Arc::new(loader()?);
        self.entries.insert(key.to_string(), Arc::clone(&table));
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Hex SHA-256 of the raw file content.
pub fn content_key(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Handles CSV loading on top of the content-keyed cache.
pub struct DataLoader {
    cache: DataCache,
    table: Option<Arc<PreparedTable>>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            cache: DataCache::new(),
            table: None,
            file_path: None,
        }
    }

    /// Read and prepare a CSV file. Unchanged content is served from the cache.
    pub fn load_path(&mut self, path: &Path) -> Result<Arc<PreparedTable>, LoadError> {
        self.file_path = Some(path.to_path_buf());

        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = self.load_bytes(&bytes)?;

        info!(
            path = %path.display(),
            rows = table.len(),
            "loaded hotness history"
        );
        Ok(table)
    }

    /// Prepare CSV content already in memory.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<Arc<PreparedTable>, ParseError> {
        let key = content_key(bytes);
        let table = self
            .cache
            .get_or_load(&key, || DataProcessor::prepare_csv(bytes))?;
        self.table = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Get the most recently loaded table.
    pub fn get_table(&self) -> Option<&Arc<PreparedTable>> {
        self.table.as_ref()
    }

    /// Get the number of prepared rows.
    pub fn get_row_count(&self) -> usize {
        self.table.as_ref().map(|t| t.len()).unwrap_or(0)
    }

    /// Get file path.
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    pub fn cache(&self) -> &DataCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const CSV: &str = "game_id,date,name,year,rank,views\n\
                       1,2024-03-01,Alpha,2023,1,100\n\
                       1,2024-03-02,Alpha,2023,1,120\n";

    #[test]
    fn cache_runs_loader_once_per_key() {
        let mut cache = DataCache::new();
        let calls = Cell::new(0);
        let loader = || {
            calls.set(calls.get() + 1);
            Ok(PreparedTable::default())
        };

        let first = cache.get_or_load("k", loader).unwrap();
        let second = cache
            .get_or_load("k", || {
                calls.set(calls.get() + 1);
                Ok(PreparedTable::default())
            })
            .unwrap();

        assert_eq!(calls.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failed_loads_are_not_cached() {
        let mut cache = DataCache::new();
        let result = cache.get_or_load("bad", || Err(ParseError::Empty));
        assert!(result.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn identical_content_shares_one_table() {
        let mut loader = DataLoader::new();
        let a = loader.load_bytes(CSV.as_bytes()).unwrap();
        let b = loader.load_bytes(CSV.as_bytes()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(loader.cache().len(), 1);
        assert_eq!(loader.get_row_count(), 1);
    }

    #[test]
    fn content_key_is_stable_hex() {
        let key = content_key(b"abc");
        assert_eq!(key.len(), 64);
        assert_eq!(key, content_key(b"abc"));
        assert_ne!(key, content_key(b"abd"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut loader = DataLoader::new();
        let err = loader
            .load_path(Path::new("definitely/not/here.csv"))
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
