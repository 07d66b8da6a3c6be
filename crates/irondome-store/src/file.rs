//! File system list store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::fs;

use tracing::{debug, warn};

use irondome_protocols::{CacheRecord, ListStore, StoreError, CACHE_KEY, MANUAL_KEY};

use crate::codec::{decode, decode_lenient, encode};

/// File system based list store.
///
/// Each record lives in its own JSON file:
/// ```text
/// {storage_path}/
/// ├── factions.cache.json
/// └── factions.manual.json
/// ```
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader sees either the old record or the new one.
#[derive(Debug, Clone)]
pub struct FileListStore {
    storage_path: PathBuf,
}

impl FileListStore {
    /// Create a store rooted at `storage_path`, creating the directory.
    pub fn new(storage_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let storage_path = storage_path.into();
        fs::create_dir_all(&storage_path)?;
        debug!("FileListStore initialized at {:?}", storage_path);
        Ok(Self { storage_path })
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.storage_path.join(format!("{}.json", key))
    }

    /// Store `record` as-is, keeping its capture time.
    pub fn seed_cache(&self, record: &CacheRecord) -> Result<(), StoreError> {
        self.write_record(CACHE_KEY, &encode(record)?)
    }

    /// Read the cache record, surfacing corruption instead of hiding it.
    pub fn inspect_cache(&self) -> Result<Option<CacheRecord>, StoreError> {
        match self.read_record(CACHE_KEY)? {
            Some(text) => decode(CACHE_KEY, &text).map(Some),
            None => Ok(None),
        }
    }

    fn read_record(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.record_path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn read_record_lenient(&self, key: &str) -> Option<String> {
        match self.read_record(key) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to read record '{}': {}", key, e);
                None
            }
        }
    }

    fn write_record(&self, key: &str, content: &str) -> Result<(), StoreError> {
        let path = self.record_path(key);
        let tmp = self.storage_path.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &path)?;
        debug!("Saved record '{}' to {:?}", key, path);
        Ok(())
    }

    fn remove_record(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.record_path(key)) {
            Ok(()) => {
                debug!("Deleted record '{}'", key);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl ListStore for FileListStore {
    fn read_cache(&self) -> Option<CacheRecord> {
        decode_lenient(CACHE_KEY, self.read_record_lenient(CACHE_KEY))
    }

    fn write_cache(&self, raw_list: &[String]) -> Result<(), StoreError> {
        self.seed_cache(&CacheRecord::new(raw_list.to_vec()))
    }

    fn read_manual_override(&self) -> Option<Vec<String>> {
        decode_lenient(MANUAL_KEY, self.read_record_lenient(MANUAL_KEY))
    }

    fn write_manual_override(&self, raw_list: &[String]) -> Result<(), StoreError> {
        self.write_record(MANUAL_KEY, &encode(&raw_list)?)?;
        self.write_cache(raw_list)
    }

    fn clear_all(&self) -> Result<(), StoreError> {
        self.remove_record(CACHE_KEY)?;
        self.remove_record(MANUAL_KEY)
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
