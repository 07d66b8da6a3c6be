//! In-memory list store.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use irondome_protocols::{CacheRecord, ListStore, StoreError, CACHE_KEY, MANUAL_KEY};

use crate::codec::{decode_lenient, encode};

/// List store holding raw JSON text per key.
///
/// Text is kept unparsed so tests can plant corrupt records with
/// [`MemoryListStore::put_raw`].
#[derive(Debug, Default)]
pub struct MemoryListStore {
    records: RwLock<HashMap<String, String>>,
}

impl MemoryListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `record` as-is, keeping its capture time.
    pub fn seed_cache(&self, record: &CacheRecord) -> Result<(), StoreError> {
        self.put(CACHE_KEY, encode(record)?);
        Ok(())
    }

    /// Store arbitrary text under `key`.
    pub fn put_raw(&self, key: &str, text: impl Into<String>) {
        self.put(key, text.into());
    }

    /// Raw text stored under `key`.
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.records.read().get(key).cloned()
    }

    fn put(&self, key: &str, text: String) {
        debug!("Memory store write '{}' ({} bytes)", key, text.len());
        self.records.write().insert(key.to_string(), text);
    }
}

impl ListStore for MemoryListStore {
    fn read_cache(&self) -> Option<CacheRecord> {
        decode_lenient(CACHE_KEY, self.get_raw(CACHE_KEY))
    }

    fn write_cache(&self, raw_list: &[String]) -> Result<(), StoreError> {
        self.seed_cache(&CacheRecord::new(raw_list.to_vec()))
    }

    fn read_manual_override(&self) -> Option<Vec<String>> {
        decode_lenient(MANUAL_KEY, self.get_raw(MANUAL_KEY))
    }

    fn write_manual_override(&self, raw_list: &[String]) -> Result<(), StoreError> {
        self.put(MANUAL_KEY, encode(&raw_list)?);
        self.write_cache(raw_list)
    }

    fn clear_all(&self) -> Result<(), StoreError> {
        let mut records = self.records.write();
        records.remove(CACHE_KEY);
        records.remove(MANUAL_KEY);
        Ok(())
    }
}
