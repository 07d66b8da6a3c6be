//! List storage protocol.

use crate::error::StoreError;
use crate::record::CacheRecord;

/// Persistent storage for the cached list and the manual override.
///
/// Reads never fail: a missing or unparsable record is reported as absent.
/// Writes replace a whole record at once.
pub trait ListStore: Send + Sync {
    /// Read the cache record, if present and well formed.
    fn read_cache(&self) -> Option<CacheRecord>;

    /// Replace the cache record with `raw_list` stamped now.
    fn write_cache(&self, raw_list: &[String]) -> Result<(), StoreError>;

    /// Read the manual override, if present and well formed.
    fn read_manual_override(&self) -> Option<Vec<String>>;

    /// Store the manual override and refresh the cache with the same list.
    fn write_manual_override(&self, raw_list: &[String]) -> Result<(), StoreError>;

    /// Remove both records.
    fn clear_all(&self) -> Result<(), StoreError>;
}
