//! Persisted list records.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Storage key of the auto-refreshing cache record.
pub const CACHE_KEY: &str = "factions.cache";

/// Storage key of the manual override list.
pub const MANUAL_KEY: &str = "factions.manual";

/// Snapshot of the membership list as it was last loaded.
///
/// `raw_list` keeps the original casing; it is only normalized when a
/// [`MembershipSet`](crate::MembershipSet) is built from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheRecord {
    pub captured_at_epoch_ms: i64,
    pub raw_list: Vec<String>,
}

impl CacheRecord {
    /// Create a record stamped with the current time.
    pub fn new(raw_list: Vec<String>) -> Self {
        Self::captured_at(Utc::now().timestamp_millis(), raw_list)
    }

    pub fn captured_at(captured_at_epoch_ms: i64, raw_list: Vec<String>) -> Self {
        Self {
            captured_at_epoch_ms,
            raw_list,
        }
    }

    /// Age relative to `now_ms`. Records from the future count as age zero.
    pub fn age(&self, now_ms: i64) -> Duration {
        let age = now_ms.saturating_sub(self.captured_at_epoch_ms).max(0);
        Duration::from_millis(age as u64)
    }

    pub fn is_fresh(&self, now_ms: i64, ttl: Duration) -> bool {
        self.age(now_ms) < ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR_MS: i64 = 60 * 60 * 1000;

    #[test]
    fn test_wire_format() {
        let record = CacheRecord::captured_at(1_700_000_000_000, vec!["Alpha".into()]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"capturedAtEpochMs": 1_700_000_000_000i64, "rawList": ["Alpha"]})
        );
    }

    #[test]
    fn test_raw_list_keeps_casing() {
        let record = CacheRecord::new(vec!["The Swarm".into()]);
        let json = serde_json::to_string(&record).unwrap();
        let back: CacheRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.raw_list, vec!["The Swarm".to_string()]);
    }

    #[test]
    fn test_freshness() {
        let now = 100 * HOUR_MS;
        let ttl = Duration::from_secs(12 * 60 * 60);

        let recent = CacheRecord::captured_at(now - HOUR_MS, vec![]);
        assert!(recent.is_fresh(now, ttl));

        let old = CacheRecord::captured_at(now - 48 * HOUR_MS, vec![]);
        assert!(!old.is_fresh(now, ttl));

        let boundary = CacheRecord::captured_at(now - 12 * HOUR_MS, vec![]);
        assert!(!boundary.is_fresh(now, ttl));
    }

    #[test]
    fn test_future_record_has_zero_age() {
        let record = CacheRecord::captured_at(5_000, vec![]);
        assert_eq!(record.age(1_000), Duration::ZERO);
    }
}
