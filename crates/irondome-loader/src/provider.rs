//! List source strategies.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};

use irondome_protocols::{ListStore, LoadOutcome, SourceLabel};

use crate::fetcher::MirrorFetcher;

/// What the chain has learned so far.
#[derive(Debug, Default, Clone)]
pub struct ChainState {
    /// Most recent failure reason, carried into fallback outcomes.
    pub last_error: Option<String>,
}

/// Result of asking one source for the list.
#[derive(Debug)]
pub enum Provision {
    /// The source produced the list; the chain stops here.
    Resolved(LoadOutcome),
    /// The source had nothing to offer; not an error.
    Skipped,
    /// The source tried and failed.
    Failed(String),
}

/// One source in the resolution chain.
#[async_trait]
pub trait ListProvider: Send + Sync {
    /// Label used in logs.
    fn name(&self) -> String;

    async fn provide(&self, state: &ChainState) -> Provision;
}

/// Manual override. Preempts every other source while set.
pub struct ManualOverrideProvider {
    store: Arc<dyn ListStore>,
}

impl ManualOverrideProvider {
    pub fn new(store: Arc<dyn ListStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ListProvider for ManualOverrideProvider {
    fn name(&self) -> String {
        "manual".to_string()
    }

    async fn provide(&self, _state: &ChainState) -> Provision {
        let Some(list) = self.store.read_manual_override() else {
            return Provision::Skipped;
        };
        if list.is_empty() {
            return Provision::Skipped;
        }

        // Rewrite so the cache does not look stale once the override is cleared.
        if let Err(e) = self.store.write_manual_override(&list) {
            warn!("Failed to refresh cache from manual list: {}", e);
        }

        info!("Using manual list ({})", list.len());
        Provision::Resolved(LoadOutcome::from_list(&list, SourceLabel::Manual))
    }
}

/// Cached list younger than the TTL.
pub struct FreshCacheProvider {
    store: Arc<dyn ListStore>,
    ttl: Duration,
}

impl FreshCacheProvider {
    pub fn new(store: Arc<dyn ListStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }
}

#[async_trait]
impl ListProvider for FreshCacheProvider {
    fn name(&self) -> String {
        "cache".to_string()
    }

    async fn provide(&self, _state: &ChainState) -> Provision {
        let Some(record) = self.store.read_cache() else {
            return Provision::Skipped;
        };

        let now = Utc::now().timestamp_millis();
        if !record.is_fresh(now, self.ttl) {
            debug!(
                "Cache is stale ({}s old, ttl {}s)",
                record.age(now).as_secs(),
                self.ttl.as_secs()
            );
            return Provision::Skipped;
        }

        info!("Using cache ({})", record.raw_list.len());
        Provision::Resolved(LoadOutcome::from_list(&record.raw_list, SourceLabel::Cache))
    }
}

/// A single network mirror.
pub struct MirrorProvider {
    url: String,
    fetcher: Arc<dyn MirrorFetcher>,
    store: Arc<dyn ListStore>,
    timeout: Duration,
}

impl MirrorProvider {
    pub fn new(
        url: impl Into<String>,
        fetcher: Arc<dyn MirrorFetcher>,
        store: Arc<dyn ListStore>,
        timeout: Duration,
    ) -> Self {
        Self {
            url: url.into(),
            fetcher,
            store,
            timeout,
        }
    }
}

#[async_trait]
impl ListProvider for MirrorProvider {
    fn name(&self) -> String {
        self.url.clone()
    }

    async fn provide(&self, _state: &ChainState) -> Provision {
        match self.fetcher.fetch(&self.url, self.timeout).await {
            Ok(list) => {
                if let Err(e) = self.store.write_cache(&list) {
                    warn!("Failed to cache list from {}: {}", self.url, e);
                }
                info!("Loaded {} factions from {}", list.len(), self.url);
                Provision::Resolved(LoadOutcome::from_list(
                    &list,
                    SourceLabel::Mirror(self.url.clone()),
                ))
            }
            Err(e) => {
                warn!("Fetch failed {}: {}", self.url, e);
                Provision::Failed(e.to_string())
            }
        }
    }
}

/// Any cached list regardless of age. Last resort before giving up.
pub struct StaleCacheProvider {
    store: Arc<dyn ListStore>,
}

impl StaleCacheProvider {
    pub fn new(store: Arc<dyn ListStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ListProvider for StaleCacheProvider {
    fn name(&self) -> String {
        "stale-cache".to_string()
    }

    async fn provide(&self, state: &ChainState) -> Provision {
        let Some(record) = self.store.read_cache() else {
            return Provision::Skipped;
        };

        warn!(
            "Network error: {}; using stale cache ({} factions)",
            state.last_error.as_deref().unwrap_or("unknown"),
            record.raw_list.len()
        );
        Provision::Resolved(
            LoadOutcome::from_list(&record.raw_list, SourceLabel::StaleCache)
                .with_error(state.last_error.clone()),
        )
    }
}
