//! Ordered, first-success-wins list resolution.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use irondome_config::LoaderConfig;
use irondome_protocols::{ListStore, LoadOutcome};

use crate::fetcher::MirrorFetcher;
use crate::provider::{
    ChainState, FreshCacheProvider, ListProvider, ManualOverrideProvider, MirrorProvider,
    Provision, StaleCacheProvider,
};

/// Fallback reason when the chain ran dry without any recorded failure.
const NO_SOURCE: &str = "fetch failed";

/// Resolves the membership list through an ordered chain of providers.
pub struct ListLoader {
    providers: Vec<Box<dyn ListProvider>>,
}

impl ListLoader {
    /// Build a loader from an explicit provider chain.
    pub fn from_providers(providers: Vec<Box<dyn ListProvider>>) -> Self {
        Self { providers }
    }

    /// Build the standard chain: manual, fresh cache, each mirror, stale cache.
    pub fn standard(
        store: Arc<dyn ListStore>,
        fetcher: Arc<dyn MirrorFetcher>,
        mirrors: &[String],
        ttl: Duration,
        fetch_timeout: Duration,
    ) -> Self {
        let mut providers: Vec<Box<dyn ListProvider>> = Vec::with_capacity(mirrors.len() + 3);
        providers.push(Box::new(ManualOverrideProvider::new(store.clone())));
        providers.push(Box::new(FreshCacheProvider::new(store.clone(), ttl)));
        for url in mirrors {
            providers.push(Box::new(MirrorProvider::new(
                url.clone(),
                fetcher.clone(),
                store.clone(),
                fetch_timeout,
            )));
        }
        providers.push(Box::new(StaleCacheProvider::new(store)));
        Self { providers }
    }

    /// Build the standard chain from configuration.
    pub fn from_config(
        config: &LoaderConfig,
        store: Arc<dyn ListStore>,
        fetcher: Arc<dyn MirrorFetcher>,
    ) -> Self {
        Self::standard(
            store,
            fetcher,
            &config.mirrors,
            config.cache_ttl(),
            config.fetch_timeout(),
        )
    }

    /// Names of the providers in evaluation order.
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Resolve the list. Never fails: exhaustion yields an empty outcome.
    pub async fn resolve(&self) -> LoadOutcome {
        let mut state = ChainState::default();

        for provider in &self.providers {
            match provider.provide(&state).await {
                Provision::Resolved(outcome) => {
                    debug!("Provider '{}' resolved the list", provider.name());
                    return outcome;
                }
                Provision::Skipped => {
                    debug!("Provider '{}' skipped", provider.name());
                }
                Provision::Failed(reason) => {
                    state.last_error = Some(reason);
                }
            }
        }

        let reason = state.last_error.unwrap_or_else(|| NO_SOURCE.to_string());
        warn!("List load failed: {}", reason);
        LoadOutcome::empty(reason)
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
