use super::*;
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use irondome_protocols::{CacheRecord, FetchError, SourceLabel};
use irondome_store::MemoryListStore;

const HOUR_MS: i64 = 60 * 60 * 1000;

/// Fetcher answering from a fixed table and recording every call.
#[derive(Default)]
struct ScriptedFetcher {
    responses: HashMap<String, Result<Vec<String>, FetchError>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    fn respond(mut self, url: &str, response: Result<Vec<&str>, FetchError>) -> Self {
        let response = response.map(|l| l.into_iter().map(String::from).collect());
        self.responses.insert(url.to_string(), response);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MirrorFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str, _timeout: Duration) -> Result<Vec<String>, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::Transport("connection refused".into())))
    }
}

fn mirrors() -> Vec<String> {
    vec!["https://m1.test/list.json".into(), "https://m2.test/list.json".into()]
}

fn loader(store: &Arc<MemoryListStore>, fetcher: &Arc<ScriptedFetcher>) -> ListLoader {
    ListLoader::standard(
        store.clone(),
        fetcher.clone(),
        &mirrors(),
        Duration::from_secs(12 * 60 * 60),
        Duration::from_secs(8),
    )
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_standard_chain_order() {
    let store = Arc::new(MemoryListStore::new());
    let fetcher = Arc::new(ScriptedFetcher::default());
    let names = loader(&store, &fetcher).provider_names();
    assert_eq!(
        names,
        vec![
            "manual",
            "cache",
            "https://m1.test/list.json",
            "https://m2.test/list.json",
            "stale-cache"
        ]
    );
}

#[tokio::test]
async fn test_manual_override_preempts_everything() {
    let store = Arc::new(MemoryListStore::new());
    store.write_manual_override(&names(&["Manual One"])).unwrap();
    store
        .seed_cache(&CacheRecord::new(names(&["Cached"])))
        .unwrap();
    let fetcher = Arc::new(
        ScriptedFetcher::default().respond("https://m1.test/list.json", Ok(vec!["Net"])),
    );

    let outcome = loader(&store, &fetcher).resolve().await;

    assert_eq!(outcome.source, SourceLabel::Manual);
    assert_eq!(outcome.count, 1);
    assert!(outcome.set.contains("manual one"));
    assert!(fetcher.calls().is_empty());
}

#[tokio::test]
async fn test_manual_override_refreshes_cache_timestamp() {
    let store = Arc::new(MemoryListStore::new());
    store.write_manual_override(&names(&["Manual"])).unwrap();
    store
        .seed_cache(&CacheRecord::captured_at(1, names(&["Manual"])))
        .unwrap();
    let fetcher = Arc::new(ScriptedFetcher::default());

    loader(&store, &fetcher).resolve().await;

    assert!(store.read_cache().unwrap().captured_at_epoch_ms > 1);
}

#[tokio::test]
async fn test_empty_manual_override_is_ignored() {
    let store = Arc::new(MemoryListStore::new());
    store.put_raw(irondome_protocols::MANUAL_KEY, "[]");
    store
        .seed_cache(&CacheRecord::new(names(&["Cached"])))
        .unwrap();
    let fetcher = Arc::new(ScriptedFetcher::default());

    let outcome = loader(&store, &fetcher).resolve().await;
    assert_eq!(outcome.source, SourceLabel::Cache);
}

#[tokio::test]
async fn test_fresh_cache_skips_network() {
    let store = Arc::new(MemoryListStore::new());
    store
        .seed_cache(&CacheRecord::captured_at(
            Utc::now().timestamp_millis() - HOUR_MS,
            names(&["Alpha", "Beta"]),
        ))
        .unwrap();
    let fetcher = Arc::new(ScriptedFetcher::default());

    let outcome = loader(&store, &fetcher).resolve().await;

    assert_eq!(outcome.source, SourceLabel::Cache);
    assert_eq!(outcome.count, 2);
    assert!(fetcher.calls().is_empty());
}

#[tokio::test]
async fn test_falls_through_to_next_mirror() {
    let store = Arc::new(MemoryListStore::new());
    let fetcher = Arc::new(
        ScriptedFetcher::default()
            .respond("https://m1.test/list.json", Err(FetchError::Status(503)))
            .respond("https://m2.test/list.json", Ok(vec!["Alpha", "Beta"])),
    );

    let outcome = loader(&store, &fetcher).resolve().await;

    assert_eq!(
        outcome.source,
        SourceLabel::Mirror("https://m2.test/list.json".into())
    );
    assert_eq!(outcome.count, 2);
    assert!(outcome.error.is_none());
    assert_eq!(fetcher.calls().len(), 2);
    assert_eq!(store.read_cache().unwrap().raw_list, names(&["Alpha", "Beta"]));
}

#[tokio::test]
async fn test_first_mirror_wins() {
    let store = Arc::new(MemoryListStore::new());
    let fetcher = Arc::new(
        ScriptedFetcher::default()
            .respond("https://m1.test/list.json", Ok(vec!["First"]))
            .respond("https://m2.test/list.json", Ok(vec!["Second"])),
    );

    let outcome = loader(&store, &fetcher).resolve().await;

    assert!(outcome.set.contains("first"));
    assert_eq!(fetcher.calls(), vec!["https://m1.test/list.json".to_string()]);
}

#[tokio::test]
async fn test_stale_cache_carries_last_error() {
    let store = Arc::new(MemoryListStore::new());
    store
        .seed_cache(&CacheRecord::captured_at(
            Utc::now().timestamp_millis() - 48 * HOUR_MS,
            names(&["Gamma"]),
        ))
        .unwrap();
    let fetcher = Arc::new(
        ScriptedFetcher::default()
            .respond("https://m1.test/list.json", Err(FetchError::Status(500)))
            .respond("https://m2.test/list.json", Err(FetchError::NotArray)),
    );

    let outcome = loader(&store, &fetcher).resolve().await;

    assert_eq!(outcome.source, SourceLabel::StaleCache);
    assert_eq!(outcome.count, 1);
    assert_eq!(outcome.error.as_deref(), Some("JSON not array"));
    assert_eq!(fetcher.calls().len(), 2);
}

#[tokio::test]
async fn test_exhaustion_yields_empty_outcome() {
    let store = Arc::new(MemoryListStore::new());
    let fetcher = Arc::new(
        ScriptedFetcher::default()
            .respond("https://m2.test/list.json", Err(FetchError::EmptyBody { len: 0, min: 5 })),
    );

    let outcome = loader(&store, &fetcher).resolve().await;

    assert_eq!(outcome.source, SourceLabel::None);
    assert!(outcome.set.is_empty());
    assert_eq!(outcome.count, 0);
    assert!(outcome.error.unwrap().contains("Empty response body"));
}

#[tokio::test]
async fn test_no_mirrors_no_cache() {
    let store = Arc::new(MemoryListStore::new());
    let fetcher = Arc::new(ScriptedFetcher::default());
    let loader = ListLoader::standard(
        store,
        fetcher,
        &[],
        Duration::from_secs(60),
        Duration::from_secs(1),
    );

    let outcome = loader.resolve().await;
    assert_eq!(outcome.source, SourceLabel::None);
    assert_eq!(outcome.error.as_deref(), Some("fetch failed"));
}

#[tokio::test]
async fn test_corrupt_cache_treated_as_absent() {
    let store = Arc::new(MemoryListStore::new());
    store.put_raw(irondome_protocols::CACHE_KEY, "garbage");
    let fetcher = Arc::new(
        ScriptedFetcher::default().respond("https://m1.test/list.json", Ok(vec!["Delta"])),
    );

    let outcome = loader(&store, &fetcher).resolve().await;
    assert_eq!(
        outcome.source,
        SourceLabel::Mirror("https://m1.test/list.json".into())
    );
    // The corrupt record was replaced by the fetched list.
    assert_eq!(store.read_cache().unwrap().raw_list, names(&["Delta"]));
}
