//! Configuration schema definitions.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::loader::ConfigLoader;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub loader: LoaderConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub page: PageConfig,

    #[serde(default)]
    pub marker: MarkerConfig,
}

/// Membership list acquisition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Mirrors serving the same list, tried in order.
    #[serde(default = "default_mirrors")]
    pub mirrors: Vec<String>,

    /// Age under which the cached list is used without touching the network.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Per-mirror request timeout.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// Bodies shorter than this are treated as ghost responses.
    #[serde(default = "default_min_body_len")]
    pub min_body_len: usize,
}

impl LoaderConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            mirrors: default_mirrors(),
            cache_ttl_secs: default_cache_ttl_secs(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            min_body_len: default_min_body_len(),
        }
    }
}

fn default_mirrors() -> Vec<String> {
    vec![
        "https://cdn.jsdelivr.net/gh/WetNightmare/FactionAlliance@main/iron-dome-factions.json?v=1"
            .to_string(),
        "https://wetnightmare.github.io/FactionAlliance/iron-dome-factions.json".to_string(),
        "https://raw.githubusercontent.com/WetNightmare/FactionAlliance/main/iron-dome-factions.json"
            .to_string(),
    ]
}

fn default_cache_ttl_secs() -> u64 {
    12 * 60 * 60
}

fn default_fetch_timeout_ms() -> u64 {
    8000
}

fn default_min_body_len() -> usize {
    5
}

/// Where the cache and manual override are persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per record. `~` is expanded.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

impl StorageConfig {
    pub fn resolved_path(&self) -> PathBuf {
        PathBuf::from(ConfigLoader::expand_path(&self.path))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

fn default_storage_path() -> String {
    dirs::home_dir()
        .map(|h| h.join(".irondome").join("store").display().to_string())
        .unwrap_or_else(|| "/tmp/irondome/store".to_string())
}

/// Page observation timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Upper bound on waiting for the page anchors.
    #[serde(default = "default_max_wait_ms")]
    pub max_wait_ms: u64,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Quiet period that coalesces bursts of triggers.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_url_poll_interval_ms")]
    pub url_poll_interval_ms: u64,

    /// Skip the membership check (still waits for the page anchors).
    #[serde(default)]
    pub force_show: bool,
}

impl PageConfig {
    pub fn max_wait(&self) -> Duration {
        Duration::from_millis(self.max_wait_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn url_poll_interval(&self) -> Duration {
        Duration::from_millis(self.url_poll_interval_ms)
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            max_wait_ms: default_max_wait_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            debounce_ms: default_debounce_ms(),
            url_poll_interval_ms: default_url_poll_interval_ms(),
            force_show: false,
        }
    }
}

fn default_max_wait_ms() -> u64 {
    12000
}

fn default_poll_interval_ms() -> u64 {
    200
}

fn default_debounce_ms() -> u64 {
    250
}

fn default_url_poll_interval_ms() -> u64 {
    400
}

/// Identity of the inserted marker elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerConfig {
    #[serde(default = "default_banner_url")]
    pub banner_url: String,

    #[serde(default = "default_banner_alt")]
    pub banner_alt: String,

    #[serde(default = "default_banner_id")]
    pub banner_id: String,

    #[serde(default = "default_badge_id")]
    pub badge_id: String,

    #[serde(default = "default_badge_text")]
    pub badge_text: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            banner_url: default_banner_url(),
            banner_alt: default_banner_alt(),
            banner_id: default_banner_id(),
            badge_id: default_badge_id(),
            badge_text: default_badge_text(),
        }
    }
}

fn default_banner_url() -> String {
    "https://github.com/WetNightmare/FactionAlliance/blob/f373bfec9fd256ca995895a19c64141c05c685a0/iron-dome-banner-750x140.png?raw=true".to_string()
}

fn default_banner_alt() -> String {
    "Iron Dome Alliance".to_string()
}

fn default_banner_id() -> String {
    "iron-dome-banner".to_string()
}

fn default_badge_id() -> String {
    "iron-dome-tag".to_string()
}

fn default_badge_text() -> String {
    "MEMBER OF THE IRON DOME".to_string()
}
