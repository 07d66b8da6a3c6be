//! Mirror fetching.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use tracing::{debug, warn};

use irondome_protocols::FetchError;

/// Fetches the raw membership list from one mirror.
#[async_trait]
pub trait MirrorFetcher: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<String>, FetchError>;
}

/// Parse a mirror body into the raw list.
///
/// Bodies shorter than `min_len` bytes are rejected before parsing: some
/// embedded web views report success but hand back nothing usable.
pub fn parse_list_body(body: &str, min_len: usize) -> Result<Vec<String>, FetchError> {
    if body.len() < min_len {
        return Err(FetchError::EmptyBody {
            len: body.len(),
            min: min_len,
        });
    }

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| FetchError::InvalidJson(e.to_string()))?;

    let serde_json::Value::Array(items) = value else {
        return Err(FetchError::NotArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            serde_json::Value::String(s) => Ok(s),
            other => Err(FetchError::InvalidJson(format!(
                "element {} is not a string: {}",
                i, other
            ))),
        })
        .collect()
}

/// HTTP mirror fetcher backed by reqwest.
pub struct HttpMirrorFetcher {
    client: Client,
    min_body_len: usize,
}

impl HttpMirrorFetcher {
    pub fn new(min_body_len: usize) -> Self {
        let client = Client::builder()
            .user_agent(concat!("irondome/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            client,
            min_body_len,
        }
    }

    pub fn with_client(client: Client, min_body_len: usize) -> Self {
        Self {
            client,
            min_body_len,
        }
    }
}

impl Default for HttpMirrorFetcher {
    fn default() -> Self {
        Self::new(5)
    }
}

#[async_trait]
impl MirrorFetcher for HttpMirrorFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<String>, FetchError> {
        let classify = |e: reqwest::Error| {
            if e.is_timeout() {
                FetchError::Timeout(timeout)
            } else {
                FetchError::Transport(e.to_string())
            }
        };

        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-store")
            .timeout(timeout)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        // Read as text: in ghost cases the body cannot be trusted to be JSON.
        let body = response.text().await.map_err(classify)?;
        debug!("Mirror {} returned {} bytes", url, body.len());

        parse_list_body(&body, self.min_body_len)
    }
}

#[cfg(test)]
#[path = "fetcher_tests.rs"]
mod tests;
