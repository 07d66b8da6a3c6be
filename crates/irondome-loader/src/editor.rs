//! Manual list editor adapter.
//!
//! The editing UI lives outside this workspace. This adapter is the part it
//! calls: validate pasted text, persist it as the manual override, and tell
//! the scheduler the list changed.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{info, warn};

use irondome_protocols::{FetchError, ListStore, StoreError, Trigger};

use crate::fetcher::parse_list_body;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Nothing pasted")]
    Empty,

    #[error("Manual paste error: {0}")]
    Invalid(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Writes manual overrides on behalf of the list editor.
pub struct ManualListEditor {
    store: Arc<dyn ListStore>,
    notify: Option<mpsc::Sender<Trigger>>,
}

impl ManualListEditor {
    pub fn new(store: Arc<dyn ListStore>) -> Self {
        Self {
            store,
            notify: None,
        }
    }

    /// Send [`Trigger::ListSaved`] on `notify` after every save.
    pub fn with_notifier(mut self, notify: mpsc::Sender<Trigger>) -> Self {
        self.notify = Some(notify);
        self
    }

    /// Parse a pasted JSON array and store it as the manual override.
    ///
    /// Returns the number of entries saved.
    pub async fn save_pasted(&self, text: &str) -> Result<usize, EditorError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(EditorError::Empty);
        }

        let list = parse_list_body(text, 0)?;
        self.save(&list).await
    }

    /// Store `list` as the manual override.
    pub async fn save(&self, list: &[String]) -> Result<usize, EditorError> {
        self.store.write_manual_override(list)?;
        info!("Manual list saved: {} factions", list.len());

        if let Some(notify) = &self.notify {
            if notify.send(Trigger::ListSaved).await.is_err() {
                warn!("Scheduler is gone, list change not delivered");
            }
        }

        Ok(list.len())
    }

    /// Remove the cache and the manual override.
    pub fn clear(&self) -> Result<(), EditorError> {
        self.store.clear_all()?;
        info!("Caches cleared");
        Ok(())
    }
}
