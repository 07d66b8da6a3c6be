//! Live host page: a document plus location and a mutation feed.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::document::Document;

/// Who changed the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationOrigin {
    /// The host page re-rendered something.
    Host,
    /// The marker reconciler inserted or removed the marker.
    Marker,
}

/// Notification that the document changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationRecord {
    pub origin: MutationOrigin,
    /// Monotonic per page.
    pub sequence: u64,
}

/// The host page as the pipeline sees it.
///
/// Locks are held only for the duration of a closure and never across an
/// `.await`.
pub struct LivePage {
    document: RwLock<Document>,
    location: RwLock<String>,
    mutations: broadcast::Sender<MutationRecord>,
    sequence: AtomicU64,
}

impl LivePage {
    pub fn new(location: impl Into<String>, document: Document) -> Self {
        let (mutations, _) = broadcast::channel(256);
        Self {
            document: RwLock::new(document),
            location: RwLock::new(location.into()),
            mutations,
            sequence: AtomicU64::new(0),
        }
    }

    /// Inspect the document.
    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(&self.document.read())
    }

    /// Change the document as the host page would.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        self.mutate_as(MutationOrigin::Host, f)
    }

    /// Change the document on behalf of `origin` and notify subscribers.
    pub fn mutate_as<R>(&self, origin: MutationOrigin, f: impl FnOnce(&mut Document) -> R) -> R {
        let result = f(&mut self.document.write());
        self.notify(origin);
        result
    }

    fn notify(&self, origin: MutationOrigin) {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        // No subscribers is fine: nobody is observing yet.
        let _ = self.mutations.send(MutationRecord { origin, sequence });
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MutationRecord> {
        self.mutations.subscribe()
    }

    pub fn location(&self) -> String {
        self.location.read().clone()
    }

    /// Change the location without reloading, like `history.pushState`.
    pub fn navigate(&self, location: impl Into<String>) {
        let location = location.into();
        debug!("Page navigated to {}", location);
        *self.location.write() = location;
    }
}
