//! Waiting for the host page to render its anchors.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::debug;

use irondome_protocols::ReadinessPhase;

use crate::layout::PageLayout;
use crate::live::LivePage;

/// Polls the page until an anchor shows up or the deadline passes.
pub struct PageReadinessWaiter {
    page: Arc<LivePage>,
    layout: Arc<PageLayout>,
}

impl PageReadinessWaiter {
    pub fn new(page: Arc<LivePage>, layout: Arc<PageLayout>) -> Self {
        Self { page, layout }
    }

    /// Which anchors are present right now, if any.
    pub fn probe(&self) -> Option<ReadinessPhase> {
        let (container, anchor) = self.page.read(|doc| {
            (
                self.layout.find_container(doc).is_some(),
                self.layout.find_identity_link(doc).is_some(),
            )
        });
        ReadinessPhase::from_presence(container, anchor)
    }

    /// Poll every `poll_interval` for at most `max_duration`.
    ///
    /// Returns on the first poll that sees at least one anchor. The sleep
    /// between polls is the only suspension point.
    pub async fn wait(&self, max_duration: Duration, poll_interval: Duration) -> ReadinessPhase {
        let deadline = Instant::now() + max_duration;
        let mut polls = 0u32;

        loop {
            polls += 1;
            if let Some(phase) = self.probe() {
                debug!("Page ready after {} poll(s): {}", polls, phase);
                return phase;
            }

            let now = Instant::now();
            if now >= deadline {
                debug!("Page anchors not found after {} poll(s)", polls);
                return ReadinessPhase::Timeout;
            }
            sleep(poll_interval.min(deadline - now)).await;
        }
    }
}
