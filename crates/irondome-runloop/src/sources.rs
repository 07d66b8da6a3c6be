//! Page observers that feed the scheduler.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use irondome_page::{LivePage, MutationOrigin, MutationRecord};
use irondome_protocols::Trigger;

/// Forwards host document mutations as [`Trigger::Mutation`].
///
/// Mutations made by the marker reconciler are ignored, otherwise every
/// reconcile would schedule another evaluation.
pub struct MutationSource {
    mutations: broadcast::Receiver<MutationRecord>,
    triggers: mpsc::Sender<Trigger>,
}

impl MutationSource {
    pub fn new(page: &LivePage, triggers: mpsc::Sender<Trigger>) -> Self {
        Self {
            mutations: page.subscribe(),
            triggers,
        }
    }

    pub fn spawn(mut self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                let record = tokio::select! {
                    _ = shutdown.cancelled() => break,
                    record = self.mutations.recv() => record,
                };

                let forward = match record {
                    Ok(record) => record.origin == MutationOrigin::Host,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!("Mutation feed lagged by {} record(s)", skipped);
                        true
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };

                if forward && self.triggers.send(Trigger::Mutation).await.is_err() {
                    break;
                }
            }
            debug!("Mutation source stopped");
        })
    }
}

/// Polls the page location and emits [`Trigger::UrlChange`] when it moves.
pub struct UrlWatcher {
    page: Arc<LivePage>,
    poll_interval: Duration,
    triggers: mpsc::Sender<Trigger>,
}

impl UrlWatcher {
    pub fn new(page: Arc<LivePage>, poll_interval: Duration, triggers: mpsc::Sender<Trigger>) -> Self {
        Self {
            page,
            poll_interval,
            triggers,
        }
    }

    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut last = self.page.location();
            let mut ticker = interval(self.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                let current = self.page.location();
                if current == last {
                    continue;
                }
                info!("Location changed: {} -> {}", last, current);
                last = current;
                if self.triggers.send(Trigger::UrlChange).await.is_err() {
                    break;
                }
            }
            debug!("URL watcher stopped");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use irondome_page::{Document, ElementSpec};
    use tokio::time::sleep;

    fn page() -> Arc<LivePage> {
        Arc::new(LivePage::new(
            "https://www.torn.com/profiles.php?XID=1",
            Document::new(),
        ))
    }

    #[tokio::test]
    async fn test_host_mutations_are_forwarded() {
        let page = page();
        let (tx, mut rx) = mpsc::channel(8);
        let shutdown = CancellationToken::new();
        let task = MutationSource::new(&page, tx).spawn(shutdown.clone());

        page.mutate(|doc| {
            let body = doc.body();
            doc.append_spec(body, ElementSpec::new("div"));
        });

        assert_eq!(rx.recv().await, Some(Trigger::Mutation));
        shutdown.cancel();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_marker_mutations_are_ignored() {
        let page = page();
        let (tx, mut rx) = mpsc::channel(8);
        let shutdown = CancellationToken::new();
        let task = MutationSource::new(&page, tx).spawn(shutdown.clone());

        page.mutate_as(MutationOrigin::Marker, |_| ());
        page.mutate_as(MutationOrigin::Marker, |_| ());
        sleep(Duration::from_millis(50)).await;

        assert!(rx.try_recv().is_err());
        shutdown.cancel();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_url_change_is_detected() {
        let page = page();
        let (tx, mut rx) = mpsc::channel(8);
        let shutdown = CancellationToken::new();
        let task = UrlWatcher::new(page.clone(), Duration::from_millis(400), tx)
            .spawn(shutdown.clone());

        sleep(Duration::from_millis(1000)).await;
        assert!(rx.try_recv().is_err());

        page.navigate("https://www.torn.com/profiles.php?XID=2");
        sleep(Duration::from_millis(500)).await;
        assert_eq!(rx.try_recv().ok(), Some(Trigger::UrlChange));

        // Same location again: nothing new.
        sleep(Duration::from_millis(1000)).await;
        assert!(rx.try_recv().is_err());

        shutdown.cancel();
        task.await.unwrap();
    }
}
