//! Startup sequence: first evaluation, then scheduler and observers.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use irondome_config::PageConfig;
use irondome_page::LivePage;
use irondome_protocols::Trigger;

use crate::pipeline::Evaluation;
use crate::report::EvaluationReport;
use crate::scheduler::{EvaluationScheduler, SchedulerHandle};
use crate::sources::{MutationSource, UrlWatcher};

/// A running marker: scheduler plus page observers.
pub struct MarkerRuntime {
    initial: EvaluationReport,
    handle: SchedulerHandle,
    shutdown: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl MarkerRuntime {
    /// Run the `Init` evaluation directly, then attach the observers.
    pub async fn start(
        evaluation: Arc<dyn Evaluation>,
        page: Arc<LivePage>,
        config: &PageConfig,
    ) -> Self {
        let initial = evaluation.evaluate(Trigger::Init).await;

        let shutdown = CancellationToken::new();
        let (handle, scheduler) =
            EvaluationScheduler::spawn(evaluation, config.debounce(), shutdown.clone());

        let mutations = MutationSource::new(&page, handle.sender()).spawn(shutdown.clone());
        let url_watcher = UrlWatcher::new(page, config.url_poll_interval(), handle.sender())
            .spawn(shutdown.clone());

        info!("Marker runtime started");
        Self {
            initial,
            handle,
            shutdown,
            tasks: vec![scheduler, mutations, url_watcher],
        }
    }

    /// Report of the startup evaluation.
    pub fn initial_report(&self) -> &EvaluationReport {
        &self.initial
    }

    pub fn handle(&self) -> &SchedulerHandle {
        &self.handle
    }

    /// Stop observers and scheduler, waiting for an in-flight evaluation.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        for task in self.tasks {
            if let Err(e) = task.await {
                warn!("Runtime task ended abnormally: {}", e);
            }
        }
        info!("Marker runtime stopped");
    }
}
