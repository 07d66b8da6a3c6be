//! One evaluation pass: wait, extract, decide, reconcile.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use irondome_config::PageConfig;
use irondome_page::{
    LivePage, MarkerReconciler, MarkerSpec, MembershipEvaluator, PageLayout, PageReadinessWaiter,
};
use irondome_protocols::{LoadOutcome, Trigger};

use crate::report::EvaluationReport;

/// Something the scheduler can run.
#[async_trait]
pub trait Evaluation: Send + Sync {
    async fn evaluate(&self, trigger: Trigger) -> EvaluationReport;
}

/// The real evaluation against a live page.
///
/// The membership outcome is resolved once at startup and shared by every
/// pass.
pub struct EvaluationPipeline {
    waiter: PageReadinessWaiter,
    evaluator: MembershipEvaluator,
    reconciler: MarkerReconciler,
    outcome: Arc<LoadOutcome>,
    max_wait: Duration,
    poll_interval: Duration,
    force_show: bool,
}

impl EvaluationPipeline {
    pub fn new(
        page: Arc<LivePage>,
        layout: Arc<PageLayout>,
        marker: MarkerSpec,
        outcome: Arc<LoadOutcome>,
        config: &PageConfig,
    ) -> Self {
        Self {
            waiter: PageReadinessWaiter::new(page.clone(), layout.clone()),
            evaluator: MembershipEvaluator::new(page.clone(), layout.clone()),
            reconciler: MarkerReconciler::new(page, layout, marker),
            outcome,
            max_wait: config.max_wait(),
            poll_interval: config.poll_interval(),
            force_show: config.force_show,
        }
    }

    pub fn outcome(&self) -> &LoadOutcome {
        &self.outcome
    }
}

#[async_trait]
impl Evaluation for EvaluationPipeline {
    async fn evaluate(&self, trigger: Trigger) -> EvaluationReport {
        let phase = self.waiter.wait(self.max_wait, self.poll_interval).await;
        let identity = self.evaluator.extract_identity();

        let matched = MembershipEvaluator::is_member(identity.as_deref(), &self.outcome.set, false);
        let placement = self.reconciler.reconcile(matched || self.force_show);
        let marker_present = self.reconciler.is_shown();

        let report = EvaluationReport {
            id: Uuid::new_v4(),
            reason: trigger.reason().to_string(),
            phase,
            identity,
            source: self.outcome.source.clone(),
            count: self.outcome.count,
            matched,
            forced: self.force_show,
            placement,
            marker_present,
            finished_at: Utc::now(),
        };

        info!(
            id = %report.id,
            reason = %report.reason,
            phase = %report.phase,
            identity = report.identity.as_deref().unwrap_or("(not found)"),
            source = %report.source,
            count = report.count,
            matched = report.matched,
            forced = report.forced,
            placement = %report.placement,
            marker_present = report.marker_present,
            "Evaluation finished"
        );
        report
    }
}
