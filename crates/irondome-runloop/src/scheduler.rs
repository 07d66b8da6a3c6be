//! Debounced, non-reentrant evaluation scheduling.
//!
//! A single actor task owns the debounce deadline, the pending trigger and
//! the in-flight evaluation. Everything else talks to it through a
//! [`SchedulerHandle`].
//!
//! ```text
//!            trigger                timer fires
//!   Idle ──────────────▶ Pending ──────────────▶ Running ──▶ Idle
//!                                                  │   ▲
//!                          trigger / timer fires   │   │ follow-up
//!                                                  ▼   │
//!                                            Running + follow-up
//! ```
//!
//! A timer that fires while an evaluation is running never starts a second
//! one. It is remembered as a single follow-up that starts as soon as the
//! current evaluation finishes; further fires fold into it.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use irondome_protocols::Trigger;

use crate::error::{SchedulerError, SchedulerResult};
use crate::pipeline::Evaluation;
use crate::report::EvaluationReport;
use crate::stats::{SchedulerStats, StatsSnapshot};

const TRIGGER_BUFFER: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerState {
    /// Nothing armed, nothing running.
    Idle,
    /// Debounce timer armed.
    Pending,
    /// An evaluation is in flight.
    Running,
}

/// Cloneable front door to a running scheduler.
#[derive(Clone)]
pub struct SchedulerHandle {
    triggers: mpsc::Sender<Trigger>,
    stats: Arc<SchedulerStats>,
    reports: watch::Receiver<Option<EvaluationReport>>,
    state: watch::Receiver<SchedulerState>,
    shutdown: CancellationToken,
}

impl SchedulerHandle {
    /// Ask for an evaluation after the debounce window.
    pub async fn notify(&self, trigger: Trigger) -> SchedulerResult<()> {
        self.triggers
            .send(trigger)
            .await
            .map_err(|_| SchedulerError::ChannelClosed)
    }

    /// Raw trigger sender for collaborators that emit their own triggers.
    pub fn sender(&self) -> mpsc::Sender<Trigger> {
        self.triggers.clone()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn state(&self) -> SchedulerState {
        *self.state.borrow()
    }

    /// Most recent report, if any evaluation has finished.
    pub fn latest_report(&self) -> Option<EvaluationReport> {
        self.reports.borrow().clone()
    }

    /// Watch reports as they are published.
    pub fn reports(&self) -> watch::Receiver<Option<EvaluationReport>> {
        self.reports.clone()
    }

    /// Stop the actor. An in-flight evaluation still runs to completion.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

/// The scheduler actor.
pub struct EvaluationScheduler {
    evaluation: Arc<dyn Evaluation>,
    debounce: Duration,
    triggers: mpsc::Receiver<Trigger>,
    shutdown: CancellationToken,
    stats: Arc<SchedulerStats>,
    reports: watch::Sender<Option<EvaluationReport>>,
    state: watch::Sender<SchedulerState>,

    deadline: Option<Instant>,
    pending: Option<Trigger>,
    in_flight: Option<JoinHandle<EvaluationReport>>,
    follow_up: Option<Trigger>,
}

enum Event {
    Trigger(Trigger),
    TimerFired,
    Finished(Result<EvaluationReport, JoinError>),
    Shutdown,
}

impl EvaluationScheduler {
    /// Spawn the actor. It stops when `shutdown` is cancelled or every
    /// trigger sender is dropped.
    pub fn spawn(
        evaluation: Arc<dyn Evaluation>,
        debounce: Duration,
        shutdown: CancellationToken,
    ) -> (SchedulerHandle, JoinHandle<()>) {
        let (trigger_tx, trigger_rx) = mpsc::channel(TRIGGER_BUFFER);
        let (report_tx, report_rx) = watch::channel(None);
        let (state_tx, state_rx) = watch::channel(SchedulerState::Idle);
        let stats = Arc::new(SchedulerStats::new());

        let handle = SchedulerHandle {
            triggers: trigger_tx,
            stats: stats.clone(),
            reports: report_rx,
            state: state_rx,
            shutdown: shutdown.clone(),
        };

        let scheduler = Self {
            evaluation,
            debounce,
            triggers: trigger_rx,
            shutdown,
            stats,
            reports: report_tx,
            state: state_tx,
            deadline: None,
            pending: None,
            in_flight: None,
            follow_up: None,
        };

        let task = tokio::spawn(scheduler.run());
        (handle, task)
    }

    async fn run(mut self) {
        debug!("Evaluation scheduler started (debounce {:?})", self.debounce);

        loop {
            let deadline = self.deadline;
            let running = self.in_flight.is_some();
            let in_flight = &mut self.in_flight;

            let event = tokio::select! {
                _ = self.shutdown.cancelled() => Event::Shutdown,
                msg = self.triggers.recv() => match msg {
                    Some(trigger) => Event::Trigger(trigger),
                    None => Event::Shutdown,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    Event::TimerFired
                }
                joined = join_in_flight(in_flight), if running => Event::Finished(joined),
            };

            match event {
                Event::Trigger(trigger) => self.on_trigger(trigger),
                Event::TimerFired => self.on_timer(),
                Event::Finished(joined) => self.on_finished(joined),
                Event::Shutdown => break,
            }
            self.publish_state();
        }

        self.drain().await;
        info!("Evaluation scheduler stopped");
    }

    fn on_trigger(&mut self, trigger: Trigger) {
        SchedulerStats::bump(&self.stats.triggers);
        debug!("Trigger received: {}", trigger.reason());
        self.pending = Some(trigger);
        self.deadline = Some(Instant::now() + self.debounce);
    }

    fn on_timer(&mut self) {
        self.deadline = None;
        let Some(trigger) = self.pending.take() else {
            return;
        };
        SchedulerStats::bump(&self.stats.timer_fires);

        if self.in_flight.is_some() {
            SchedulerStats::bump(&self.stats.deferred);
            if self.follow_up.replace(trigger).is_some() {
                SchedulerStats::bump(&self.stats.coalesced);
            }
            debug!("Evaluation in flight, follow-up queued ({})", trigger.reason());
            return;
        }
        self.start(trigger);
    }

    fn on_finished(&mut self, joined: Result<EvaluationReport, JoinError>) {
        self.in_flight = None;
        self.publish(joined);

        if let Some(trigger) = self.follow_up.take() {
            debug!("Starting queued follow-up ({})", trigger.reason());
            self.start(trigger);
        }
    }

    fn start(&mut self, trigger: Trigger) {
        SchedulerStats::bump(&self.stats.started);
        let evaluation = self.evaluation.clone();
        self.in_flight = Some(tokio::spawn(async move {
            evaluation.evaluate(trigger).await
        }));
    }

    fn publish(&self, joined: Result<EvaluationReport, JoinError>) {
        match joined {
            Ok(report) => {
                SchedulerStats::bump(&self.stats.completed);
                self.reports.send_replace(Some(report));
            }
            Err(e) => error!("Evaluation task failed: {}", e),
        }
    }

    fn publish_state(&self) {
        let state = if self.in_flight.is_some() {
            SchedulerState::Running
        } else if self.deadline.is_some() {
            SchedulerState::Pending
        } else {
            SchedulerState::Idle
        };
        self.state.send_if_modified(|current| {
            let changed = *current != state;
            *current = state;
            changed
        });
    }

    /// Let an in-flight evaluation finish so its report is not lost.
    async fn drain(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            debug!("Waiting for in-flight evaluation before stopping");
            self.publish(handle.await);
        }
        self.state.send_replace(SchedulerState::Idle);
    }
}

async fn join_in_flight(
    in_flight: &mut Option<JoinHandle<EvaluationReport>>,
) -> Result<EvaluationReport, JoinError> {
    match in_flight {
        Some(handle) => handle.await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
