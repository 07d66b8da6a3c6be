use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::time::sleep;
use uuid::Uuid;

use irondome_protocols::{Placement, ReadinessPhase, SourceLabel};

use super::*;

/// Evaluation that takes a fixed time and records what it saw.
struct RecordingEvaluation {
    duration: Duration,
    runs: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
    reasons: Mutex<Vec<String>>,
}

impl RecordingEvaluation {
    fn new(duration: Duration) -> Arc<Self> {
        Arc::new(Self {
            duration,
            runs: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
            reasons: Default::default(),
        })
    }

    fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }

    fn reasons(&self) -> Vec<String> {
        self.reasons.lock().unwrap().clone()
    }
}

#[async_trait]
impl Evaluation for RecordingEvaluation {
    async fn evaluate(&self, trigger: Trigger) -> EvaluationReport {
        self.runs.fetch_add(1, Ordering::SeqCst);
        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now_active, Ordering::SeqCst);
        self.reasons.lock().unwrap().push(trigger.reason().to_string());

        sleep(self.duration).await;

        self.active.fetch_sub(1, Ordering::SeqCst);
        EvaluationReport {
            id: Uuid::new_v4(),
            reason: trigger.reason().to_string(),
            phase: ReadinessPhase::Both,
            identity: None,
            source: SourceLabel::None,
            count: 0,
            matched: false,
            forced: false,
            placement: Placement::skipped(),
            marker_present: false,
            finished_at: Utc::now(),
        }
    }
}

const DEBOUNCE: Duration = Duration::from_millis(250);

fn spawn(evaluation: Arc<RecordingEvaluation>) -> (SchedulerHandle, JoinHandle<()>) {
    EvaluationScheduler::spawn(evaluation, DEBOUNCE, CancellationToken::new())
}

#[tokio::test(start_paused = true)]
async fn test_burst_of_triggers_runs_once() {
    let eval = RecordingEvaluation::new(Duration::from_millis(10));
    let (handle, _task) = spawn(eval.clone());

    for _ in 0..20 {
        handle.notify(Trigger::Mutation).await.unwrap();
        sleep(Duration::from_millis(50)).await;
    }
    handle.notify(Trigger::UrlChange).await.unwrap();

    sleep(Duration::from_secs(2)).await;

    assert_eq!(eval.runs(), 1);
    assert_eq!(eval.reasons(), vec!["url-change".to_string()]);
    let stats = handle.stats();
    assert_eq!(stats.triggers, 21);
    assert_eq!(stats.timer_fires, 1);
    assert_eq!(stats.completed, 1);
    assert_eq!(handle.latest_report().unwrap().reason, "url-change");
}

#[tokio::test(start_paused = true)]
async fn test_evaluation_waits_for_debounce_window() {
    let eval = RecordingEvaluation::new(Duration::from_millis(10));
    let (handle, _task) = spawn(eval.clone());

    handle.notify(Trigger::Mutation).await.unwrap();
    sleep(Duration::from_millis(200)).await;
    assert_eq!(eval.runs(), 0);
    assert_eq!(handle.state(), SchedulerState::Pending);

    sleep(Duration::from_millis(100)).await;
    assert_eq!(eval.runs(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_fire_during_run_queues_one_follow_up() {
    let eval = RecordingEvaluation::new(Duration::from_secs(5));
    let (handle, _task) = spawn(eval.clone());

    handle.notify(Trigger::Init).await.unwrap();
    sleep(Duration::from_millis(300)).await;
    assert_eq!(eval.runs(), 1);
    assert_eq!(handle.state(), SchedulerState::Running);

    // Three separate debounce windows expire while the first run is busy.
    for _ in 0..3 {
        handle.notify(Trigger::Mutation).await.unwrap();
        sleep(Duration::from_millis(400)).await;
    }
    assert_eq!(eval.runs(), 1);

    sleep(Duration::from_secs(20)).await;

    assert_eq!(eval.runs(), 2);
    assert_eq!(eval.max_active.load(Ordering::SeqCst), 1);
    let stats = handle.stats();
    assert_eq!(stats.deferred, 3);
    assert_eq!(stats.coalesced, 2);
    assert_eq!(stats.completed, 2);
    assert_eq!(handle.state(), SchedulerState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_trigger_during_run_without_fire_is_plain_debounce() {
    let eval = RecordingEvaluation::new(Duration::from_secs(1));
    let (handle, _task) = spawn(eval.clone());

    handle.notify(Trigger::Init).await.unwrap();
    sleep(Duration::from_millis(300)).await;

    // Timer is armed while running but only expires after the run ends.
    sleep(Duration::from_millis(800)).await;
    handle.notify(Trigger::Mutation).await.unwrap();
    sleep(Duration::from_secs(3)).await;

    assert_eq!(eval.runs(), 2);
    assert_eq!(handle.stats().deferred, 0);
    assert_eq!(eval.reasons(), vec!["init".to_string(), "mutation".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_lets_in_flight_finish() {
    let eval = RecordingEvaluation::new(Duration::from_secs(1));
    let (handle, task) = spawn(eval.clone());

    handle.notify(Trigger::Init).await.unwrap();
    sleep(Duration::from_millis(300)).await;
    handle.shutdown();
    task.await.unwrap();

    assert_eq!(handle.stats().completed, 1);
    assert!(handle.latest_report().is_some());
    assert!(matches!(
        handle.notify(Trigger::Mutation).await,
        Err(SchedulerError::ChannelClosed)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_report_watch_sees_each_run() {
    let eval = RecordingEvaluation::new(Duration::from_millis(10));
    let (handle, _task) = spawn(eval.clone());
    let mut reports = handle.reports();

    handle.notify(Trigger::ListSaved).await.unwrap();
    reports.changed().await.unwrap();
    let report = reports.borrow_and_update().clone().unwrap();
    assert_eq!(report.reason, "manual-paste");
}
