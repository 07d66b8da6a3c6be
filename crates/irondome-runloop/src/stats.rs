//! Scheduler counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default)]
pub struct SchedulerStats {
    /// Triggers received on the channel.
    pub triggers: AtomicU64,

    /// Debounce timer expirations.
    pub timer_fires: AtomicU64,

    /// Evaluations spawned.
    pub started: AtomicU64,

    /// Evaluations that finished and published a report.
    pub completed: AtomicU64,

    /// Timer fires that landed while an evaluation was running.
    pub deferred: AtomicU64,

    /// Deferred fires folded into an already queued follow-up.
    pub coalesced: AtomicU64,
}

impl SchedulerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            triggers: self.triggers.load(Ordering::Relaxed),
            timer_fires: self.timer_fires.load(Ordering::Relaxed),
            started: self.started.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            deferred: self.deferred.load(Ordering::Relaxed),
            coalesced: self.coalesced.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`SchedulerStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub triggers: u64,
    pub timer_fires: u64,
    pub started: u64,
    pub completed: u64,
    pub deferred: u64,
    pub coalesced: u64,
}
