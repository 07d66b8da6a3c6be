//! # Iron Dome RunLoop
//!
//! Decides when the profile page is evaluated.
//!
//! ```text
//!  MutationSource ──┐
//!  UrlWatcher ──────┼── Trigger ──▶ EvaluationScheduler ──▶ EvaluationPipeline
//!  ManualListEditor ┘   (mpsc)      (debounce, one at a     (wait → extract →
//!                                    time, one follow-up)    decide → reconcile)
//! ```
//!
//! ## Key Components
//!
//! - [`EvaluationScheduler`]: actor owning the debounce timer and in-flight flag
//! - [`SchedulerHandle`]: cloneable front door for triggers, stats and reports
//! - [`Evaluation`] / [`EvaluationPipeline`]: one full evaluation pass
//! - [`MutationSource`] / [`UrlWatcher`]: turn page activity into triggers
//! - [`MarkerRuntime`]: startup sequence tying it all together

pub mod error;
pub mod pipeline;
pub mod report;
pub mod runtime;
pub mod scheduler;
pub mod sources;
pub mod stats;

pub use error::{SchedulerError, SchedulerResult};
pub use pipeline::{Evaluation, EvaluationPipeline};
pub use report::EvaluationReport;
pub use runtime::MarkerRuntime;
pub use scheduler::{EvaluationScheduler, SchedulerHandle, SchedulerState};
pub use sources::{MutationSource, UrlWatcher};
pub use stats::{SchedulerStats, StatsSnapshot};

pub use tokio_util::sync::CancellationToken;
