//! Error types for the scheduler.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The scheduler actor has stopped.
    #[error("Channel closed")]
    ChannelClosed,
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
