//! Mirror fetch errors.

use std::time::Duration;

use thiserror::Error;

/// Why a single mirror could not supply the list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Timeout ({}ms)", .0.as_millis())]
    Timeout(Duration),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Empty response body ({len} bytes, need {min})")]
    EmptyBody { len: usize, min: usize },

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("JSON not array")]
    NotArray,
}

/// Coarse classification of a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Network unreachable or the request timed out.
    Transport,
    /// Non-success status, or a ghost response with no usable body.
    Protocol,
    /// Body is not a JSON array of strings.
    Format,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Transport(_) | FetchError::Timeout(_) => FetchErrorKind::Transport,
            FetchError::Status(_) | FetchError::EmptyBody { .. } => FetchErrorKind::Protocol,
            FetchError::InvalidJson(_) | FetchError::NotArray => FetchErrorKind::Format,
        }
    }
}
