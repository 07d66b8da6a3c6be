//! Result of resolving the membership list.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::membership::MembershipSet;

/// Where the resolved list came from. Observability only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceLabel {
    Manual,
    Cache,
    /// A network mirror, identified by its URL.
    Mirror(String),
    StaleCache,
    None,
}

impl fmt::Display for SourceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLabel::Manual => write!(f, "manual"),
            SourceLabel::Cache => write!(f, "cache"),
            SourceLabel::Mirror(url) => write!(f, "{}", url),
            SourceLabel::StaleCache => write!(f, "stale-cache"),
            SourceLabel::None => write!(f, "none"),
        }
    }
}

/// The resolved membership list, produced once per process.
#[derive(Debug, Clone, Serialize)]
pub struct LoadOutcome {
    pub set: MembershipSet,
    pub source: SourceLabel,
    /// Number of entries in the raw list.
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoadOutcome {
    pub fn from_list(raw_list: &[String], source: SourceLabel) -> Self {
        Self {
            set: MembershipSet::from_raw(raw_list),
            source,
            count: raw_list.len(),
            error: None,
        }
    }

    /// Outcome when every source failed.
    pub fn empty(error: impl Into<String>) -> Self {
        Self {
            set: MembershipSet::new(),
            source: SourceLabel::None,
            count: 0,
            error: Some(error.into()),
        }
    }

    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }
}
