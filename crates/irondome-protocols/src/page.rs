//! Page-facing result types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which anchors were present when the readiness wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadinessPhase {
    /// Container and identity anchor both present.
    Both,
    /// Only the identity anchor.
    AnchorOnly,
    /// Only the container.
    ContainerOnly,
    /// Neither appeared before the deadline.
    Timeout,
}

impl ReadinessPhase {
    pub fn from_presence(container: bool, anchor: bool) -> Option<Self> {
        match (container, anchor) {
            (true, true) => Some(ReadinessPhase::Both),
            (false, true) => Some(ReadinessPhase::AnchorOnly),
            (true, false) => Some(ReadinessPhase::ContainerOnly),
            (false, false) => None,
        }
    }
}

impl fmt::Display for ReadinessPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReadinessPhase::Both => "both",
            ReadinessPhase::AnchorOnly => "anchor-only",
            ReadinessPhase::ContainerOnly => "container-only",
            ReadinessPhase::Timeout => "timeout",
        };
        f.write_str(s)
    }
}

/// How the marker was mounted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStrategy {
    /// Inserted right after the container anchor.
    AfterContainer,
    /// Appended to a fallback mount point.
    Fallback(String),
    /// Marker not required.
    Skipped,
}

/// Result of a reconcile pass. Diagnostic only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub placed: bool,
    pub strategy: PlacementStrategy,
}

impl Placement {
    pub fn skipped() -> Self {
        Self {
            placed: false,
            strategy: PlacementStrategy::Skipped,
        }
    }

    pub fn placed(strategy: PlacementStrategy) -> Self {
        Self {
            placed: true,
            strategy,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.strategy {
            PlacementStrategy::AfterContainer => write!(f, "{} @ container(afterend)", self.placed),
            PlacementStrategy::Fallback(mount) => write!(f, "{} @ {}(append)", self.placed, mount),
            PlacementStrategy::Skipped => write!(f, "{} @ (skipped)", self.placed),
        }
    }
}
