//! Result of one evaluation pass.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use irondome_protocols::{Placement, ReadinessPhase, SourceLabel};

/// Diagnostic record of an evaluation. Nothing reads it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub id: Uuid,

    /// Why the evaluation ran (`init`, `mutation`, ...).
    pub reason: String,

    pub phase: ReadinessPhase,

    /// Faction name found on the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,

    /// Where the membership list came from.
    pub source: SourceLabel,

    /// Size of the membership list.
    pub count: usize,

    /// Identity is in the list, ignoring the force flag.
    pub matched: bool,

    /// Force flag was set.
    pub forced: bool,

    pub placement: Placement,

    /// Banner found in the document after reconciling.
    pub marker_present: bool,

    pub finished_at: DateTime<Utc>,
}

impl EvaluationReport {
    /// Final verdict after applying the force flag.
    pub fn shown(&self) -> bool {
        self.matched || self.forced
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Iron Dome: {}", self.reason)?;
        writeln!(f, "  Wait phase: {}", self.phase)?;
        writeln!(
            f,
            "  Faction: {}",
            self.identity.as_deref().unwrap_or("(not found)")
        )?;
        writeln!(f, "  List source: {} ({})", self.source, self.count)?;
        writeln!(
            f,
            "  In alliance (match | force): {} | {}",
            self.matched, self.forced
        )?;
        writeln!(f, "  Inserted: {}", self.placement)?;
        write!(f, "  Marker present: {}", self.marker_present)
    }
}
