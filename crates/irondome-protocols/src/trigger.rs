//! Evaluation triggers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why an evaluation was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trigger {
    /// First evaluation after the list was resolved.
    Init,
    /// The host page mutated its document.
    Mutation,
    /// The page location changed without a reload.
    UrlChange,
    /// The manual list editor saved a new override.
    ListSaved,
}

impl Trigger {
    pub fn reason(&self) -> &'static str {
        match self {
            Trigger::Init => "init",
            Trigger::Mutation => "mutation",
            Trigger::UrlChange => "url-change",
            Trigger::ListSaved => "manual-paste",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}
