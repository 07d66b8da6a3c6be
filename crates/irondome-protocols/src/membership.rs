//! Normalized membership set.

use std::collections::BTreeSet;

use serde::Serialize;

/// Canonical form used both when building a set and when querying it.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Set of normalized faction names.
///
/// The inner set is private so every entry goes through [`normalize`], and
/// so does every lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MembershipSet(BTreeSet<String>);

impl MembershipSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw (display-cased) names.
    pub fn from_raw<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(names.into_iter().map(|n| normalize(n.as_ref())).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(&normalize(name))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  The Swarm \n"), "the swarm");
        assert_eq!(normalize("STAGE FRIGHT"), "stage fright");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_case_and_whitespace_variants_match() {
        let set = MembershipSet::from_raw(["the swarm"]);
        assert!(set.contains("The Swarm"));
        assert!(set.contains(" the swarm "));
        assert!(set.contains("THE SWARM"));
        assert!(!set.contains("the swarms"));
    }

    #[test]
    fn test_from_raw_normalizes_entries() {
        let set = MembershipSet::from_raw(vec!["  Alpha", "ALPHA", "Beta "]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_empty_set() {
        let set = MembershipSet::new();
        assert!(set.is_empty());
        assert!(!set.contains("anything"));
    }

    #[test]
    fn test_serialize_as_sorted_array() {
        let set = MembershipSet::from_raw(["Gamma", "alpha"]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["alpha","gamma"]"#);
    }
}
