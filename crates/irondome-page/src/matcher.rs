//! Simple element matching.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::Element;

/// Matches elements by tag, id, class and attribute substrings.
///
/// Covers the handful of selector shapes the profile page needs
/// (`.buttons-list`, `#content`, `span[title*=" of "]`) without a CSS engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementMatcher {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    /// `(attribute, substring)` pairs that must all match.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attr_contains: Vec<(String, String)>,
}

impl ElementMatcher {
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into().to_lowercase()),
            ..Default::default()
        }
    }

    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn class(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            ..Default::default()
        }
    }

    /// Require `attribute` to contain `needle`.
    pub fn with_attr_containing(
        mut self,
        attribute: impl Into<String>,
        needle: impl Into<String>,
    ) -> Self {
        self.attr_contains.push((attribute.into(), needle.into()));
        self
    }

    pub fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if element.tag_name != *tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.id() != Some(id.as_str()) {
                return false;
            }
        }
        if let Some(class) = &self.class {
            if !element.has_class(class) {
                return false;
            }
        }
        self.attr_contains.iter().all(|(name, needle)| {
            element
                .attribute(name)
                .is_some_and(|value| value.contains(needle.as_str()))
        })
    }
}

impl fmt::Display for ElementMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            write!(f, "{}", tag)?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{}", id)?;
        }
        if let Some(class) = &self.class {
            write!(f, ".{}", class)?;
        }
        for (name, needle) in &self.attr_contains {
            write!(f, "[{}*=\"{}\"]", name, needle)?;
        }
        if self.tag.is_none() && self.id.is_none() && self.class.is_none() && self.attr_contains.is_empty() {
            write!(f, "*")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, ElementSpec};

    #[test]
    fn test_display() {
        assert_eq!(ElementMatcher::class("buttons-list").to_string(), ".buttons-list");
        assert_eq!(ElementMatcher::id("content").to_string(), "#content");
        assert_eq!(
            ElementMatcher::tag("span").with_attr_containing("title", " of ").to_string(),
            "span[title*=\" of \"]"
        );
        assert_eq!(ElementMatcher::default().to_string(), "*");
    }

    #[test]
    fn test_matching() {
        let mut doc = Document::new();
        let body = doc.body();
        let span = doc.append_spec(
            body,
            ElementSpec::new("SPAN")
                .class("user-info  highlighted")
                .attr("title", "Leader of The Swarm"),
        );
        let el = doc.element(span).unwrap();

        assert!(ElementMatcher::tag("span").matches(el));
        assert!(ElementMatcher::class("highlighted").matches(el));
        assert!(!ElementMatcher::class("user").matches(el));
        assert!(ElementMatcher::tag("span").with_attr_containing("title", " of ").matches(el));
        assert!(!ElementMatcher::tag("span").with_attr_containing("title", "Member").matches(el));
        assert!(!ElementMatcher::tag("span").with_attr_containing("href", "").matches(el));
        assert!(!ElementMatcher::id("x").matches(el));
    }
}
