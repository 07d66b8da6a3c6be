//! Page-specific anchor locations and marker identity.

use serde::{Deserialize, Serialize};

use irondome_config::MarkerConfig;

use crate::document::{Document, NodeId};
use crate::matcher::ElementMatcher;

/// Where the pipeline finds its anchors on the host page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLayout {
    /// Mount point the marker is inserted after.
    pub container: ElementMatcher,

    /// Element whose structure marks it as the faction line.
    pub identity_holder: ElementMatcher,

    /// Link inside the holder; its text is the faction name.
    pub identity_link: ElementMatcher,

    /// Tried in order when the container is missing.
    pub fallback_mounts: Vec<ElementMatcher>,
}

impl PageLayout {
    /// Layout of a Torn profile page.
    pub fn torn_profile() -> Self {
        Self {
            container: ElementMatcher::class("buttons-list"),
            identity_holder: ElementMatcher::tag("span").with_attr_containing("title", " of "),
            identity_link: ElementMatcher::tag("a").with_attr_containing("href", "/factions.php"),
            fallback_mounts: vec![
                ElementMatcher::id("mainContainer"),
                ElementMatcher::tag("main"),
                ElementMatcher::id("content"),
                ElementMatcher::tag("body"),
            ],
        }
    }

    pub fn find_container(&self, doc: &Document) -> Option<NodeId> {
        doc.query_selector(&self.container)
    }

    /// First identity link inside a qualifying holder.
    pub fn find_identity_link(&self, doc: &Document) -> Option<NodeId> {
        doc.query_selector_all(&self.identity_holder)
            .into_iter()
            .find_map(|holder| doc.query_within(holder, &self.identity_link).into_iter().next())
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::torn_profile()
    }
}

/// The banner and badge the reconciler inserts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerSpec {
    pub banner_id: String,
    pub banner_url: String,
    pub banner_alt: String,
    pub badge_id: String,
    pub badge_text: String,
}

impl From<&MarkerConfig> for MarkerSpec {
    fn from(config: &MarkerConfig) -> Self {
        Self {
            banner_id: config.banner_id.clone(),
            banner_url: config.banner_url.clone(),
            banner_alt: config.banner_alt.clone(),
            badge_id: config.badge_id.clone(),
            badge_text: config.badge_text.clone(),
        }
    }
}

impl Default for MarkerSpec {
    fn default() -> Self {
        Self::from(&MarkerConfig::default())
    }
}
