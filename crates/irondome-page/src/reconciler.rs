//! Converging the banner and badge to the membership verdict.

use std::sync::Arc;

use tracing::{debug, info};

use irondome_protocols::{Placement, PlacementStrategy};

use crate::document::{Document, ElementSpec, NodeId};
use crate::layout::{MarkerSpec, PageLayout};
use crate::live::{LivePage, MutationOrigin};

const BANNER_STYLE: &str = "width:750px;height:140px;border:1px solid rgba(255,255,255,0.12);\
border-radius:8px;display:block;margin:10px auto 4px auto";
const BADGE_STYLE: &str = "color:#ff4444;font-weight:bold;text-align:center;margin-top:6px";

/// Removes any existing marker, then inserts a fresh one when required.
///
/// Presence is never tracked here: every pass queries the document by id,
/// so markers removed or duplicated by the host are handled the same way.
pub struct MarkerReconciler {
    page: Arc<LivePage>,
    layout: Arc<PageLayout>,
    marker: MarkerSpec,
}

impl MarkerReconciler {
    pub fn new(page: Arc<LivePage>, layout: Arc<PageLayout>, marker: MarkerSpec) -> Self {
        Self {
            page,
            layout,
            marker,
        }
    }

    pub fn reconcile(&self, should_show: bool) -> Placement {
        let placement = self.page.mutate_as(MutationOrigin::Marker, |doc| {
            let removed = self.remove_existing(doc);
            if removed > 0 {
                debug!("Removed {} stale marker element(s)", removed);
            }
            if should_show {
                self.insert(doc)
            } else {
                Placement::skipped()
            }
        });
        info!("Marker reconciled: {}", placement);
        placement
    }

    /// Whether a banner is currently in the document.
    pub fn is_shown(&self) -> bool {
        self.page
            .read(|doc| doc.get_element_by_id(&self.marker.banner_id).is_some())
    }

    fn remove_existing(&self, doc: &mut Document) -> usize {
        let mut removed = 0;
        for id in [&self.marker.banner_id, &self.marker.badge_id] {
            while let Some(node) = doc.get_element_by_id(id) {
                if !doc.remove(node) {
                    break;
                }
                removed += 1;
            }
        }
        removed
    }

    fn insert(&self, doc: &mut Document) -> Placement {
        if let Some(container) = self.layout.find_container(doc) {
            let banner = self.build(doc, self.banner());
            let badge = self.build(doc, self.badge());
            if doc.insert_after(container, banner) && doc.insert_after(banner, badge) {
                return Placement::placed(PlacementStrategy::AfterContainer);
            }
            // Container is detached; fall through with fresh nodes.
            doc.remove(banner);
            doc.remove(badge);
        }

        let (mount, label) = self
            .layout
            .fallback_mounts
            .iter()
            .find_map(|matcher| doc.query_selector(matcher).map(|id| (id, matcher.to_string())))
            .unwrap_or_else(|| (doc.root(), "document".to_string()));

        doc.append_spec(mount, self.banner());
        doc.append_spec(mount, self.badge());
        Placement::placed(PlacementStrategy::Fallback(label))
    }

    fn build(&self, doc: &mut Document, spec: ElementSpec) -> NodeId {
        let root = doc.root();
        doc.append_spec(root, spec)
    }

    fn banner(&self) -> ElementSpec {
        ElementSpec::new("img")
            .id(&self.marker.banner_id)
            .attr("src", &self.marker.banner_url)
            .attr("alt", &self.marker.banner_alt)
            .attr("width", "750")
            .attr("height", "140")
            .attr("style", BANNER_STYLE)
    }

    fn badge(&self) -> ElementSpec {
        ElementSpec::new("div")
            .id(&self.marker.badge_id)
            .text(&self.marker.badge_text)
            .attr("style", BADGE_STYLE)
    }
}

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod tests;
