//! Reading the faction name off the page and checking it against the set.

use std::sync::Arc;

use tracing::debug;

use irondome_protocols::MembershipSet;

use crate::layout::PageLayout;
use crate::live::LivePage;

pub struct MembershipEvaluator {
    page: Arc<LivePage>,
    layout: Arc<PageLayout>,
}

impl MembershipEvaluator {
    pub fn new(page: Arc<LivePage>, layout: Arc<PageLayout>) -> Self {
        Self { page, layout }
    }

    /// Faction name from the first qualifying identity link.
    ///
    /// `None` when no holder contains a link or the link text is blank.
    pub fn extract_identity(&self) -> Option<String> {
        let identity = self.page.read(|doc| {
            self.layout
                .find_identity_link(doc)
                .map(|link| doc.text_content(link).trim().to_string())
        });

        match identity {
            Some(name) if !name.is_empty() => Some(name),
            Some(_) => {
                debug!("Identity link found but its text is blank");
                None
            }
            None => None,
        }
    }

    /// Membership verdict. `force` wins over everything else.
    pub fn is_member(identity: Option<&str>, set: &MembershipSet, force: bool) -> bool {
        force || identity.is_some_and(|name| set.contains(name))
    }
}
