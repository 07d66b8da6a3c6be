//! Synthetic Torn profile pages.

use crate::document::{Document, ElementSpec};

/// Builds a profile page document shaped like the real one.
#[derive(Debug, Clone)]
pub struct ProfileFixture {
    faction: Option<String>,
    container: bool,
    main_container: bool,
}

impl ProfileFixture {
    pub fn new() -> Self {
        Self {
            faction: None,
            container: true,
            main_container: true,
        }
    }

    /// Show `name` as the profile's faction.
    pub fn faction(mut self, name: impl Into<String>) -> Self {
        self.faction = Some(name.into());
        self
    }

    /// Omit the `.buttons-list` container.
    pub fn without_container(mut self) -> Self {
        self.container = false;
        self
    }

    /// Omit `#mainContainer`, leaving only `body` as a mount.
    pub fn without_main_container(mut self) -> Self {
        self.main_container = false;
        self
    }

    pub fn build(&self) -> Document {
        let mut doc = Document::new();
        let body = doc.body();
        let mount = if self.main_container {
            doc.append_spec(body, ElementSpec::new("div").id("mainContainer"))
        } else {
            body
        };

        if self.container {
            doc.append_spec(
                mount,
                ElementSpec::new("div")
                    .class("buttons-list")
                    .child(ElementSpec::new("a").class("profile-button").text("Attack"))
                    .child(ElementSpec::new("a").class("profile-button").text("Message")),
            );
        }

        let mut info = ElementSpec::new("div").class("user-information");
        if let Some(faction) = &self.faction {
            info = info.child(
                ElementSpec::new("span")
                    .attr("title", format!("Member of {}", faction.trim()))
                    .child(
                        ElementSpec::new("a")
                            .attr("href", "/factions.php?step=profile&ID=1")
                            .text(faction.clone()),
                    ),
            );
        }
        doc.append_spec(mount, info);
        doc
    }
}

impl Default for ProfileFixture {
    fn default() -> Self {
        Self::new()
    }
}
