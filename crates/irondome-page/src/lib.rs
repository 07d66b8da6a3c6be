//! # Iron Dome Page
//!
//! Everything that touches the host profile page.
//!
//! - [`Document`] / [`LivePage`]: the host document and its mutation feed
//! - [`PageLayout`]: where the container and identity anchors live
//! - [`PageReadinessWaiter`]: polls until the anchors appear or time runs out
//! - [`MembershipEvaluator`]: reads the faction name and checks the set
//! - [`MarkerReconciler`]: converges the banner and badge to the verdict
//!
//! The document is the only record of whether the marker is shown; the
//! reconciler re-reads it on every pass.

pub mod document;
pub mod evaluator;
pub mod fixture;
pub mod layout;
pub mod live;
pub mod matcher;
pub mod readiness;
pub mod reconciler;

pub use document::{Document, Element, ElementSpec, NodeId};
pub use evaluator::MembershipEvaluator;
pub use fixture::ProfileFixture;
pub use layout::{MarkerSpec, PageLayout};
pub use live::{LivePage, MutationOrigin, MutationRecord};
pub use matcher::ElementMatcher;
pub use readiness::PageReadinessWaiter;
pub use reconciler::MarkerReconciler;
