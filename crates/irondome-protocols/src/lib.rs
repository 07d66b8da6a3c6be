//! # Iron Dome Protocols
//!
//! Data model shared by every stage of the membership pipeline, plus the
//! storage protocol the loader and the manual list editor write through.
//! Contains no I/O.
//!
//! ## Core Types
//!
//! - [`MembershipSet`] - normalized set of faction names
//! - [`CacheRecord`] - persisted list snapshot with capture time
//! - [`LoadOutcome`] - the once-per-process result of list resolution
//! - [`ReadinessPhase`] - which page anchors were found while waiting
//! - [`Placement`] - where the reconciler put the marker
//! - [`Trigger`] - why an evaluation was scheduled
//! - [`ListStore`] - persistent storage for the cache and manual override

pub mod error;
pub mod membership;
pub mod outcome;
pub mod page;
pub mod record;
pub mod store;
pub mod trigger;

pub use error::{FetchError, FetchErrorKind, StoreError};
pub use membership::{normalize, MembershipSet};
pub use outcome::{LoadOutcome, SourceLabel};
pub use page::{Placement, PlacementStrategy, ReadinessPhase};
pub use record::{CacheRecord, CACHE_KEY, MANUAL_KEY};
pub use store::ListStore;
pub use trigger::Trigger;
