//! # Iron Dome Loader
//!
//! Resolves the membership list once per process through an ordered chain
//! of sources, stopping at the first that produces a list:
//!
//! ```text
//! manual override ─▶ fresh cache ─▶ mirror 1 ─▶ … ─▶ mirror n ─▶ stale cache ─▶ empty
//! ```
//!
//! Every failure along the way is logged and turned into "try the next
//! source"; [`ListLoader::resolve`] always yields a [`LoadOutcome`].
//!
//! [`LoadOutcome`]: irondome_protocols::LoadOutcome

pub mod editor;
pub mod fetcher;
pub mod loader;
pub mod provider;

pub use editor::{EditorError, ManualListEditor};
pub use fetcher::{parse_list_body, HttpMirrorFetcher, MirrorFetcher};
pub use loader::ListLoader;
pub use provider::{
    ChainState, FreshCacheProvider, ListProvider, ManualOverrideProvider, MirrorProvider,
    Provision, StaleCacheProvider,
};
