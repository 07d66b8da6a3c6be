//! # Iron Dome Store
//!
//! [`ListStore`](irondome_protocols::ListStore) implementations.
//!
//! - [`MemoryListStore`] keeps raw JSON text in memory (tests, simulation)
//! - [`FileListStore`] keeps one JSON file per record key on disk
//!
//! Both decode through the same codec, so a corrupt record behaves the same
//! way everywhere: it is logged and reported as absent.

mod codec;
pub mod file;
pub mod memory;

pub use file::FileListStore;
pub use memory::MemoryListStore;
