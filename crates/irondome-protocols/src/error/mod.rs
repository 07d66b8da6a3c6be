//! Error types for the Iron Dome protocol layer.

mod fetch;
mod store;

pub use fetch::*;
pub use store::*;
