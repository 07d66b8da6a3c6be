//! # Iron Dome Config
//!
//! TOML configuration for the membership pipeline: mirror list and cache
//! policy, storage location, page timing and marker identity.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
