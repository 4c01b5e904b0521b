//! # Tabweave Config
//!
//! Configuration management and key/value stores for tabweave.

mod error;
mod loader;
mod schema;
mod store;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use store::{JsonFileStore, MemoryStore};
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
