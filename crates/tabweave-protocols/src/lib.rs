//! # Tabweave Protocols
//!
//! Core protocol definitions for the tabweave engine: the host capability
//! surface the engine consumes, the shared data model, and error types.
//!
//! ## Core Traits
//!
//! - [`BrowserHost`] - Tabs, tab groups, bookmarks, page content and lifecycle events
//! - [`Classifier`] - Text classification through an inference endpoint
//! - [`KeyValueStore`] - Persistent key/value storage
//! - [`Tool`] - Callable actions exposed to the model

pub mod classifier;
pub mod error;
pub mod host;
pub mod store;
pub mod tool;
pub mod types;

pub use classifier::{Classifier, ClassifyOptions};
pub use error::{ClassifierError, HostError, StoreError, ToolError};
pub use host::{BrowserHost, BrowserSnapshot, Capability, MemoryBrowser};
pub use store::KeyValueStore;
pub use tool::{Tool, ToolContext, ToolDefinition, ToolResult};
pub use types::*;
