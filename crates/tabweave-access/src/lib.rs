//! # Tabweave Access
//!
//! Decides which sites the assistant may act on.
//!
//! [`is_allowed`] is a pure matcher over a [`HostAccessConfig`];
//! [`HostAccessPolicy`] keeps the config of record in a
//! [`KeyValueStore`](tabweave_protocols::KeyValueStore).

mod config;
mod error;
mod matcher;
mod policy;

pub use config::{AccessList, AccessMode, HostAccessConfig};
pub use error::AccessError;
pub use matcher::{is_allowed, AccessDecision};
pub use policy::{HostAccessPolicy, STORAGE_KEY};
