//! Shared types for the tabweave engine.

mod browser;
mod common;
mod context;

pub use browser::*;
pub use common::*;
pub use context::*;
