//! Error types for the tabweave protocol layer.

mod classifier;
mod host;
mod store;
mod tool;

pub use classifier::*;
pub use host::*;
pub use store::*;
pub use tool::*;
