//! Callable actions over tabs, context and host access.
//!
//! ## Tools
//!
//! - `tabs_organize` - Group the current window's tabs by topic
//! - `tabs_ungroup_all` - Dissolve every tab group in the current window
//! - `context_list` - List context items, optionally filtered by a query
//! - `host_access_check` - Check whether the assistant may act on a URL

mod registry;
mod toolset;
mod tools;

pub use registry::ToolRegistry;
pub use toolset::TabToolset;
pub use tools::*;
