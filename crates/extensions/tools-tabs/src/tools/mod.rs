//! Tool implementations.

mod access;
mod context;
mod organize;

pub use access::*;
pub use context::*;
pub use organize::*;

/// Parameters schema of a tool that takes no arguments.
pub(crate) fn empty_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {}
    })
}
