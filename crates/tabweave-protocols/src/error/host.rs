//! Browser host capability errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Capability unsupported: {0}")]
    Unsupported(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("No active tab")]
    NoActiveTab,

    #[error("Host call failed: {0}")]
    Failed(String),
}
