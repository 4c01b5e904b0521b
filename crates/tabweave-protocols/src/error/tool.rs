//! Tool execution errors.

use thiserror::Error;

use super::HostError;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Tool already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_not_found() {
        let err = ToolError::NotFound("tabs_sort".to_string());
        assert!(err.to_string().contains("Tool not found"));
        assert!(err.to_string().contains("tabs_sort"));
    }

    #[test]
    fn test_tool_error_invalid_parameters() {
        let err = ToolError::InvalidParameters("missing field `url`".to_string());
        assert!(err.to_string().contains("Invalid parameters"));
    }

    #[test]
    fn test_tool_error_from_host() {
        let err: ToolError = HostError::NoActiveTab.into();
        assert_eq!(err.to_string(), "Host error: No active tab");
    }

    #[test]
    fn test_tool_error_debug() {
        let err = ToolError::AlreadyRegistered("context_list".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("AlreadyRegistered"));
    }
}
