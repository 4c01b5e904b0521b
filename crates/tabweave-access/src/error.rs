//! Access policy errors.

use thiserror::Error;

use tabweave_protocols::StoreError;

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Unknown access mode: {0}")]
    UnknownMode(String),

    #[error("Unknown access list: {0}")]
    UnknownList(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_error_display() {
        let err = AccessError::UnknownMode("open".to_string());
        assert_eq!(err.to_string(), "Unknown access mode: open");
    }

    #[test]
    fn test_access_error_from_store() {
        let err: AccessError = StoreError::Failed("disk full".to_string()).into();
        assert!(err.to_string().contains("disk full"));
    }
}
