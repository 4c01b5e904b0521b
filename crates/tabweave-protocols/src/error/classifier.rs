//! Inference endpoint errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_error_api_error() {
        let err = ClassifierError::ApiError {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500 - Internal Server Error");
    }

    #[test]
    fn test_classifier_error_timeout() {
        let err = ClassifierError::Timeout(60);
        assert!(err.to_string().contains("60"));
    }

    #[test]
    fn test_classifier_error_invalid_response() {
        let err = ClassifierError::InvalidResponse("no choices".to_string());
        assert!(err.to_string().contains("no choices"));
    }
}
