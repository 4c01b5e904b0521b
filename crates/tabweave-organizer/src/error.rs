//! Organizer errors.

use thiserror::Error;

use tabweave_protocols::{ClassifierError, HostError};

/// Failure of an organize or ungroup run.
///
/// Public operations report these inside their result values.
#[derive(Debug, Error)]
pub enum OrganizeError {
    #[error("Browser error: {0}")]
    Host(#[from] HostError),

    #[error("Classification failed: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("Unusable classification: {0}")]
    Parse(String),
}
