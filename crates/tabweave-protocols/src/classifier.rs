//! Text classification through an inference endpoint.

use async_trait::async_trait;

use crate::error::ClassifierError;

/// Options for a classification call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// Ask the endpoint for structured JSON output.
    pub json_mode: bool,
}

impl ClassifyOptions {
    /// Request structured JSON output.
    pub fn json() -> Self {
        Self { json_mode: true }
    }
}

/// A text-generation endpoint used to classify free text.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Returns the classifier ID.
    fn id(&self) -> &str;

    /// Send `prompt` to the endpoint and return the raw generated text.
    async fn classify(
        &self,
        prompt: &str,
        options: ClassifyOptions,
    ) -> Result<String, ClassifierError>;
}
