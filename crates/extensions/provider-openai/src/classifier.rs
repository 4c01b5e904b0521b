//! OpenAI chat completions classifier.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use tabweave_protocols::{Classifier, ClassifierError, ClassifyOptions};

use crate::api::{ApiErrorBody, ApiMessage, ApiRequest, ApiResponse, ResponseFormat};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const SYSTEM_PROMPT: &str =
    "You sort browser tabs into topical groups. Reply with JSON only, no commentary.";

/// Classifier backed by an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAIClassifier {
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl OpenAIClassifier {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            client: reqwest::Client::new(),
        }
    }

    /// Point at another OpenAI-compatible server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn build_request(&self, prompt: &str, options: ClassifyOptions) -> ApiRequest {
        ApiRequest {
            model: self.model.clone(),
            messages: vec![ApiMessage::system(SYSTEM_PROMPT), ApiMessage::user(prompt)],
            temperature: Some(0.2),
            response_format: options.json_mode.then(ResponseFormat::json_object),
        }
    }

    async fn send_request(&self, api_request: &ApiRequest) -> Result<reqwest::Response, ClassifierError> {
        let mut builder = self
            .client
            .post(self.endpoint())
            .timeout(self.timeout)
            .header("Content-Type", "application/json")
            .json(api_request);
        // Local OpenAI-compatible servers often run without a key.
        if !self.api_key.is_empty() {
            builder = builder.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ClassifierError::Timeout(self.timeout.as_secs())
            } else {
                ClassifierError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|body| body.error.message)
                .unwrap_or(text);
            return Err(match status.as_u16() {
                401 | 403 => ClassifierError::AuthenticationFailed(message),
                code => ClassifierError::ApiError {
                    status: code,
                    message,
                },
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl Classifier for OpenAIClassifier {
    fn id(&self) -> &str {
        "openai"
    }

    async fn classify(
        &self,
        prompt: &str,
        options: ClassifyOptions,
    ) -> Result<String, ClassifierError> {
        let api_request = self.build_request(prompt, options);
        debug!(
            "Sending classification request to {} (model {}, json_mode {})",
            self.endpoint(),
            self.model,
            options.json_mode
        );
        let response = self.send_request(&api_request).await?;
        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ClassifierError::InvalidResponse("response has no choices".to_string()))?;
        if choice.finish_reason.as_deref() == Some("length") {
            warn!("Classification output was truncated at the token limit");
        }
        let content = choice
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ClassifierError::InvalidResponse("response has no content".to_string()))?;

        debug!(
            "Received {} bytes from {}",
            content.len(),
            api_response.model.as_deref().unwrap_or(self.model.as_str())
        );
        Ok(content)
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
