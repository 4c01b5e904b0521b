//! Tool trait definition.

use async_trait::async_trait;

use super::{ToolContext, ToolDefinition, ToolResult};
use crate::error::ToolError;
use crate::types::RiskLevel;

/// Core trait for tools.
///
/// Tools are the fixed catalog of actions the model may invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool definition.
    fn definition(&self) -> &ToolDefinition;

    /// Execute the tool with the given parameters.
    async fn execute(
        &self,
        params: serde_json::Value,
        ctx: ToolContext,
    ) -> Result<ToolResult, ToolError>;

    /// Check `params` against the declared schema before execution.
    ///
    /// `null` stands for "no arguments" and passes unless the schema lists
    /// required keys. Anything else must be an object holding every
    /// required key.
    fn validate(&self, params: &serde_json::Value) -> Result<(), ToolError> {
        let Some(schema) = &self.definition().parameters_schema else {
            return Ok(());
        };
        let required: Vec<&str> = schema
            .get("required")
            .and_then(|r| r.as_array())
            .map(|keys| keys.iter().filter_map(|k| k.as_str()).collect())
            .unwrap_or_default();

        if params.is_null() {
            return match required.first() {
                Some(key) => Err(ToolError::InvalidParameters(format!(
                    "Missing required parameter: {}",
                    key
                ))),
                None => Ok(()),
            };
        }
        let Some(object) = params.as_object() else {
            return Err(ToolError::InvalidParameters(
                "Parameters must be an object".to_string(),
            ));
        };
        if let Some(missing) = required.iter().find(|key| !object.contains_key(**key)) {
            return Err(ToolError::InvalidParameters(format!(
                "Missing required parameter: {}",
                missing
            )));
        }
        Ok(())
    }

    /// Returns the risk level of this tool.
    fn risk_level(&self) -> RiskLevel {
        self.definition().risk_level
    }
}
