//! Tab grouping tools.

use std::sync::Arc;

use async_trait::async_trait;

use tabweave_organizer::TabOrganizer;
use tabweave_protocols::types::RiskLevel;
use tabweave_protocols::{Tool, ToolContext, ToolDefinition, ToolError, ToolResult};

use super::empty_schema;

/// Groups the current window's tabs by topic.
pub struct OrganizeTabsTool {
    definition: ToolDefinition,
    organizer: Arc<TabOrganizer>,
}

impl OrganizeTabsTool {
    pub fn new(organizer: Arc<TabOrganizer>) -> Self {
        Self {
            definition: ToolDefinition::new(
                "tabs_organize",
                "Organize Tabs",
                "Group the tabs of the current window into named tab groups by topic",
            )
            .with_parameters_schema(empty_schema())
            .with_risk_level(RiskLevel::Medium),
            organizer,
        }
    }
}

#[async_trait]
impl Tool for OrganizeTabsTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        _params: serde_json::Value,
        _ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let result = self.organizer.organize_tabs().await;
        if !result.success {
            return Ok(ToolResult::error(
                result.error.unwrap_or_else(|| "Tab organization failed".to_string()),
            ));
        }

        let summary = format!(
            "Organized {} tabs into {} groups",
            result.grouped_tabs.unwrap_or(0),
            result.groups.unwrap_or(0)
        );
        let output = serde_json::to_value(&result)
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;
        Ok(ToolResult::success_json(summary, output))
    }
}

/// Dissolves every tab group in the current window.
pub struct UngroupAllTool {
    definition: ToolDefinition,
    organizer: Arc<TabOrganizer>,
}

impl UngroupAllTool {
    pub fn new(organizer: Arc<TabOrganizer>) -> Self {
        Self {
            definition: ToolDefinition::new(
                "tabs_ungroup_all",
                "Ungroup All Tabs",
                "Remove every tab group in the current window, keeping the tabs open",
            )
            .with_parameters_schema(empty_schema())
            .with_risk_level(RiskLevel::Medium),
            organizer,
        }
    }
}

#[async_trait]
impl Tool for UngroupAllTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        _params: serde_json::Value,
        _ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let result = self.organizer.ungroup_all().await;
        if !result.success {
            return Ok(ToolResult::error(
                result.error.unwrap_or_else(|| "Ungrouping failed".to_string()),
            ));
        }

        let output = serde_json::to_value(&result)
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;
        Ok(ToolResult::success_json(
            format!("Ungrouped {} tab groups", result.groups_ungrouped.unwrap_or(0)),
            output,
        ))
    }
}
