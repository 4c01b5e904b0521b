//! Tab organization runs.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use tabweave_protocols::{
    BrowserHost, Classifier, ClassifyOptions, GroupColor, GroupId, GroupQuery, GroupUpdate, TabId,
    TabQuery, WindowId,
};

use crate::descriptor::TabDescriptor;
use crate::error::OrganizeError;
use crate::parse::{parse_classification, ClassificationParse, GroupProposal};
use crate::prompt::build_prompt;

/// Tunables for organize runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizerOptions {
    /// Color of groups the organizer creates.
    pub group_color: GroupColor,
    /// Group count range requested from the classifier.
    pub min_groups: usize,
    pub max_groups: usize,
}

impl Default for OrganizerOptions {
    fn default() -> Self {
        Self {
            group_color: GroupColor::Blue,
            min_groups: 3,
            max_groups: 7,
        }
    }
}

/// Result of [`TabOrganizer::organize_tabs`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizeResult {
    pub success: bool,
    /// Tabs sent to the classifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouped_tabs: Option<usize>,
    /// Groups the classifier proposed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OrganizeResult {
    pub fn success(grouped_tabs: usize, groups: usize) -> Self {
        Self {
            success: true,
            grouped_tabs: Some(grouped_tabs),
            groups: Some(groups),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            grouped_tabs: None,
            groups: None,
            error: Some(error.into()),
        }
    }
}

/// Result of [`TabOrganizer::ungroup_all`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UngroupResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups_ungrouped: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UngroupResult {
    pub fn success(groups_ungrouped: usize) -> Self {
        Self {
            success: true,
            groups_ungrouped: Some(groups_ungrouped),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            groups_ungrouped: None,
            error: Some(error.into()),
        }
    }
}

/// Groups the current window's tabs by topic.
pub struct TabOrganizer {
    host: Arc<dyn BrowserHost>,
    classifier: Arc<dyn Classifier>,
    options: OrganizerOptions,
}

impl TabOrganizer {
    pub fn new(host: Arc<dyn BrowserHost>, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            host,
            classifier,
            options: OrganizerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: OrganizerOptions) -> Self {
        self.options = options;
        self
    }

    /// Classify the current window's tabs and apply the proposed groups.
    ///
    /// Proposals are applied one after another. Tabs join an existing group
    /// of the same title when there is one, so running this again converges
    /// instead of duplicating groups. The group holding the active tab stays
    /// expanded and every other touched group collapses.
    pub async fn organize_tabs(&self) -> OrganizeResult {
        match self.run_organize().await {
            Ok((tabs, groups)) => {
                info!("Organized {} tabs into {} proposed groups", tabs, groups);
                OrganizeResult::success(tabs, groups)
            }
            Err(e) => {
                error!("Tab organization failed: {}", e);
                OrganizeResult::failure(e.to_string())
            }
        }
    }

    /// Dissolve every tab group in the current window.
    pub async fn ungroup_all(&self) -> UngroupResult {
        match self.run_ungroup().await {
            Ok(count) => {
                info!("Ungrouped {} tab groups", count);
                UngroupResult::success(count)
            }
            Err(e) => {
                error!("Ungrouping failed: {}", e);
                UngroupResult::failure(e.to_string())
            }
        }
    }

    async fn run_organize(&self) -> Result<(usize, usize), OrganizeError> {
        let tabs = self.host.query_tabs(TabQuery::current_window()).await?;
        let descriptors: Vec<TabDescriptor> =
            tabs.iter().filter_map(TabDescriptor::from_tab).collect();
        if descriptors.is_empty() {
            debug!("No tabs with a URL in the current window");
            return Ok((0, 0));
        }

        let eligible: HashSet<TabId> = descriptors.iter().map(|d| d.id).collect();
        let active = tabs
            .iter()
            .find(|t| t.active)
            .and_then(|t| t.id)
            .filter(|id| eligible.contains(id));
        let window_id = tabs
            .iter()
            .find(|t| t.id.is_some_and(|id| eligible.contains(&id)))
            .map(|t| t.window_id)
            .unwrap_or_default();

        let prompt = build_prompt(&descriptors, self.options.min_groups, self.options.max_groups);
        debug!("Classifying {} tabs with {}", descriptors.len(), self.classifier.id());
        let response = self
            .classifier
            .classify(&prompt, ClassifyOptions::json())
            .await?;

        let proposals = match parse_classification(&response) {
            ClassificationParse::Parsed(proposals) => proposals,
            ClassificationParse::ParseError(reason) => return Err(OrganizeError::Parse(reason)),
        };

        for proposal in &proposals {
            self.apply_proposal(proposal, &eligible, active, window_id)
                .await?;
        }

        Ok((descriptors.len(), proposals.len()))
    }

    async fn apply_proposal(
        &self,
        proposal: &GroupProposal,
        eligible: &HashSet<TabId>,
        active: Option<TabId>,
        window_id: WindowId,
    ) -> Result<Option<GroupId>, OrganizeError> {
        let mut seen = HashSet::new();
        let tab_ids: Vec<TabId> = proposal
            .tab_ids
            .iter()
            .copied()
            .filter(|id| eligible.contains(id) && seen.insert(*id))
            .collect();
        if tab_ids.len() < proposal.tab_ids.len() {
            debug!(
                "Dropped {} unknown or repeated tab ids from '{}'",
                proposal.tab_ids.len() - tab_ids.len(),
                proposal.group_name
            );
        }
        if tab_ids.is_empty() {
            warn!("Skipping group '{}' with no known tabs", proposal.group_name);
            return Ok(None);
        }

        let collapsed = !active.is_some_and(|id| tab_ids.contains(&id));
        let existing = self
            .host
            .query_tab_groups(GroupQuery {
                window_id: Some(window_id),
                title: Some(proposal.group_name.clone()),
                ..GroupQuery::default()
            })
            .await?
            .into_iter()
            .next();

        let group_id = match existing {
            Some(group) => {
                debug!("Merging {} tabs into group '{}'", tab_ids.len(), proposal.group_name);
                self.host.group_tabs(&tab_ids, Some(group.id)).await?;
                self.host
                    .update_group(group.id, GroupUpdate::default().collapsed(collapsed))
                    .await?;
                group.id
            }
            None => {
                debug!("Creating group '{}' with {} tabs", proposal.group_name, tab_ids.len());
                let group_id = self.host.group_tabs(&tab_ids, None).await?;
                self.host
                    .update_group(
                        group_id,
                        GroupUpdate::default()
                            .title(proposal.group_name.clone())
                            .color(self.options.group_color)
                            .collapsed(collapsed),
                    )
                    .await?;
                group_id
            }
        };
        Ok(Some(group_id))
    }

    async fn run_ungroup(&self) -> Result<usize, OrganizeError> {
        let groups = self
            .host
            .query_tab_groups(GroupQuery::current_window())
            .await?;
        for group in &groups {
            let members: Vec<TabId> = self
                .host
                .query_tabs(TabQuery::in_group(group.id))
                .await?
                .iter()
                .filter_map(|t| t.id)
                .collect();
            if !members.is_empty() {
                self.host.ungroup_tabs(&members).await?;
            }
        }
        Ok(groups.len())
    }
}

#[cfg(test)]
#[path = "organizer_tests.rs"]
mod tests;
