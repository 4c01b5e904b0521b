use super::*;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::broadcast;

use tabweave_protocols::{
    BookmarkNode, BrowserSnapshot, Capability, ClassifierError, HostError, MemoryBrowser, Tab,
    TabEvent, TabGroup,
};

/// Returns a canned response and records what it was asked.
struct MockClassifier {
    response: Option<String>,
    calls: Mutex<Vec<(String, ClassifyOptions)>>,
}

impl MockClassifier {
    fn new(response: serde_json::Value) -> Self {
        Self::raw(response.to_string())
    }

    fn raw(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            response: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    fn id(&self) -> &str {
        "mock"
    }

    async fn classify(
        &self,
        prompt: &str,
        options: ClassifyOptions,
    ) -> Result<String, ClassifierError> {
        self.calls.lock().push((prompt.to_string(), options));
        self.response.clone().ok_or_else(|| ClassifierError::ApiError {
            status: 503,
            message: "overloaded".to_string(),
        })
    }
}

/// Five tabs on a.com, a.com, b.com, c.com, c.com; tab 1 is active.
fn five_tabs() -> Arc<MemoryBrowser> {
    let snapshot = BrowserSnapshot {
        current_window: 1,
        tabs: vec![
            Tab::new(1, 1, "A one", "https://a.com/1").with_active(true),
            Tab::new(2, 1, "A two", "https://a.com/2"),
            Tab::new(3, 1, "B", "https://b.com/"),
            Tab::new(4, 1, "C one", "https://c.com/1"),
            Tab::new(5, 1, "C two", "https://c.com/2"),
        ],
        ..Default::default()
    };
    Arc::new(MemoryBrowser::from_snapshot(snapshot))
}

/// Delegates to a [`MemoryBrowser`] but fails the nth `update_group` call.
struct FlakyHost {
    inner: Arc<MemoryBrowser>,
    fail_on: usize,
    updates: AtomicUsize,
}

#[async_trait]
impl BrowserHost for FlakyHost {
    async fn query_tabs(&self, query: TabQuery) -> Result<Vec<Tab>, HostError> {
        self.inner.query_tabs(query).await
    }

    async fn get_tab(&self, id: TabId) -> Result<Tab, HostError> {
        self.inner.get_tab(id).await
    }

    fn subscribe(&self) -> broadcast::Receiver<TabEvent> {
        self.inner.subscribe()
    }

    async fn query_tab_groups(&self, query: GroupQuery) -> Result<Vec<TabGroup>, HostError> {
        self.inner.query_tab_groups(query).await
    }

    async fn group_tabs(
        &self,
        tab_ids: &[TabId],
        group_id: Option<GroupId>,
    ) -> Result<GroupId, HostError> {
        self.inner.group_tabs(tab_ids, group_id).await
    }

    async fn update_group(
        &self,
        group_id: GroupId,
        update: GroupUpdate,
    ) -> Result<TabGroup, HostError> {
        if self.updates.fetch_add(1, Ordering::SeqCst) + 1 == self.fail_on {
            return Err(HostError::Failed("tab group was dragged away".to_string()));
        }
        self.inner.update_group(group_id, update).await
    }

    async fn ungroup_tabs(&self, tab_ids: &[TabId]) -> Result<(), HostError> {
        self.inner.ungroup_tabs(tab_ids).await
    }

    async fn get_bookmark_tree(&self) -> Result<Vec<BookmarkNode>, HostError> {
        self.inner.get_bookmark_tree().await
    }
}

fn a_and_c() -> serde_json::Value {
    json!({
        "groups": [
            {"groupName": "A", "tabIds": [1, 2]},
            {"groupName": "C", "tabIds": [4, 5]}
        ]
    })
}

fn group_named<'a>(groups: &'a [TabGroup], title: &str) -> &'a TabGroup {
    groups
        .iter()
        .find(|g| g.title.as_deref() == Some(title))
        .unwrap_or_else(|| panic!("no group named {}", title))
}

fn members(browser: &MemoryBrowser, group_id: GroupId) -> Vec<TabId> {
    browser
        .tabs()
        .iter()
        .filter(|t| t.group_id == Some(group_id))
        .filter_map(|t| t.id)
        .collect()
}

#[tokio::test]
async fn test_organize_five_tabs() {
    let browser = five_tabs();
    let organizer = TabOrganizer::new(browser.clone(), Arc::new(MockClassifier::new(a_and_c())));

    let result = organizer.organize_tabs().await;
    assert_eq!(result, OrganizeResult::success(5, 2));

    let groups = browser.groups();
    assert_eq!(groups.len(), 2);
    let a = group_named(&groups, "A");
    let c = group_named(&groups, "C");
    assert_eq!(members(&browser, a.id), vec![1, 2]);
    assert_eq!(members(&browser, c.id), vec![4, 5]);
    assert_eq!(a.color, GroupColor::Blue);

    let b = browser.tabs().into_iter().find(|t| t.id == Some(3)).unwrap();
    assert_eq!(b.group_id, None);
}

#[tokio::test]
async fn test_active_group_stays_expanded() {
    let browser = five_tabs();
    let organizer = TabOrganizer::new(browser.clone(), Arc::new(MockClassifier::new(a_and_c())));
    organizer.organize_tabs().await;

    let groups = browser.groups();
    assert!(!group_named(&groups, "A").collapsed);
    assert!(group_named(&groups, "C").collapsed);
}

#[tokio::test]
async fn test_repeated_runs_converge() {
    let browser = five_tabs();
    let organizer = TabOrganizer::new(browser.clone(), Arc::new(MockClassifier::new(a_and_c())));

    organizer.organize_tabs().await;
    let first = browser.groups();
    let result = organizer.organize_tabs().await;
    assert!(result.success);

    let second = browser.groups();
    assert_eq!(second.len(), 2);
    assert_eq!(group_named(&first, "A").id, group_named(&second, "A").id);
    assert_eq!(group_named(&first, "C").id, group_named(&second, "C").id);
}

#[tokio::test]
async fn test_merges_into_existing_user_group() {
    let browser = five_tabs();
    browser.open_tab(Tab::new(6, 1, "A three", "https://a.com/3"));
    let user_group = browser.group_tabs(&[6], None).await.unwrap();
    browser
        .update_group(
            user_group,
            GroupUpdate::default().title("A").color(GroupColor::Purple),
        )
        .await
        .unwrap();

    let organizer = TabOrganizer::new(browser.clone(), Arc::new(MockClassifier::new(a_and_c())));
    organizer.organize_tabs().await;

    let groups = browser.groups();
    assert_eq!(groups.len(), 2);
    let a = group_named(&groups, "A");
    assert_eq!(a.id, user_group);
    // The user's color choice survives the merge.
    assert_eq!(a.color, GroupColor::Purple);
    assert_eq!(members(&browser, a.id), vec![1, 2, 6]);
}

#[tokio::test]
async fn test_stale_ids_filtered_and_empty_proposals_skipped() {
    let browser = five_tabs();
    let classifier = MockClassifier::new(json!({
        "groups": [
            {"groupName": "A", "tabIds": [1, 99, "2", 2]},
            {"groupName": "Ghosts", "tabIds": [100, 101]},
            {"groupName": "C", "tabIds": [4]}
        ]
    }));
    let organizer = TabOrganizer::new(browser.clone(), Arc::new(classifier));

    let result = organizer.organize_tabs().await;
    // Proposed groups are counted, not applied ones.
    assert_eq!(result, OrganizeResult::success(5, 3));

    let groups = browser.groups();
    assert_eq!(groups.len(), 2);
    assert!(groups.iter().all(|g| g.title.as_deref() != Some("Ghosts")));
    assert_eq!(members(&browser, group_named(&groups, "A").id), vec![1, 2]);
}

#[tokio::test]
async fn test_parse_error_applies_nothing() {
    let browser = five_tabs();
    let organizer = TabOrganizer::new(
        browser.clone(),
        Arc::new(MockClassifier::new(json!({"clusters": []}))),
    );

    let result = organizer.organize_tabs().await;
    assert!(!result.success);
    assert!(result.error.unwrap().contains("groups"));
    assert!(browser.groups().is_empty());
}

#[tokio::test]
async fn test_fenced_response_is_accepted() {
    let browser = five_tabs();
    let fenced = format!("```json\n{}\n```", a_and_c());
    let organizer = TabOrganizer::new(browser.clone(), Arc::new(MockClassifier::raw(fenced)));
    assert!(organizer.organize_tabs().await.success);
    assert_eq!(browser.groups().len(), 2);
}

#[tokio::test]
async fn test_classifier_failure_is_reported() {
    let browser = five_tabs();
    let organizer = TabOrganizer::new(browser.clone(), Arc::new(MockClassifier::failing()));

    let result = organizer.organize_tabs().await;
    assert!(!result.success);
    assert!(result.error.unwrap().contains("503"));
    assert!(browser.groups().is_empty());
}

#[tokio::test]
async fn test_no_tabs_is_success_without_classification() {
    let browser = Arc::new(MemoryBrowser::new());
    let mut blank = Tab::new(1, 1, "New Tab", "");
    blank.url = None;
    browser.open_tab(blank);
    let classifier = Arc::new(MockClassifier::new(a_and_c()));
    let organizer = TabOrganizer::new(browser, classifier.clone());

    let result = organizer.organize_tabs().await;
    assert_eq!(result, OrganizeResult::success(0, 0));
    assert_eq!(classifier.call_count(), 0);
}

#[tokio::test]
async fn test_prompt_covers_current_window_only() {
    let browser = five_tabs();
    browser.open_tab(Tab::new(9, 2, "Elsewhere", "https://elsewhere.test/"));
    let mut no_url = Tab::new(10, 1, "Loading", "");
    no_url.url = None;
    browser.open_tab(no_url);

    let classifier = Arc::new(MockClassifier::new(json!({"groups": []})));
    let organizer = TabOrganizer::new(browser, classifier.clone());
    let result = organizer.organize_tabs().await;
    assert_eq!(result, OrganizeResult::success(5, 0));

    let calls = classifier.calls.lock();
    let (prompt, options) = &calls[0];
    assert!(options.json_mode);
    assert!(prompt.contains("https://c.com/2"));
    assert!(!prompt.contains("elsewhere.test"));
    assert!(!prompt.contains("Loading"));
}

#[tokio::test]
async fn test_other_window_ids_are_stale() {
    let browser = five_tabs();
    browser.open_tab(Tab::new(9, 2, "Elsewhere", "https://elsewhere.test/"));
    let classifier = MockClassifier::new(json!({
        "groups": [{"groupName": "Mixed", "tabIds": [3, 9]}]
    }));
    let organizer = TabOrganizer::new(browser.clone(), Arc::new(classifier));
    organizer.organize_tabs().await;

    let elsewhere = browser.tabs().into_iter().find(|t| t.id == Some(9)).unwrap();
    assert_eq!(elsewhere.group_id, None);
}

#[tokio::test]
async fn test_custom_options() {
    let browser = five_tabs();
    let classifier = Arc::new(MockClassifier::new(a_and_c()));
    let organizer = TabOrganizer::new(browser.clone(), classifier.clone()).with_options(
        OrganizerOptions {
            group_color: GroupColor::Green,
            min_groups: 2,
            max_groups: 4,
        },
    );
    organizer.organize_tabs().await;

    assert!(browser.groups().iter().all(|g| g.color == GroupColor::Green));
    assert!(classifier.calls.lock()[0].0.contains("between 2 and 4 groups"));
}

#[tokio::test]
async fn test_denied_tab_groups_fail_cleanly() {
    let browser = five_tabs();
    browser.deny(Capability::TabGroups);
    let organizer = TabOrganizer::new(browser.clone(), Arc::new(MockClassifier::new(a_and_c())));

    let result = organizer.organize_tabs().await;
    assert!(!result.success);
    assert!(result.error.unwrap().contains("Permission denied"));
}

#[tokio::test]
async fn test_partial_failure_keeps_applied_groups() {
    let browser = five_tabs();
    let host = Arc::new(FlakyHost {
        inner: browser.clone(),
        fail_on: 2,
        updates: AtomicUsize::new(0),
    });
    let organizer = TabOrganizer::new(host, Arc::new(MockClassifier::new(a_and_c())));

    let result = organizer.organize_tabs().await;
    assert!(!result.success);
    assert!(result.error.unwrap().contains("dragged away"));

    let groups = browser.groups();
    let a = group_named(&groups, "A");
    assert_eq!(members(&browser, a.id), vec![1, 2]);
    assert!(!groups.iter().any(|g| g.title.as_deref() == Some("C")));
}

#[tokio::test]
async fn test_ungroup_all_current_window() {
    let browser = five_tabs();
    browser.open_tab(Tab::new(9, 2, "Elsewhere", "https://elsewhere.test/"));
    let other = browser.group_tabs(&[9], None).await.unwrap();

    let organizer = TabOrganizer::new(browser.clone(), Arc::new(MockClassifier::new(a_and_c())));
    organizer.organize_tabs().await;
    assert_eq!(browser.groups().len(), 3);

    let result = organizer.ungroup_all().await;
    assert_eq!(result, UngroupResult::success(2));

    let groups = browser.groups();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].id, other);
}

#[tokio::test]
async fn test_ungroup_all_without_groups() {
    let organizer = TabOrganizer::new(five_tabs(), Arc::new(MockClassifier::new(a_and_c())));
    assert_eq!(organizer.ungroup_all().await, UngroupResult::success(0));
}

#[tokio::test]
async fn test_ungroup_failure_is_reported() {
    let browser = five_tabs();
    browser.deny(Capability::TabGroups);
    let organizer = TabOrganizer::new(browser, Arc::new(MockClassifier::new(a_and_c())));
    let result = organizer.ungroup_all().await;
    assert!(!result.success);
    assert!(result.error.is_some());
}

#[test]
fn test_result_serialization() {
    let json = serde_json::to_value(OrganizeResult::success(5, 2)).unwrap();
    assert_eq!(json, json!({"success": true, "groupedTabs": 5, "groups": 2}));

    let json = serde_json::to_value(UngroupResult::failure("boom")).unwrap();
    assert_eq!(json, json!({"success": false, "error": "boom"}));
}
