//! Classification prompt.

use crate::descriptor::TabDescriptor;

/// Instruction sent to the classifier for one organize run.
pub fn build_prompt(tabs: &[TabDescriptor], min_groups: usize, max_groups: usize) -> String {
    let tab_list = serde_json::to_string_pretty(tabs).unwrap_or_else(|_| "[]".to_string());
    format!(
        "You organize browser tabs into topical groups.\n\
         \n\
         Sort the tabs below into between {min} and {max} groups by topic or task. \
         Give each group a short, descriptive name of one to three words. \
         Only use tab ids from the list, and put each tab in at most one group.\n\
         \n\
         Tabs:\n\
         {tabs}\n\
         \n\
         Respond with a single JSON object and nothing else, in exactly this shape:\n\
         {{\"groups\": [{{\"groupName\": \"<name>\", \"tabIds\": [<tab id>, ...]}}]}}",
        min = min_groups,
        max = max_groups,
        tabs = tab_list,
    )
}
