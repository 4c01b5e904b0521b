//! Filtering of context items by free text.

use tabweave_protocols::ContextItem;

/// Case-insensitive substring match over label and value.
///
/// A blank query returns every item.
pub fn search(contexts: &[ContextItem], query: &str) -> Vec<ContextItem> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return contexts.to_vec();
    }
    contexts
        .iter()
        .filter(|item| {
            item.label.to_lowercase().contains(&query) || item.value.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}
