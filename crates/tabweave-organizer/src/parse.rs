//! Interpreting classifier output.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use tabweave_protocols::TabId;

/// One group the classifier proposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupProposal {
    pub group_name: String,
    pub tab_ids: Vec<TabId>,
}

/// Outcome of reading a classifier response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationParse {
    Parsed(Vec<GroupProposal>),
    ParseError(String),
}

/// Read a `{"groups": [{"groupName", "tabIds"}]}` response.
///
/// A surrounding Markdown code fence is tolerated. Tab ids may be integers
/// or integer strings; anything else in `tabIds` is dropped, while a bad
/// shape anywhere else rejects the whole response.
pub fn parse_classification(response: &str) -> ClassificationParse {
    match read_groups(strip_code_fence(response)) {
        Ok(groups) => ClassificationParse::Parsed(groups),
        Err(reason) => ClassificationParse::ParseError(reason),
    }
}

fn read_groups(text: &str) -> Result<Vec<GroupProposal>, String> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| format!("response is not valid JSON: {}", e))?;
    let root = value
        .as_object()
        .ok_or_else(|| "response is not a JSON object".to_string())?;
    let groups = match root.get("groups") {
        Some(Value::Array(groups)) => groups,
        Some(_) => return Err("`groups` is not an array".to_string()),
        None => return Err("response has no `groups` key".to_string()),
    };

    groups
        .iter()
        .enumerate()
        .map(|(index, entry)| read_proposal(index, entry))
        .collect()
}

fn read_proposal(index: usize, entry: &Value) -> Result<GroupProposal, String> {
    let group_name = entry
        .get("groupName")
        .and_then(Value::as_str)
        .ok_or_else(|| format!("group {} has no string `groupName`", index))?;
    let raw_ids = entry
        .get("tabIds")
        .and_then(Value::as_array)
        .ok_or_else(|| format!("group {} has no `tabIds` array", index))?;

    let tab_ids = raw_ids
        .iter()
        .filter_map(|raw| {
            let id = tab_id_of(raw);
            if id.is_none() {
                warn!("Ignoring tab id {} in group '{}'", raw, group_name);
            }
            id
        })
        .collect();

    Ok(GroupProposal {
        group_name: group_name.to_string(),
        tab_ids,
    })
}

fn tab_id_of(raw: &Value) -> Option<TabId> {
    match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (```json) along with the opening fence line.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
