//! Row-to-issue payload assembly.

use serde::{Deserialize, Serialize};

use crate::entities::ReferenceEntity;
use crate::mapping::FieldMappings;
use crate::row::InputRow;

/// Body of an issue-creation call. Optional fields are omitted, never null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuePayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub label_ids: Vec<String>,
}

/// Assemble the payload for `row` from already-resolved references.
///
/// Returns `None` when the row has no usable summary; such rows are skipped,
/// not failed. Placeholder references (no id) are dropped silently.
#[must_use]
pub fn build_payload(
    row: &InputRow,
    mappings: &FieldMappings,
    state: Option<&ReferenceEntity>,
    labels: &[ReferenceEntity],
) -> Option<IssuePayload> {
    let name = row.summary()?;

    Some(IssuePayload {
        name: name.to_string(),
        description: row.description().map(str::to_string),
        priority: mappings
            .priority
            .lookup(row.priority())
            .map(str::to_string),
        state_id: state
            .filter(|state| state.is_attachable())
            .and_then(|state| state.id.clone()),
        label_ids: labels
            .iter()
            .filter(|label| label.is_attachable())
            .filter_map(|label| label.id.clone())
            .collect(),
    })
}
