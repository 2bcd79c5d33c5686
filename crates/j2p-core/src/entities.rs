//! Reference entities, projects and created issues as seen by the importer.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ReferenceKind
// ---------------------------------------------------------------------------

/// Which family of reference data an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Label,
    State,
}

impl ReferenceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::State => "state",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StateGroup
// ---------------------------------------------------------------------------

/// Category a workflow state belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateGroup {
    Backlog,
    Started,
    Completed,
    Cancelled,
}

impl StateGroup {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Started => "started",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse a group as reported by the server. Groups outside the four
    /// known categories (`unstarted`, `triage`, ...) yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "backlog" => Some(Self::Backlog),
            "started" => Some(Self::Started),
            "completed" => Some(Self::Completed),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for StateGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A label or workflow state known to (or intended for) the target project.
///
/// An absent `id` marks a placeholder: the reference was not created and must
/// not be attached to the issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntity {
    pub name: String,
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<StateGroup>,
}

impl ReferenceEntity {
    #[must_use]
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: Some(id.into()),
            group: None,
        }
    }

    /// Entity standing in for a reference that was not created.
    #[must_use]
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            group: None,
        }
    }

    #[must_use]
    pub const fn is_attachable(&self) -> bool {
        self.id.is_some()
    }
}

/// Request body for creating a label or state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<StateGroup>,
}

/// A project as listed by the workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Option<String>,
    /// Short code shown in issue keys (e.g. `WEB`).
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// Server response to an issue creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    pub id: Option<String>,
    #[serde(default)]
    pub sequence_id: Option<u64>,
}

impl fmt::Display for CreatedIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.id, self.sequence_id) {
            (Some(id), Some(seq)) => write!(f, "{id} (#{seq})"),
            (Some(id), None) => f.write_str(id),
            (None, Some(seq)) => write!(f, "#{seq}"),
            (None, None) => f.write_str("<no id>"),
        }
    }
}
