//! Project reference disambiguation.
//!
//! Operators may name the target project by id, short identifier, slug or
//! display name. Resolution is best effort: a miss produces a diagnostic and
//! the raw input as a fallback, and the caller decides whether to go on.

use crate::api::WorkspaceApi;
use crate::entities::Project;
use crate::errors::CoreError;
use crate::normalize::normalize_name;

/// Outcome of [`resolve_project`].
#[derive(Debug)]
pub enum ProjectResolution {
    Resolved(String),
    Fallback { raw: String, diagnostic: CoreError },
}

impl ProjectResolution {
    /// The id to use: the resolved one, or the raw input.
    #[must_use]
    pub fn into_id(self) -> String {
        match self {
            Self::Resolved(id) | Self::Fallback { raw: id, .. } => id,
        }
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Whether `raw` already has the shape of a project id: at least eight
/// characters, all hex digits or hyphens.
#[must_use]
pub fn looks_like_id(raw: &str) -> bool {
    let normalized = normalize_name(raw);
    normalized.len() >= 8
        && normalized
            .chars()
            .all(|c| c.is_ascii_hexdigit() || c == '-')
}

/// Find the id of the project whose identifier, name or slug matches `want`
/// (case-insensitive). Projects without an id are never matched.
#[must_use]
pub fn match_project<'a>(want: &str, projects: &'a [Project]) -> Option<&'a str> {
    let want = normalize_name(want);
    if want.is_empty() {
        return None;
    }
    projects
        .iter()
        .filter(|project| {
            [&project.identifier, &project.name, &project.slug]
                .into_iter()
                .any(|candidate| normalize_name(candidate) == want)
        })
        .find_map(|project| project.id.as_deref())
}

/// Resolve `want` to a project id.
///
/// Id-shaped input is returned verbatim without listing projects.
pub async fn resolve_project<A: WorkspaceApi>(api: &A, want: &str) -> ProjectResolution {
    if looks_like_id(want) {
        return ProjectResolution::Resolved(want.to_string());
    }

    let projects = match api.list_projects().await {
        Ok(projects) => projects,
        Err(diagnostic) => {
            return ProjectResolution::Fallback {
                raw: want.to_string(),
                diagnostic,
            };
        }
    };

    match match_project(want, &projects) {
        Some(id) => ProjectResolution::Resolved(id.to_string()),
        None => ProjectResolution::Fallback {
            raw: want.to_string(),
            diagnostic: CoreError::ProjectNotFound {
                want: want.to_string(),
                workspace: api.workspace_slug().to_string(),
            },
        },
    }
}
