//! Collaborator contracts the importer talks to.
//!
//! `j2p-plane` implements these over HTTP; tests implement them in memory.
//! All calls are awaited one at a time, so implementations need not be `Send`.

use crate::entities::{CreatedIssue, EntityDraft, Project, ReferenceEntity, ReferenceKind};
use crate::errors::CoreError;
use crate::payload::IssuePayload;

/// Workspace-level calls, used before a project is known.
#[allow(async_fn_in_trait)]
pub trait WorkspaceApi {
    /// Slug of the workspace, used in diagnostics.
    fn workspace_slug(&self) -> &str;

    /// List every project in the workspace.
    async fn list_projects(&self) -> Result<Vec<Project>, CoreError>;
}

/// Calls scoped to a single target project.
#[allow(async_fn_in_trait)]
pub trait ProjectApi {
    /// Full listing of labels or states (all pages).
    async fn list_entities(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntity>, CoreError>;

    /// Create one label or state.
    async fn create_entity(
        &self,
        kind: ReferenceKind,
        draft: &EntityDraft,
    ) -> Result<ReferenceEntity, CoreError>;

    /// Create one issue.
    async fn create_issue(&self, payload: &IssuePayload) -> Result<CreatedIssue, CoreError>;
}
