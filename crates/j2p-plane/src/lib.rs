//! # j2p-plane
//!
//! Plane REST API (v1) client for jira2plane.
//!
//! [`PlaneClient`] covers workspace-level calls (project listing) and hands
//! out a [`ProjectClient`] for calls scoped to the import target (labels,
//! states, issues). Both implement the `j2p-core` collaborator traits so the
//! importer never sees HTTP.
//!
//! Every call is a single request/response pair with a fixed timeout; list
//! calls follow Plane's cursor pagination.

mod error;
mod http;
mod issues;
mod listing;
mod projects;
mod references;

pub use error::PlaneError;

use std::time::Duration;

use j2p_core::CoreError;
use j2p_core::api::{ProjectApi, WorkspaceApi};
use j2p_core::entities::{CreatedIssue, EntityDraft, Project, ReferenceEntity, ReferenceKind};
use j2p_core::payload::IssuePayload;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client bound to one Plane workspace.
#[derive(Debug, Clone)]
pub struct PlaneClient {
    http: reqwest::Client,
    api_root: String,
    workspace_slug: String,
}

impl PlaneClient {
    /// Create a client for `workspace_slug` on the instance at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PlaneError::InvalidApiKey`] if the key cannot be sent as a
    /// header, or [`PlaneError::Http`] if the underlying client fails to build.
    pub fn new(
        base_url: &str,
        workspace_slug: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, PlaneError> {
        let mut key = HeaderValue::from_str(api_key.trim()).map_err(|_| PlaneError::InvalidApiKey)?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(concat!("jira2plane/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            api_root: base_url.trim().trim_end_matches('/').to_string(),
            workspace_slug: workspace_slug.trim().to_string(),
        })
    }

    /// Scope the client to one project.
    #[must_use]
    pub fn project(&self, project_id: &str) -> ProjectClient {
        ProjectClient {
            client: self.clone(),
            project_id: project_id.trim().to_string(),
        }
    }

    fn workspace_url(&self, path: &str) -> String {
        format!(
            "{}/api/v1/workspaces/{}/{path}",
            self.api_root,
            urlencoding::encode(&self.workspace_slug)
        )
    }
}

/// Client for calls under `/projects/{project_id}/`.
#[derive(Debug, Clone)]
pub struct ProjectClient {
    client: PlaneClient,
    project_id: String,
}

impl ProjectClient {
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    fn project_url(&self, path: &str) -> String {
        self.client.workspace_url(&format!(
            "projects/{}/{path}",
            urlencoding::encode(&self.project_id)
        ))
    }
}

// ── Collaborator traits ────────────────────────────────────────────

impl WorkspaceApi for PlaneClient {
    fn workspace_slug(&self) -> &str {
        &self.workspace_slug
    }

    async fn list_projects(&self) -> Result<Vec<Project>, CoreError> {
        Ok(self.fetch_projects().await?)
    }
}

impl ProjectApi for ProjectClient {
    async fn list_entities(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntity>, CoreError> {
        Ok(self.fetch_entities(kind).await?)
    }

    async fn create_entity(
        &self,
        kind: ReferenceKind,
        draft: &EntityDraft,
    ) -> Result<ReferenceEntity, CoreError> {
        Ok(self.post_entity(kind, draft).await?)
    }

    async fn create_issue(&self, payload: &IssuePayload) -> Result<CreatedIssue, CoreError> {
        Ok(self.post_issue(payload).await?)
    }
}
