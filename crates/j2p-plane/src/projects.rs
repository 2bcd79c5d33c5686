//! Workspace project listing.

use j2p_core::entities::Project;

use crate::PlaneClient;
use crate::error::PlaneError;

#[derive(serde::Deserialize)]
struct ProjectDto {
    id: Option<String>,
    project_id: Option<String>,
    identifier: Option<String>,
    name: Option<String>,
    slug: Option<String>,
}

impl From<ProjectDto> for Project {
    fn from(dto: ProjectDto) -> Self {
        Self {
            id: dto.id.or(dto.project_id),
            identifier: dto.identifier.unwrap_or_default(),
            name: dto.name.unwrap_or_default(),
            slug: dto.slug.unwrap_or_default(),
        }
    }
}

impl PlaneClient {
    /// List every project in the workspace.
    ///
    /// # Errors
    ///
    /// Returns [`PlaneError`] if the HTTP request fails, Plane returns a
    /// non-success status, or the response is not the expected JSON.
    pub async fn fetch_projects(&self) -> Result<Vec<Project>, PlaneError> {
        let url = self.workspace_url("projects/");
        let projects: Vec<ProjectDto> = self.get_all(&url).await?;
        Ok(projects.into_iter().map(Project::from).collect())
    }
}
