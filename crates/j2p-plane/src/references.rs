//! Labels and workflow states of a project.

use j2p_core::entities::{EntityDraft, ReferenceEntity, ReferenceKind, StateGroup};

use crate::ProjectClient;
use crate::error::PlaneError;
use crate::http::{check_response, read_json};

/// Label or state as returned by Plane. Only the fields the importer needs.
#[derive(serde::Deserialize)]
struct EntityDto {
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    group: Option<String>,
}

impl From<EntityDto> for ReferenceEntity {
    fn from(dto: EntityDto) -> Self {
        Self {
            name: dto.name.unwrap_or_default(),
            id: dto.id,
            group: dto.group.as_deref().and_then(StateGroup::parse),
        }
    }
}

const fn collection(kind: ReferenceKind) -> &'static str {
    match kind {
        ReferenceKind::Label => "labels/",
        ReferenceKind::State => "states/",
    }
}

impl ProjectClient {
    /// List all labels or states of the project.
    ///
    /// # Errors
    ///
    /// Returns [`PlaneError`] on transport failure, non-success status, or a
    /// body that is not the expected JSON.
    pub async fn fetch_entities(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntity>, PlaneError> {
        let url = self.project_url(collection(kind));
        let entities: Vec<EntityDto> = self.client.get_all(&url).await?;
        Ok(entities.into_iter().map(ReferenceEntity::from).collect())
    }

    /// Create a label or state.
    ///
    /// # Errors
    ///
    /// Returns [`PlaneError`] on transport failure, non-success status, or a
    /// body that is not the expected JSON.
    pub async fn post_entity(
        &self,
        kind: ReferenceKind,
        draft: &EntityDraft,
    ) -> Result<ReferenceEntity, PlaneError> {
        let url = self.project_url(collection(kind));
        tracing::debug!(%url, %kind, name = %draft.name, "POST");
        let resp = check_response(self.client.http.post(&url).json(draft).send().await?, "POST").await?;
        let created: EntityDto = read_json(resp, "POST").await?;
        Ok(created.into())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const STATES: &str = r##"[
        {"id": "st-1", "name": "Backlog", "color": "#60646C", "group": "backlog"},
        {"id": "st-2", "name": "Todo", "color": "#60646C", "group": "unstarted"},
        {"id": "st-3", "name": "In Progress", "group": "started", "default": false},
        {"id": "st-4", "name": null, "group": "completed"}
    ]"##;

    #[test]
    fn maps_state_dtos_leniently() {
        let dtos: Vec<EntityDto> = serde_json::from_str(STATES).unwrap();
        let states: Vec<ReferenceEntity> = dtos.into_iter().map(ReferenceEntity::from).collect();

        assert_eq!(states[0].group, Some(StateGroup::Backlog));
        assert_eq!(states[1].group, None);
        assert_eq!(states[2].name, "In Progress");
        assert_eq!(states[3].name, "");
        assert_eq!(states[3].id.as_deref(), Some("st-4"));
    }

    #[test]
    fn maps_label_dto() {
        let dto: EntityDto =
            serde_json::from_str(r##"{"id": "lb-1", "name": "auth", "color": "#ff0000", "parent": null}"##)
                .unwrap();
        assert_eq!(ReferenceEntity::from(dto), ReferenceEntity::new("auth", "lb-1"));
    }

    #[test]
    fn collections_per_kind() {
        assert_eq!(collection(ReferenceKind::Label), "labels/");
        assert_eq!(collection(ReferenceKind::State), "states/");
    }
}
