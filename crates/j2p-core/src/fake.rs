//! In-memory Plane used by unit tests.

use std::cell::{Cell, RefCell};

use crate::api::{ProjectApi, WorkspaceApi};
use crate::entities::{CreatedIssue, EntityDraft, Project, ReferenceEntity, ReferenceKind};
use crate::errors::CoreError;
use crate::payload::IssuePayload;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListProjects,
    ListEntities(ReferenceKind),
    CreateEntity(ReferenceKind, EntityDraft),
    CreateIssue(IssuePayload),
}

#[derive(Debug, Default)]
pub struct FakePlane {
    pub projects: Vec<Project>,
    pub labels: RefCell<Vec<ReferenceEntity>>,
    pub states: RefCell<Vec<ReferenceEntity>>,
    /// Reject state drafts that carry no group.
    pub require_state_group: bool,
    /// Reject any entity draft with this name.
    pub reject_entity: Option<String>,
    /// Reject issues with this name.
    pub reject_issue: Option<String>,
    pub calls: RefCell<Vec<Call>>,
    pub next_id: Cell<u32>,
}

impl FakePlane {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn creations(&self, kind: ReferenceKind) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, Call::CreateEntity(k, _) if *k == kind))
            .count()
    }

    pub fn issues(&self) -> Vec<IssuePayload> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::CreateIssue(payload) => Some(payload.clone()),
                _ => None,
            })
            .collect()
    }

    fn store(&self, kind: ReferenceKind) -> &RefCell<Vec<ReferenceEntity>> {
        match kind {
            ReferenceKind::Label => &self.labels,
            ReferenceKind::State => &self.states,
        }
    }

    fn next_id(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

impl WorkspaceApi for FakePlane {
    fn workspace_slug(&self) -> &str {
        "acme"
    }

    async fn list_projects(&self) -> Result<Vec<Project>, CoreError> {
        self.calls.borrow_mut().push(Call::ListProjects);
        Ok(self.projects.clone())
    }
}

impl ProjectApi for FakePlane {
    async fn list_entities(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntity>, CoreError> {
        self.calls.borrow_mut().push(Call::ListEntities(kind));
        Ok(self.store(kind).borrow().clone())
    }

    async fn create_entity(
        &self,
        kind: ReferenceKind,
        draft: &EntityDraft,
    ) -> Result<ReferenceEntity, CoreError> {
        self.calls
            .borrow_mut()
            .push(Call::CreateEntity(kind, draft.clone()));

        if self.reject_entity.as_deref() == Some(draft.name.as_str()) {
            return Err(anyhow::anyhow!("POST {kind}s/ -> 400 cannot create '{}'", draft.name).into());
        }
        if kind == ReferenceKind::State && self.require_state_group && draft.group.is_none() {
            return Err(anyhow::anyhow!("POST states/ -> 400 group is required").into());
        }

        let entity = ReferenceEntity {
            name: draft.name.clone(),
            id: Some(format!("{kind}-{}", self.next_id())),
            group: draft.group,
        };
        self.store(kind).borrow_mut().push(entity.clone());
        Ok(entity)
    }

    async fn create_issue(&self, payload: &IssuePayload) -> Result<CreatedIssue, CoreError> {
        self.calls
            .borrow_mut()
            .push(Call::CreateIssue(payload.clone()));

        if self.reject_issue.as_deref() == Some(payload.name.as_str()) {
            return Err(anyhow::anyhow!("POST issues/ -> 500 upstream error").into());
        }

        let seq = self.next_id();
        Ok(CreatedIssue {
            id: Some(format!("issue-{seq}")),
            sequence_id: Some(u64::from(seq)),
        })
    }
}
