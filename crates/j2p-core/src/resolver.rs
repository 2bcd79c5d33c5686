//! Ensure-or-create resolution for labels and workflow states.
//!
//! The cache of known entities is an explicit value: it is loaded once per
//! kind, passed into [`ensure`] by reference, and replaced by the caller with
//! the freshly listed cache returned after any creation.
//!
//! ```text
//! cached?      ── yes ──> Cached
//!   │ no
//! Disabled     ──────────> NotCreated (placeholder, no id)
//! Simulate     ──────────> Simulated  (placeholder, no id)
//! Live         ── create ──> Created ── relist ──> refreshed cache
//!                  │ state create failed
//!                  └─ retry once with inferred group ──> Created | error
//! ```

use std::collections::HashMap;

use crate::api::ProjectApi;
use crate::entities::{EntityDraft, ReferenceEntity, ReferenceKind, StateGroup};
use crate::errors::CoreError;
use crate::normalize::normalize_name;

/// Neutral grey given to states created by the importer.
pub const DEFAULT_STATE_COLOR: &str = "#9ca3af";

// ---------------------------------------------------------------------------
// CreationMode
// ---------------------------------------------------------------------------

/// What to do when a referenced entity does not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationMode {
    /// Create it on the server.
    Live,
    /// Report the creation that would happen; change nothing.
    Simulate,
    /// Leave it out of the issue.
    Disabled,
}

impl CreationMode {
    /// Derive the mode from CLI-style switches. Disabling wins over simulating.
    #[must_use]
    pub const fn from_flags(create: bool, simulate: bool) -> Self {
        if !create {
            Self::Disabled
        } else if simulate {
            Self::Simulate
        } else {
            Self::Live
        }
    }
}

// ---------------------------------------------------------------------------
// ReferenceCache
// ---------------------------------------------------------------------------

/// Known entities of one kind, keyed by normalized name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceCache {
    kind: ReferenceKind,
    entries: HashMap<String, ReferenceEntity>,
}

impl ReferenceCache {
    #[must_use]
    pub fn empty(kind: ReferenceKind) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
        }
    }

    /// Build a cache from a listing. When two entities normalize to the same
    /// key the later one wins.
    pub fn from_entities(
        kind: ReferenceKind,
        entities: impl IntoIterator<Item = ReferenceEntity>,
    ) -> Self {
        let entries = entities
            .into_iter()
            .map(|entity| (normalize_name(&entity.name), entity))
            .collect();
        Self { kind, entries }
    }

    /// List `kind` from the server and build a fresh cache.
    ///
    /// # Errors
    ///
    /// Propagates the listing failure.
    pub async fn load<A: ProjectApi>(api: &A, kind: ReferenceKind) -> Result<Self, CoreError> {
        let entities = api.list_entities(kind).await?;
        let cache = Self::from_entities(kind, entities);
        if cache.is_empty() {
            tracing::debug!(%kind, "project has none yet");
        } else {
            tracing::debug!(%kind, count = cache.len(), "loaded reference cache");
        }
        Ok(cache)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ReferenceEntity> {
        self.entries.get(&normalize_name(name))
    }

    #[must_use]
    pub const fn kind(&self) -> ReferenceKind {
        self.kind
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// How [`ensure`] produced its entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Cached,
    Created,
    Simulated,
    NotCreated,
}

/// Result of [`ensure`].
#[derive(Debug, Clone)]
pub struct Ensured {
    pub entity: ReferenceEntity,
    pub resolution: Resolution,
    /// Cache rebuilt after a creation; replaces the caller's cache.
    pub refreshed: Option<ReferenceCache>,
}

impl Ensured {
    /// Swap in the refreshed cache (if any) and hand back the entity.
    pub fn apply(self, cache: &mut ReferenceCache) -> ReferenceEntity {
        if let Some(refreshed) = self.refreshed {
            *cache = refreshed;
        }
        self.entity
    }
}

/// Outcome of a single creation attempt.
#[derive(Debug)]
pub enum CreateAttempt {
    Created(ReferenceEntity),
    /// Failed, but a richer payload may still succeed.
    Retryable(CoreError),
    Fatal(CoreError),
}

/// Return the entity called `name`, creating it according to `mode`.
///
/// # Errors
///
/// In [`CreationMode::Live`], returns the creation error (after the single
/// state retry) or the error of the relisting that follows a creation.
pub async fn ensure<A: ProjectApi>(
    api: &A,
    cache: &ReferenceCache,
    name: &str,
    mode: CreationMode,
) -> Result<Ensured, CoreError> {
    if let Some(entity) = cache.get(name) {
        return Ok(Ensured {
            entity: entity.clone(),
            resolution: Resolution::Cached,
            refreshed: None,
        });
    }

    let kind = cache.kind();
    match mode {
        CreationMode::Disabled => Ok(Ensured {
            entity: ReferenceEntity::placeholder(name),
            resolution: Resolution::NotCreated,
            refreshed: None,
        }),
        CreationMode::Simulate => {
            tracing::info!(%kind, name, "would create");
            Ok(Ensured {
                entity: ReferenceEntity::placeholder(name),
                resolution: Resolution::Simulated,
                refreshed: None,
            })
        }
        CreationMode::Live => {
            let created = create_with_fallback(api, kind, name).await?;
            tracing::debug!(%kind, name, id = ?created.id, "created");

            let refreshed = ReferenceCache::load(api, kind).await?;
            let entity = refreshed.get(name).cloned().unwrap_or(created);
            Ok(Ensured {
                entity,
                resolution: Resolution::Created,
                refreshed: Some(refreshed),
            })
        }
    }
}

/// Create `name`, retrying a failed state creation once with an inferred group.
async fn create_with_fallback<A: ProjectApi>(
    api: &A,
    kind: ReferenceKind,
    name: &str,
) -> Result<ReferenceEntity, CoreError> {
    let mut draft = initial_draft(kind, name);

    match attempt(api, kind, &draft).await {
        CreateAttempt::Created(entity) => Ok(entity),
        CreateAttempt::Fatal(error) => Err(error),
        CreateAttempt::Retryable(error) => {
            let group = infer_state_group(name);
            tracing::debug!(%kind, name, %group, %error, "retrying creation with inferred group");
            draft.group = Some(group);
            match attempt(api, kind, &draft).await {
                CreateAttempt::Created(entity) => Ok(entity),
                CreateAttempt::Retryable(error) | CreateAttempt::Fatal(error) => Err(error),
            }
        }
    }
}

async fn attempt<A: ProjectApi>(api: &A, kind: ReferenceKind, draft: &EntityDraft) -> CreateAttempt {
    match api.create_entity(kind, draft).await {
        Ok(entity) => CreateAttempt::Created(entity),
        Err(error) if kind == ReferenceKind::State && draft.group.is_none() => {
            CreateAttempt::Retryable(error)
        }
        Err(error) => CreateAttempt::Fatal(error),
    }
}

fn initial_draft(kind: ReferenceKind, name: &str) -> EntityDraft {
    EntityDraft {
        name: name.to_string(),
        color: match kind {
            ReferenceKind::State => Some(DEFAULT_STATE_COLOR.to_string()),
            ReferenceKind::Label => None,
        },
        group: None,
    }
}

/// Guess the group of a workflow state from its name. Unknown names fall
/// back to [`StateGroup::Backlog`].
#[must_use]
pub fn infer_state_group(state_name: &str) -> StateGroup {
    match normalize_name(state_name).as_str() {
        "backlog" | "to do" | "todo" | "unstarted" | "selected for development" => {
            StateGroup::Backlog
        }
        "in progress" | "started" | "in review" | "doing" => StateGroup::Started,
        "done" | "completed" | "closed" | "resolved" => StateGroup::Completed,
        "cancelled" | "canceled" | "wontfix" | "won't fix" => StateGroup::Cancelled,
        _ => StateGroup::Backlog,
    }
}
