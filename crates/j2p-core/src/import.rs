//! Sequential row importer.
//!
//! Each row is processed to completion (reference resolution, payload
//! assembly, issue creation) before the next one starts. Row-level failures
//! are recorded and never abort the run.

use std::time::Duration;

use serde::Serialize;

use crate::api::ProjectApi;
use crate::entities::{CreatedIssue, ReferenceEntity, ReferenceKind};
use crate::errors::CoreError;
use crate::mapping::FieldMappings;
use crate::normalize::split_tags;
use crate::payload::{IssuePayload, build_payload};
use crate::resolver::{CreationMode, ReferenceCache, Resolution, ensure};
use crate::row::InputRow;

/// Per-run switches.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Separator between tags inside the labels cell (comma always splits too).
    pub label_separator: String,
    pub labels: CreationMode,
    pub states: CreationMode,
    /// Build payloads without submitting issues.
    pub simulate: bool,
    /// Pause after every live issue creation.
    pub pace: Option<Duration>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            label_separator: ";".to_string(),
            labels: CreationMode::Live,
            states: CreationMode::Live,
            simulate: false,
            pace: None,
        }
    }
}

/// A creation that simulate mode skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedCreation {
    pub kind: ReferenceKind,
    pub name: String,
}

/// What happened to one row. Rows are numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Skipped {
        row: usize,
    },
    Created {
        row: usize,
        issue: CreatedIssue,
    },
    Simulated {
        row: usize,
        payload: IssuePayload,
        planned: Vec<PlannedCreation>,
    },
    Failed {
        row: usize,
        error: String,
    },
}

/// Counters for the current run. Only ever incremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub created: u32,
    pub skipped: u32,
    pub failed: u32,
}

impl RunSummary {
    pub const fn record(&mut self, outcome: &RowOutcome) {
        match outcome {
            RowOutcome::Skipped { .. } => self.skipped += 1,
            RowOutcome::Created { .. } | RowOutcome::Simulated { .. } => self.created += 1,
            RowOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// A failed row, kept for the final report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    pub row: usize,
    pub error: String,
}

/// End-of-run report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub summary: RunSummary,
    pub failures: Vec<RowFailure>,
}

/// Drives rows through resolution and issue creation against one project.
pub struct Importer<'a, A> {
    api: &'a A,
    mappings: &'a FieldMappings,
    options: ImportOptions,
    labels: ReferenceCache,
    states: ReferenceCache,
    report: ImportReport,
}

impl<'a, A: ProjectApi> Importer<'a, A> {
    #[must_use]
    pub const fn new(
        api: &'a A,
        mappings: &'a FieldMappings,
        options: ImportOptions,
        labels: ReferenceCache,
        states: ReferenceCache,
    ) -> Self {
        Self {
            api,
            mappings,
            options,
            labels,
            states,
            report: ImportReport {
                summary: RunSummary {
                    created: 0,
                    skipped: 0,
                    failed: 0,
                },
                failures: Vec::new(),
            },
        }
    }

    /// Load both reference caches from the server, then build the importer.
    ///
    /// # Errors
    ///
    /// Propagates a failed label or state listing.
    pub async fn connect(
        api: &'a A,
        mappings: &'a FieldMappings,
        options: ImportOptions,
    ) -> Result<Self, CoreError> {
        let labels = ReferenceCache::load(api, ReferenceKind::Label).await?;
        let states = ReferenceCache::load(api, ReferenceKind::State).await?;
        Ok(Self::new(api, mappings, options, labels, states))
    }

    /// Process one row and record its outcome.
    pub async fn process_row(&mut self, row_number: usize, row: &InputRow) -> RowOutcome {
        let outcome = match self.try_row(row_number, row).await {
            Ok(outcome) => outcome,
            Err(error) => RowOutcome::Failed {
                row: row_number,
                error: error.to_string(),
            },
        };

        self.record(&outcome);
        outcome
    }

    /// Count a row that could not be read from the source as failed.
    pub fn record_failure(&mut self, row_number: usize, error: impl Into<String>) -> RowOutcome {
        let outcome = RowOutcome::Failed {
            row: row_number,
            error: error.into(),
        };
        self.record(&outcome);
        outcome
    }

    #[must_use]
    pub const fn summary(&self) -> RunSummary {
        self.report.summary
    }

    #[must_use]
    pub fn finish(self) -> ImportReport {
        self.report
    }

    fn record(&mut self, outcome: &RowOutcome) {
        self.report.summary.record(outcome);
        if let RowOutcome::Failed { row, error } = outcome {
            self.report.failures.push(RowFailure {
                row: *row,
                error: error.clone(),
            });
        }
    }

    async fn try_row(&mut self, row_number: usize, row: &InputRow) -> Result<RowOutcome, CoreError> {
        if row.summary().is_none() {
            return Ok(RowOutcome::Skipped { row: row_number });
        }

        let mappings = self.mappings;
        let mut planned = Vec::new();

        let state = match mappings.status.lookup(row.status()) {
            Some(target) => Some(self.resolve(ReferenceKind::State, target, &mut planned).await?),
            None => None,
        };

        let separator = self.options.label_separator.clone();
        let mut labels = Vec::new();
        for tag in split_tags(row.labels(&separator).as_deref(), &separator) {
            labels.push(self.resolve(ReferenceKind::Label, &tag, &mut planned).await?);
        }

        let Some(payload) = build_payload(row, mappings, state.as_ref(), &labels) else {
            return Ok(RowOutcome::Skipped { row: row_number });
        };

        if self.options.simulate {
            return Ok(RowOutcome::Simulated {
                row: row_number,
                payload,
                planned,
            });
        }

        let issue = self.api.create_issue(&payload).await?;
        if let Some(pace) = self.options.pace {
            tokio::time::sleep(pace).await;
        }
        Ok(RowOutcome::Created {
            row: row_number,
            issue,
        })
    }

    async fn resolve(
        &mut self,
        kind: ReferenceKind,
        name: &str,
        planned: &mut Vec<PlannedCreation>,
    ) -> Result<ReferenceEntity, CoreError> {
        let (cache, mode) = match kind {
            ReferenceKind::Label => (&mut self.labels, self.options.labels),
            ReferenceKind::State => (&mut self.states, self.options.states),
        };

        let ensured = ensure(self.api, cache, name, mode).await?;
        if ensured.resolution == Resolution::Simulated {
            planned.push(PlannedCreation {
                kind,
                name: name.to_string(),
            });
        }
        Ok(ensured.apply(cache))
    }
}
