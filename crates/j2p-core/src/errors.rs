//! Error types for the import core.
//!
//! HTTP-level failures are produced by `j2p-plane` and carried here as
//! [`CoreError::Api`] so the resolver and importer never depend on reqwest.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The CSV header lacks a column the import cannot run without.
    #[error("CSV missing required column: {column}. Present: {present:?}")]
    MissingColumn {
        column: String,
        present: Vec<String>,
    },

    /// Input could not be used as given (bad delimiter, unreadable row).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The project reference matched nothing in the workspace listing.
    #[error("Could not resolve project '{want}' in workspace '{workspace}'")]
    ProjectNotFound { want: String, workspace: String },

    /// Listing or creation call failed (transport, status, or body shape).
    #[error(transparent)]
    Api(#[from] anyhow::Error),
}

impl CoreError {
    /// Whether the error must abort the run before any row is processed.
    #[must_use]
    pub const fn is_fatal_config(&self) -> bool {
        matches!(self, Self::MissingColumn { .. } | Self::InvalidInput(_))
    }
}
