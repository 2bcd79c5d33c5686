use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Import a Jira CSV export into the configured Plane project.
    Import(ImportArgs),
    /// List the projects of the configured workspace.
    Projects,
}

#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// Path to the Jira CSV export.
    #[arg(long)]
    pub csv: PathBuf,

    /// CSV delimiter [config: import.delimiter, default ,]
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Label separator inside CSV cells [config: import.label_separator, default ;]
    #[arg(long)]
    pub label_sep: Option<String>,

    /// Look things up in Plane but create nothing; print what would happen.
    #[arg(long)]
    pub dry_run: bool,

    /// Do not contact Plane at all (implies dry run, no label/state lookups).
    #[arg(long)]
    pub offline: bool,

    /// Do not create missing labels.
    #[arg(long)]
    pub no_create_labels: bool,

    /// Do not create missing workflow states.
    #[arg(long)]
    pub no_create_states: bool,

    /// Seconds to sleep after each created issue (e.g. 0.5).
    #[arg(long)]
    pub rate_limit: Option<f64>,

    /// Target project (id, identifier, slug or name) [env: PLANE_PROJECT_ID]
    #[arg(long)]
    pub project: Option<String>,
}
