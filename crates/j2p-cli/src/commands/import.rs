use std::io::Read;
use std::time::Duration;

use j2p_config::{ImportConfig, J2pConfig};
use j2p_core::CoreError;
use j2p_core::api::ProjectApi;
use j2p_core::entities::{CreatedIssue, EntityDraft, ReferenceEntity, ReferenceKind};
use j2p_core::import::{ImportOptions, ImportReport, Importer};
use j2p_core::payload::IssuePayload;
use j2p_core::project::{ProjectResolution, resolve_project};
use j2p_core::resolver::CreationMode;
use j2p_plane::PlaneClient;

use crate::cli::{GlobalFlags, ImportArgs, OutputFormat};
use crate::output;
use crate::source::CsvSource;

/// Handle `j2p import`.
pub async fn handle(args: &ImportArgs, config: &J2pConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let settings = merge_settings(args, &config.import);
    let delimiter = settings.delimiter_byte()?;
    let options = build_options(args, &settings)?;
    let mappings = config.mappings.to_field_mappings();

    // Header problems must surface before anything touches the network.
    let mut source = CsvSource::open(&args.csv, delimiter)?;
    tracing::info!(csv = %args.csv.display(), columns = source.headers().len(), "CSV header accepted");

    let report = if args.offline {
        let importer = Importer::connect(&Offline, &mappings, options).await?;
        run_rows(importer, &mut source, flags).await?
    } else {
        let mut plane = config.plane.clone();
        if let Some(project) = &args.project {
            plane.project_id.clone_from(project);
        }
        plane.require()?;

        let client = PlaneClient::new(
            plane.api_root(),
            &plane.workspace_slug,
            &plane.api_key,
            Duration::from_secs(plane.timeout_secs),
        )?;

        let project_id = match resolve_project(&client, &plane.project_id).await {
            ProjectResolution::Resolved(id) => id,
            ProjectResolution::Fallback { raw, diagnostic } => {
                tracing::warn!(%diagnostic, project = %raw, "using project reference as given");
                raw
            }
        };
        let project = client.project(&project_id);
        tracing::info!(project = %project.project_id(), "importing into project");
        let importer = Importer::connect(&project, &mappings, options).await?;
        run_rows(importer, &mut source, flags).await?
    };

    output::print_report(&report, flags.format)
}

/// Layer command-line overrides over the configured import settings.
fn merge_settings(args: &ImportArgs, configured: &ImportConfig) -> ImportConfig {
    let mut settings = configured.clone();
    if let Some(delimiter) = &args.delimiter {
        settings.delimiter = match delimiter.as_str() {
            "\\t" | "tab" => "\t".to_string(),
            other => other.to_string(),
        };
    }
    if let Some(separator) = &args.label_sep {
        settings.label_separator.clone_from(separator);
    }
    if let Some(seconds) = args.rate_limit {
        settings.rate_limit_secs = seconds;
    }
    if args.no_create_labels {
        settings.create_labels = false;
    }
    if args.no_create_states {
        settings.create_states = false;
    }
    settings
}

fn build_options(args: &ImportArgs, settings: &ImportConfig) -> anyhow::Result<ImportOptions> {
    let simulate = args.dry_run || args.offline;
    Ok(ImportOptions {
        label_separator: settings.label_separator.clone(),
        labels: CreationMode::from_flags(settings.create_labels, simulate),
        states: CreationMode::from_flags(settings.create_states, simulate),
        simulate,
        pace: settings.pace()?,
    })
}

async fn run_rows<A: ProjectApi, R: Read>(
    mut importer: Importer<'_, A>,
    source: &mut CsvSource<R>,
    flags: &GlobalFlags,
) -> anyhow::Result<ImportReport> {
    let quiet = flags.quiet || flags.format == OutputFormat::Json;

    for (row_number, row) in source.rows() {
        let outcome = match row {
            Ok(row) => importer.process_row(row_number, &row).await,
            Err(error) => {
                importer.record_failure(row_number, format!("unreadable CSV record: {error}"))
            }
        };
        output::print_row(&outcome, quiet)?;
    }

    let report = importer.finish();
    tracing::info!(
        created = report.summary.created,
        skipped = report.summary.skipped,
        failed = report.summary.failed,
        "import finished"
    );
    Ok(report)
}

/// Stand-in for `--offline`: nothing listed, nothing creatable.
struct Offline;

impl ProjectApi for Offline {
    async fn list_entities(&self, _kind: ReferenceKind) -> Result<Vec<ReferenceEntity>, CoreError> {
        Ok(Vec::new())
    }

    async fn create_entity(
        &self,
        kind: ReferenceKind,
        draft: &EntityDraft,
    ) -> Result<ReferenceEntity, CoreError> {
        Err(CoreError::Api(anyhow::anyhow!(
            "offline: cannot create {kind} '{}'",
            draft.name
        )))
    }

    async fn create_issue(&self, payload: &IssuePayload) -> Result<CreatedIssue, CoreError> {
        Err(CoreError::Api(anyhow::anyhow!(
            "offline: cannot create issue '{}'",
            payload.name
        )))
    }
}
