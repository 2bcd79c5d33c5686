use std::time::Duration;

use j2p_config::J2pConfig;
use j2p_core::api::WorkspaceApi;
use j2p_plane::PlaneClient;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output;

/// Handle `j2p projects`.
pub async fn handle(config: &J2pConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let plane = &config.plane;
    plane.require_connection()?;

    let client = PlaneClient::new(
        plane.api_root(),
        &plane.workspace_slug,
        &plane.api_key,
        Duration::from_secs(plane.timeout_secs),
    )?;
    let projects = client.list_projects().await?;

    match flags.format {
        OutputFormat::Json => output::output_json(&projects),
        OutputFormat::Text => {
            if projects.is_empty() {
                println!("(no projects in workspace '{}')", client.workspace_slug());
            }
            for project in &projects {
                println!("{}", output::project_line(project));
            }
            Ok(())
        }
    }
}
