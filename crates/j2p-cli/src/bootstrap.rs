use anyhow::Context;
use j2p_config::J2pConfig;

use crate::cli::GlobalFlags;

/// Load `.env` from the working directory, then the layered configuration.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<J2pConfig> {
    let config = J2pConfig::load_with_dotenv(flags.config.as_deref())
        .context("failed to load jira2plane configuration")?;

    tracing::debug!(
        base_url = %config.plane.base_url,
        workspace = %config.plane.workspace_slug,
        configured = config.plane.is_configured(),
        "configuration loaded"
    );
    Ok(config)
}
