//! # j2p-config
//!
//! Layered configuration loading for jira2plane using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`J2P_*` prefix, `__` as separator)
//! 2. Plane connection variables (`PLANE_BASE_URL`, `PLANE_WORKSPACE_SLUG`,
//!    `PLANE_PROJECT_ID`, `PLANE_API_KEY`, `PLANE_TIMEOUT_SECS`)
//! 3. An explicit config file (`--config <path>`)
//! 4. Project-level `.jira2plane/config.toml`
//! 5. User-level `~/.config/jira2plane/config.toml`
//! 6. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `J2P_IMPORT__RATE_LIMIT_SECS` -> `import.rate_limit_secs`,
//! `J2P_MAPPINGS__CASE_SENSITIVE` -> `mappings.case_sensitive`, etc.
//! `PLANE_API_KEY` maps to `plane.api_key`.
//!
//! # Usage
//!
//! ```no_run
//! use j2p_config::J2pConfig;
//!
//! let config = J2pConfig::load_with_dotenv(None).expect("config");
//! if config.plane.is_configured() {
//!     println!("Plane: {}", config.plane.api_root());
//! }
//! ```

mod error;
mod import;
mod mappings;
mod plane;

pub use error::ConfigError;
pub use import::ImportConfig;
pub use mappings::MappingConfig;
pub use plane::PlaneConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Keys read from the unprefixed `PLANE_*` variables.
const PLANE_ENV_KEYS: &[&str] = &[
    "base_url",
    "workspace_slug",
    "project_id",
    "api_key",
    "timeout_secs",
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct J2pConfig {
    #[serde(default)]
    pub plane: PlaneConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub mappings: MappingConfig,
}

impl J2pConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`load_with_dotenv`](Self::load_with_dotenv)
    /// if you need `.env` file loading.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(explicit).extract().map_err(ConfigError::from)
    }

    /// Load `.env` from the current directory, then [`load`](Self::load).
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(explicit)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".jira2plane/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit --config file
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Plane's conventional variables
        figment = figment.merge(
            Env::prefixed("PLANE_")
                .only(PLANE_ENV_KEYS)
                .map(|key| format!("plane.{}", key.as_str()).into()),
        );

        // Layer 5: Prefixed variables (highest priority)
        figment.merge(Env::prefixed("J2P_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("jira2plane").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = J2pConfig::default();
        assert!(!config.plane.is_configured());
        assert!(config.import.create_labels);
        assert!(config.mappings.case_sensitive);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: J2pConfig = J2pConfig::figment(None).extract()?;
            assert!(!config.plane.is_configured());
            assert_eq!(config.plane.timeout_secs, 30);
            assert_eq!(config.import.label_separator, ";");
            assert_eq!(config.mappings.status.len(), 6);
            Ok(())
        });
    }
}
