//! Plane connection settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default per-request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaneConfig {
    /// Instance URL, e.g. `https://plane.example.com` or `https://api.plane.so`.
    #[serde(default)]
    pub base_url: String,

    /// Workspace slug as it appears in Plane URLs.
    #[serde(default)]
    pub workspace_slug: String,

    /// Target project: id, identifier, slug or display name.
    #[serde(default)]
    pub project_id: String,

    /// Personal API token, sent as `x-api-key`.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            workspace_slug: String::new(),
            project_id: String::new(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl PlaneConfig {
    /// Check if every field needed to import into a project is set.
    pub fn is_configured(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Environment variable names of the required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = self.missing_connection_fields();
        if self.project_id.trim().is_empty() {
            missing.push("PLANE_PROJECT_ID");
        }
        missing
    }

    /// Fail unless [`is_configured`](Self::is_configured).
    pub fn require(&self) -> Result<(), ConfigError> {
        Self::check(self.missing_fields())
    }

    /// Fail unless the workspace can be reached (project not needed).
    pub fn require_connection(&self) -> Result<(), ConfigError> {
        Self::check(self.missing_connection_fields())
    }

    fn missing_connection_fields(&self) -> Vec<&'static str> {
        [
            ("PLANE_BASE_URL", &self.base_url),
            ("PLANE_WORKSPACE_SLUG", &self.workspace_slug),
            ("PLANE_API_KEY", &self.api_key),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    fn check(missing: Vec<&'static str>) -> Result<(), ConfigError> {
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::NotConfigured {
                section: "plane".to_string(),
                missing: missing.into_iter().map(str::to_string).collect(),
            })
        }
    }

    /// Base URL without surrounding whitespace or trailing slashes.
    pub fn api_root(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unconfigured() {
        let config = PlaneConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.missing_fields().len(), 4);
    }

    #[test]
    fn require_names_missing_env_vars() {
        let config = PlaneConfig {
            base_url: "https://plane.example.com".to_string(),
            workspace_slug: "acme".to_string(),
            ..PlaneConfig::default()
        };
        let err = config.require().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("PLANE_PROJECT_ID"));
        assert!(msg.contains("PLANE_API_KEY"));
        assert!(!msg.contains("PLANE_BASE_URL"));
    }

    #[test]
    fn connection_does_not_need_project() {
        let config = PlaneConfig {
            base_url: "https://plane.example.com".to_string(),
            workspace_slug: "acme".to_string(),
            api_key: "key".to_string(),
            ..PlaneConfig::default()
        };
        assert!(config.require_connection().is_ok());
        assert!(config.require().is_err());
    }

    #[test]
    fn api_root_strips_trailing_slash() {
        let config = PlaneConfig {
            base_url: " https://plane.example.com// ".to_string(),
            ..PlaneConfig::default()
        };
        assert_eq!(config.api_root(), "https://plane.example.com");
    }
}
