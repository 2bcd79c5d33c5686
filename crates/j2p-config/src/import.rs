//! Import run settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_delimiter() -> String {
    String::from(",")
}

fn default_label_separator() -> String {
    String::from(";")
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImportConfig {
    /// CSV field delimiter. Must be a single byte.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Separator between labels inside one cell. Commas always split too.
    #[serde(default = "default_label_separator")]
    pub label_separator: String,

    /// Seconds to sleep after each created issue.
    #[serde(default)]
    pub rate_limit_secs: f64,

    /// Create labels that do not exist in the project.
    #[serde(default = "default_true")]
    pub create_labels: bool,

    /// Create workflow states that do not exist in the project.
    #[serde(default = "default_true")]
    pub create_states: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            label_separator: default_label_separator(),
            rate_limit_secs: 0.0,
            create_labels: true,
            create_states: true,
        }
    }
}

impl ImportConfig {
    /// The delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        match self.delimiter.as_bytes() {
            [byte] => Ok(*byte),
            _ => Err(ConfigError::InvalidValue {
                field: "import.delimiter".to_string(),
                reason: format!("expected a single byte, got {:?}", self.delimiter),
            }),
        }
    }

    /// Pause between issue creations, `None` when pacing is off.
    pub fn pace(&self) -> Result<Option<Duration>, ConfigError> {
        if !self.rate_limit_secs.is_finite() || self.rate_limit_secs < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "import.rate_limit_secs".to_string(),
                reason: format!("expected a non-negative number, got {}", self.rate_limit_secs),
            });
        }
        if self.rate_limit_secs == 0.0 {
            return Ok(None);
        }
        Duration::try_from_secs_f64(self.rate_limit_secs)
            .map(Some)
            .map_err(|error| ConfigError::InvalidValue {
                field: "import.rate_limit_secs".to_string(),
                reason: format!("{} seconds is out of range: {error}", self.rate_limit_secs),
            })
    }
}
