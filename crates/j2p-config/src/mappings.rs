//! Priority and status mapping tables.
//!
//! Tables given in TOML are merged key by key over the built-in defaults, so
//! a config only needs to list the labels it adds or changes.

use std::collections::BTreeMap;

use j2p_core::mapping::{
    DEFAULT_PRIORITY_MAP, DEFAULT_STATUS_MAP, FieldMappings, MappingTable, default_entries,
};
use serde::{Deserialize, Serialize};

const fn default_case_sensitive() -> bool {
    true
}

fn default_priority() -> BTreeMap<String, String> {
    default_entries(DEFAULT_PRIORITY_MAP)
}

fn default_status() -> BTreeMap<String, String> {
    default_entries(DEFAULT_STATUS_MAP)
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MappingConfig {
    /// Match source labels exactly (after trimming) rather than ignoring case.
    #[serde(default = "default_case_sensitive")]
    pub case_sensitive: bool,

    /// Jira priority → Plane priority.
    #[serde(default = "default_priority")]
    pub priority: BTreeMap<String, String>,

    /// Jira status → Plane state name.
    #[serde(default = "default_status")]
    pub status: BTreeMap<String, String>,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            case_sensitive: default_case_sensitive(),
            priority: default_priority(),
            status: default_status(),
        }
    }
}

impl MappingConfig {
    /// Build the lookup tables used by the importer.
    pub fn to_field_mappings(&self) -> FieldMappings {
        FieldMappings::new(
            MappingTable::new(self.priority.clone(), self.case_sensitive),
            MappingTable::new(self.status.clone(), self.case_sensitive),
        )
    }
}
