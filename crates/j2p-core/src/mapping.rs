//! Priority and status mapping tables.
//!
//! Both tables translate Jira vocabulary into Plane vocabulary. Lookups trim
//! the source value; whether they also ignore case is a per-table setting.

use std::collections::BTreeMap;

/// Built-in Jira priority → Plane priority pairs.
pub const DEFAULT_PRIORITY_MAP: &[(&str, &str)] = &[
    ("Highest", "urgent"),
    ("High", "high"),
    ("Medium", "medium"),
    ("Low", "low"),
    ("Lowest", "low"),
];

/// Built-in Jira status → Plane state name pairs.
pub const DEFAULT_STATUS_MAP: &[(&str, &str)] = &[
    ("To Do", "Backlog"),
    ("Selected for Development", "Unstarted"),
    ("In Progress", "Started"),
    ("In Review", "Started"),
    ("Done", "Completed"),
    ("Closed", "Completed"),
];

/// Convert one of the default pair lists into an owned map.
#[must_use]
pub fn default_entries(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
        .collect()
}

/// A source label → target label lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    /// Keyed by trimmed source label (lower-cased when case-insensitive).
    entries: BTreeMap<String, String>,
    case_sensitive: bool,
}

impl MappingTable {
    #[must_use]
    pub fn new(entries: BTreeMap<String, String>, case_sensitive: bool) -> Self {
        let entries = entries
            .into_iter()
            .map(|(from, to)| (Self::key(&from, case_sensitive), to))
            .collect();
        Self {
            entries,
            case_sensitive,
        }
    }

    /// Look up a source label. Empty and unmapped labels yield `None`.
    #[must_use]
    pub fn lookup(&self, raw: Option<&str>) -> Option<&str> {
        let raw = raw?.trim();
        if raw.is_empty() {
            return None;
        }
        self.entries
            .get(&Self::key(raw, self.case_sensitive))
            .map(String::as_str)
    }

    #[must_use]
    pub const fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key(raw: &str, case_sensitive: bool) -> String {
        if case_sensitive {
            raw.trim().to_string()
        } else {
            raw.trim().to_lowercase()
        }
    }
}

/// The two tables a row is mapped through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMappings {
    pub priority: MappingTable,
    pub status: MappingTable,
}

impl FieldMappings {
    #[must_use]
    pub const fn new(priority: MappingTable, status: MappingTable) -> Self {
        Self { priority, status }
    }
}

impl Default for FieldMappings {
    fn default() -> Self {
        Self {
            priority: MappingTable::new(default_entries(DEFAULT_PRIORITY_MAP), true),
            status: MappingTable::new(default_entries(DEFAULT_STATUS_MAP), true),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Highest", Some("urgent"))]
    #[case("High", Some("high"))]
    #[case(" Medium ", Some("medium"))]
    #[case("Lowest", Some("low"))]
    #[case("high", None)]
    #[case("Blocker", None)]
    #[case("", None)]
    fn default_priority_lookup(#[case] raw: &str, #[case] expected: Option<&str>) {
        let mappings = FieldMappings::default();
        assert_eq!(mappings.priority.lookup(Some(raw)), expected);
    }

    #[rstest]
    #[case("To Do", Some("Backlog"))]
    #[case("Selected for Development", Some("Unstarted"))]
    #[case("In Progress", Some("Started"))]
    #[case("In Review", Some("Started"))]
    #[case("Closed", Some("Completed"))]
    #[case("Won't Do", None)]
    fn default_status_lookup(#[case] raw: &str, #[case] expected: Option<&str>) {
        let mappings = FieldMappings::default();
        assert_eq!(mappings.status.lookup(Some(raw)), expected);
    }

    #[test]
    fn absent_value_maps_to_none() {
        let mappings = FieldMappings::default();
        assert_eq!(mappings.priority.lookup(None), None);
    }

    #[test]
    fn case_insensitive_table_ignores_case() {
        let table = MappingTable::new(default_entries(DEFAULT_STATUS_MAP), false);
        assert!(!table.is_case_sensitive());
        assert_eq!(table.lookup(Some("in progress")), Some("Started"));
        assert_eq!(table.lookup(Some("DONE ")), Some("Completed"));
    }

    #[test]
    fn default_tables_have_all_entries() {
        let mappings = FieldMappings::default();
        assert_eq!(mappings.priority.len(), 5);
        assert_eq!(mappings.status.len(), 6);
        assert!(!mappings.status.is_empty());
    }
}
