//! Input rows keyed by CSV column name.
//!
//! Rows are stored exactly as read. Trimming and case folding happen at the
//! point of use.

use crate::errors::CoreError;

/// Column holding the issue title. Required in the header.
pub const SUMMARY: &str = "Summary";
pub const DESCRIPTION: &[&str] = &["Description"];
pub const LABELS: &[&str] = &["Labels", "labels"];
pub const STATUS: &[&str] = &["Status", "status"];
pub const PRIORITY: &[&str] = &["Priority", "priority"];

/// Check that every column the import depends on is present in `headers`.
///
/// # Errors
///
/// Returns [`CoreError::MissingColumn`] naming the first absent column.
pub fn check_required_columns(headers: &[String]) -> Result<(), CoreError> {
    if headers.iter().any(|header| header == SUMMARY) {
        Ok(())
    } else {
        Err(CoreError::MissingColumn {
            column: SUMMARY.to_string(),
            present: headers.to_vec(),
        })
    }
}

/// One data row. Repeated column names (Jira emits one `Labels` column per
/// label) are kept as separate cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputRow {
    cells: Vec<(String, String)>,
}

impl InputRow {
    #[must_use]
    pub const fn new(cells: Vec<(String, String)>) -> Self {
        Self { cells }
    }

    /// Build a row from `(column, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of the first cell named `column`, as stored.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// First non-empty value across the candidate column names, in order.
    #[must_use]
    pub fn first_of(&self, columns: &[&str]) -> Option<&str> {
        columns.iter().find_map(|column| {
            self.cells
                .iter()
                .filter(|(name, _)| name == column)
                .map(|(_, value)| value.as_str())
                .find(|value| !value.is_empty())
        })
    }

    /// Trimmed issue title, or `None` when blank or absent.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.get(SUMMARY)
            .map(str::trim)
            .filter(|summary| !summary.is_empty())
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.first_of(DESCRIPTION)
            .filter(|description| !description.trim().is_empty())
    }

    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.first_of(STATUS)
    }

    #[must_use]
    pub fn priority(&self) -> Option<&str> {
        self.first_of(PRIORITY)
    }

    /// All non-empty label cells joined with `separator`.
    #[must_use]
    pub fn labels(&self, separator: &str) -> Option<String> {
        let cells: Vec<&str> = self
            .cells
            .iter()
            .filter(|(name, value)| LABELS.contains(&name.as_str()) && !value.is_empty())
            .map(|(_, value)| value.as_str())
            .collect();
        if cells.is_empty() {
            None
        } else {
            let joiner = if separator.is_empty() { "," } else { separator };
            Some(cells.join(joiner))
        }
    }
}
