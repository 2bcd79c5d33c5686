//! CSV row source for `j2p import`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use j2p_core::row::{InputRow, check_required_columns};

const BOM: char = '\u{feff}';

/// Header-checked CSV reader that yields numbered [`InputRow`]s.
pub struct CsvSource<R> {
    reader: csv::Reader<R>,
    headers: Vec<String>,
}

impl CsvSource<File> {
    /// Open `path` and validate its header row.
    pub fn open(path: &Path, delimiter: u8) -> anyhow::Result<Self> {
        let file =
            File::open(path).with_context(|| format!("failed to open CSV {}", path.display()))?;
        Self::from_reader(file, delimiter)
            .with_context(|| format!("failed to read CSV header of {}", path.display()))
    }
}

impl<R: Read> CsvSource<R> {
    pub fn from_reader(input: R, delimiter: u8) -> anyhow::Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(input);

        let mut headers = reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        if let Some(first) = headers.first_mut() {
            if let Some(stripped) = first.strip_prefix(BOM) {
                *first = stripped.to_string();
            }
        }

        check_required_columns(&headers)?;
        Ok(Self { reader, headers })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows numbered from 1. Missing trailing cells are simply absent.
    pub fn rows(&mut self) -> impl Iterator<Item = (usize, Result<InputRow, csv::Error>)> + '_ {
        let headers = &self.headers;
        self.reader.records().enumerate().map(move |(index, record)| {
            let row = record.map(|record| {
                InputRow::new(
                    headers
                        .iter()
                        .cloned()
                        .zip(record.iter().map(str::to_string))
                        .collect(),
                )
            });
            (index + 1, row)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use j2p_core::CoreError;
    use pretty_assertions::assert_eq;

    use super::*;

    fn collect(source: &mut CsvSource<&[u8]>) -> Vec<(usize, InputRow)> {
        source
            .rows()
            .map(|(n, row)| (n, row.expect("row should parse")))
            .collect()
    }

    #[test]
    fn rows_are_numbered_from_one() {
        let data = b"Summary,Status\nFix login,Done\nAdd SSO,To Do\n";
        let mut source = CsvSource::from_reader(&data[..], b',').expect("header ok");

        let rows = collect(&mut source);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, 1);
        assert_eq!(rows[0].1.summary(), Some("Fix login"));
        assert_eq!(rows[1].0, 2);
        assert_eq!(rows[1].1.status(), Some("To Do"));
    }

    #[test]
    fn bom_is_stripped_from_first_header() {
        let data = "\u{feff}Summary,Priority\nFix login,High\n";
        let mut source = CsvSource::from_reader(data.as_bytes(), b',').expect("header ok");

        assert_eq!(source.headers()[0], "Summary");
        let rows = collect(&mut source);
        assert_eq!(rows[0].1.priority(), Some("High"));
    }

    #[test]
    fn missing_summary_column_is_rejected_before_rows() {
        let data = b"Title,Status\nFix login,Done\n";
        let Err(error) = CsvSource::from_reader(&data[..], b',') else {
            panic!("expected missing column error");
        };

        let core = error.downcast_ref::<CoreError>().expect("core error");
        assert!(core.is_fatal_config());
        assert!(error.to_string().contains("Summary"));
    }

    #[test]
    fn ragged_rows_leave_trailing_cells_absent() {
        let data = b"Summary,Status,Labels\nFix login\n";
        let mut source = CsvSource::from_reader(&data[..], b',').expect("header ok");

        let rows = collect(&mut source);
        assert_eq!(rows[0].1.summary(), Some("Fix login"));
        assert_eq!(rows[0].1.status(), None);
        assert_eq!(rows[0].1.labels(";"), None);
    }

    #[test]
    fn semicolon_delimiter_and_repeated_label_columns() {
        let data = b"Summary;Labels;Labels\nFix login;auth;urgent\n";
        let mut source = CsvSource::from_reader(&data[..], b';').expect("header ok");

        let rows = collect(&mut source);
        assert_eq!(rows[0].1.labels(";").as_deref(), Some("auth;urgent"));
    }

    #[test]
    fn open_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "Summary,Description").expect("write");
        writeln!(file, "\"Quoted, title\",\"multi").expect("write");
        writeln!(file, "line\"").expect("write");

        let mut source = CsvSource::open(file.path(), b',').expect("open");
        let rows = source
            .rows()
            .map(|(_, row)| row.expect("row"))
            .collect::<Vec<_>>();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].summary(), Some("Quoted, title"));
        assert_eq!(rows[0].description(), Some("multi\nline"));
    }

    #[test]
    fn open_missing_file_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.csv");
        assert!(CsvSource::open(&missing, b',').is_err());
    }
}
