use j2p_core::entities::Project;
use j2p_core::import::{ImportReport, RowOutcome, RunSummary};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a serializable response as pretty JSON.
pub fn render_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Print a serializable response as pretty JSON.
pub fn output_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = render_json(value)?;
    println!("{rendered}");
    Ok(())
}

/// Human line for one row outcome.
pub fn row_line(outcome: &RowOutcome) -> anyhow::Result<String> {
    Ok(match outcome {
        RowOutcome::Skipped { row } => format!("[SKIP] Row {row}: no Summary"),
        RowOutcome::Created { row, issue } => format!("[OK] Row {row}: created issue {issue}"),
        RowOutcome::Simulated {
            row,
            payload,
            planned,
        } => {
            let mut line = format!("[DRY] Row {row}: {}", serde_json::to_string(payload)?);
            for creation in planned {
                line.push_str(&format!("\n      would create {} '{}'", creation.kind, creation.name));
            }
            line
        }
        RowOutcome::Failed { row, error } => format!("[FAIL] Row {row}: {error}"),
    })
}

/// Print a row outcome. Failures go to stderr; quiet mode prints only failures.
pub fn print_row(outcome: &RowOutcome, quiet: bool) -> anyhow::Result<()> {
    let line = row_line(outcome)?;
    if matches!(outcome, RowOutcome::Failed { .. }) {
        eprintln!("{line}");
    } else if !quiet {
        println!("{line}");
    }
    Ok(())
}

pub fn summary_line(summary: &RunSummary) -> String {
    format!(
        "Done. Created: {}, Skipped: {}, Failures: {}",
        summary.created, summary.skipped, summary.failed
    )
}

/// Print the end-of-run report in the requested format.
pub fn print_report(report: &ImportReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{}", summary_line(&report.summary));
            Ok(())
        }
        OutputFormat::Json => output_json(report),
    }
}

pub fn project_line(project: &Project) -> String {
    format!(
        "{:<10} {:<30} {:<24} {}",
        project.identifier,
        project.name,
        project.slug,
        project.id.as_deref().unwrap_or("-")
    )
}

#[cfg(test)]
mod tests {
    use j2p_core::entities::{CreatedIssue, ReferenceKind};
    use j2p_core::import::{PlannedCreation, RowFailure};
    use j2p_core::payload::IssuePayload;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use super::*;

    #[test]
    fn summary_line_matches_expected_wording() {
        let summary = RunSummary {
            created: 3,
            skipped: 1,
            failed: 2,
        };
        assert_eq!(
            summary_line(&summary),
            "Done. Created: 3, Skipped: 1, Failures: 2"
        );
    }

    #[test]
    fn created_and_failed_lines() {
        let created = RowOutcome::Created {
            row: 4,
            issue: CreatedIssue {
                id: Some("abc".to_string()),
                sequence_id: Some(12),
            },
        };
        assert!(row_line(&created).expect("line").starts_with("[OK] Row 4: created issue "));

        let failed = RowOutcome::Failed {
            row: 5,
            error: "boom".to_string(),
        };
        assert_eq!(row_line(&failed).expect("line"), "[FAIL] Row 5: boom");
    }

    #[test]
    fn simulated_line_lists_planned_creations() {
        let outcome = RowOutcome::Simulated {
            row: 1,
            payload: IssuePayload {
                name: "Fix login".to_string(),
                description: None,
                priority: Some("high".to_string()),
                state_id: None,
                label_ids: Vec::new(),
            },
            planned: vec![PlannedCreation {
                kind: ReferenceKind::Label,
                name: "auth".to_string(),
            }],
        };

        let line = row_line(&outcome).expect("line");
        assert!(line.starts_with("[DRY] Row 1: {"));
        assert!(line.contains("\"priority\":\"high\""));
        assert!(line.contains("would create label 'auth'"));
    }

    #[test]
    fn json_report_shape() {
        let report = ImportReport {
            summary: RunSummary {
                created: 1,
                skipped: 0,
                failed: 1,
            },
            failures: vec![RowFailure {
                row: 2,
                error: "bad".to_string(),
            }],
        };

        let rendered = render_json(&report).expect("json");
        let value: Value = serde_json::from_str(&rendered).expect("valid json");
        assert_eq!(value["summary"]["created"], 1);
        assert_eq!(value["summary"]["failed"], 1);
        assert_eq!(value["failures"][0]["row"], 2);
        assert_eq!(value["failures"][0]["error"], "bad");
    }

    #[test]
    fn project_line_handles_missing_id() {
        let project = Project {
            id: None,
            identifier: "WEB".to_string(),
            name: "Website".to_string(),
            slug: "website".to_string(),
        };
        let line = project_line(&project);
        assert!(line.starts_with("WEB"));
        assert!(line.ends_with('-'));
    }
}
