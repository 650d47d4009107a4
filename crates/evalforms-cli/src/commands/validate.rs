//! `evalforms validate`: run the submission rules over draft files offline.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use evalforms_adapters::{DraftLoader, LoadedDraft};
use evalforms_core::domain::{FormTemplate, FormTemplateValidator};

use crate::{
    cli::{GlobalArgs, ValidateArgs},
    error::{CliError, CliResult, IntoCli as _},
    output::OutputManager,
};

/// Outcome for one draft file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DraftReport {
    path: PathBuf,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<FormTemplate>,
}

impl DraftReport {
    fn check(loaded: LoadedDraft, update: bool) -> Self {
        let draft = match loaded.draft {
            Ok(draft) => draft,
            Err(e) => {
                return Self {
                    path: loaded.path,
                    valid: false,
                    code: None,
                    message: Some(e.to_string()),
                    payload: None,
                };
            }
        };

        let result = if update {
            FormTemplateValidator::validate_for_update(&draft)
        } else {
            FormTemplateValidator::validate_for_create(&draft)
        };

        match result {
            Ok(payload) => Self {
                path: loaded.path,
                valid: true,
                code: None,
                message: None,
                payload: Some(payload),
            },
            Err(e) => Self {
                path: loaded.path,
                valid: false,
                code: Some(e.code()),
                message: Some(e.to_string()),
                payload: None,
            },
        }
    }
}

#[instrument(skip_all, fields(paths = args.paths.len(), update = args.update))]
pub fn execute(args: ValidateArgs, _global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let reports = collect(&args.paths, args.update)?;
    let total = reports.len();
    let failed = reports.iter().filter(|r| !r.valid).count();
    info!(total, failed, "Validation finished");

    if output.is_json() {
        output
            .json(&reports)
            .with_cli_context(|| "Failed to write report")?;
    } else {
        if total == 0 {
            output.warning("No .json or .toml drafts found")?;
        }
        for report in &reports {
            print_report(report, args.emit, &output)?;
        }
        if total > 1 && failed == 0 {
            output.success(&format!("All {total} drafts are valid"))?;
        }
    }

    if failed > 0 {
        return Err(CliError::ValidationFailed { failed, total });
    }
    Ok(())
}

fn collect(paths: &[PathBuf], update: bool) -> CliResult<Vec<DraftReport>> {
    let mut reports = Vec::new();
    for path in paths {
        let loaded = DraftLoader::new(path).load_all()?;
        debug!(path = %path.display(), drafts = loaded.len(), "Drafts loaded");
        reports.extend(loaded.into_iter().map(|l| DraftReport::check(l, update)));
    }
    Ok(reports)
}

fn print_report(report: &DraftReport, emit: bool, output: &OutputManager) -> CliResult<()> {
    let path = display(&report.path);
    if report.valid {
        output.success(&path)?;
        if let Some(payload) = report.payload.as_ref().filter(|_| emit) {
            output
                .json(payload)
                .with_cli_context(|| "Failed to write payload")?;
        }
    } else {
        let reason = report.message.as_deref().unwrap_or("invalid");
        let line = match report.code {
            Some(code) => format!("{path}: {reason} [{code}]"),
            None => format!("{path}: {reason}"),
        };
        output.error(&line)?;
    }
    Ok(())
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const VALID: &str = r#"{
        "formName": "Suturing",
        "score": "SCORE",
        "fieldTemplates": [{ "name": "Knot tying", "type": "scale" }]
    }"#;

    const NO_SCORE: &str = r#"{
        "formName": "Suturing",
        "fieldTemplates": [{ "name": "Knot tying", "type": "text" }]
    }"#;

    #[test]
    fn reports_code_for_rejected_draft() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.json"), VALID).unwrap();
        fs::write(temp.path().join("b.json"), NO_SCORE).unwrap();

        let reports = collect(&[temp.path().to_path_buf()], false).unwrap();
        assert_eq!(reports.len(), 2);
        assert!(reports[0].valid);
        assert_eq!(reports[0].payload.as_ref().unwrap().form_name(), "Suturing");
        assert!(!reports[1].valid);
        assert_eq!(reports[1].code, Some("MISSING_SCORE"));
    }

    #[test]
    fn unparsable_draft_is_a_failure_without_code() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("broken.json"), "{ not json").unwrap();

        let reports = collect(&[temp.path().to_path_buf()], false).unwrap();
        assert!(!reports[0].valid);
        assert_eq!(reports[0].code, None);
        assert!(reports[0].message.as_deref().unwrap().contains("broken.json"));
    }

    #[test]
    fn missing_path_aborts() {
        let err = collect(&[PathBuf::from("/no/such/drafts")], false).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn report_json_shape() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.json");
        fs::write(&path, NO_SCORE).unwrap();

        let reports = collect(&[path], false).unwrap();
        let value = serde_json::to_value(&reports).unwrap();
        assert_eq!(value[0]["valid"], false);
        assert_eq!(value[0]["code"], "MISSING_SCORE");
        assert!(value[0].get("payload").is_none());
    }
}
