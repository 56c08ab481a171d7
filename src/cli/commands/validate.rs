//! `validate` command
//!
//! Loads each plan file through the regular loader and reports the outcome.

use serde_json::json;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::{ConfigLoader, LoadWarning};
use crate::error::{ConfigError, PhaseTrackError, Severity, ValidationIssue};

/// Outcome of validating one file.
struct FileOutcome {
    path: String,
    errors: Vec<String>,
    warnings: Vec<String>,
}

/// Validate plan files.
///
/// Every file is checked even after a failure; the first failure is
/// returned once all files have been reported.
///
/// # Errors
///
/// Returns the first failure in argument order: an I/O error for a
/// missing file, or a configuration error (including warnings under
/// `--strict`).
pub fn run(args: &ValidateArgs) -> Result<(), PhaseTrackError> {
    let loader = ConfigLoader::with_defaults();
    let mut outcomes = Vec::with_capacity(args.files.len());
    let mut first_failure: Option<PhaseTrackError> = None;

    for path in &args.files {
        let display = path.display().to_string();
        if !path.exists() {
            let message = format!("file not found: {display}");
            first_failure.get_or_insert_with(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, message.clone()).into()
            });
            outcomes.push(FileOutcome {
                path: display,
                errors: vec![message],
                warnings: Vec::new(),
            });
            continue;
        }
        tracing::info!(file = %path.display(), "validating plan");

        let outcome = match loader.load(path) {
            Ok(result) if args.strict && !result.warnings.is_empty() => {
                let outcome = FileOutcome {
                    path: display.clone(),
                    errors: result.warnings.iter().map(ToString::to_string).collect(),
                    warnings: Vec::new(),
                };
                first_failure.get_or_insert_with(|| {
                    ConfigError::ValidationError {
                        path: display,
                        errors: strict_issues(&result.warnings),
                    }
                    .into()
                });
                outcome
            }
            Ok(result) => FileOutcome {
                path: display,
                errors: Vec::new(),
                warnings: result.warnings.iter().map(ToString::to_string).collect(),
            },
            Err(err) => {
                let errors = match &err {
                    ConfigError::ValidationError { errors, .. } => {
                        errors.iter().map(ToString::to_string).collect()
                    }
                    other => vec![other.to_string()],
                };
                first_failure.get_or_insert(err.into());
                FileOutcome {
                    path: display,
                    errors,
                    warnings: Vec::new(),
                }
            }
        };
        outcomes.push(outcome);
    }

    match args.format {
        OutputFormat::Human => print_human(&outcomes),
        OutputFormat::Json => print_json(&outcomes)?,
    }

    first_failure.map_or(Ok(()), Err)
}

fn strict_issues(warnings: &[LoadWarning]) -> Vec<ValidationIssue> {
    warnings
        .iter()
        .map(|w| ValidationIssue {
            path: w.location.clone().unwrap_or_default(),
            message: w.message.clone(),
            severity: Severity::Error,
        })
        .collect()
}

fn print_human(outcomes: &[FileOutcome]) {
    for outcome in outcomes {
        if outcome.errors.is_empty() {
            println!("{}: valid", outcome.path);
        } else {
            println!("{}: invalid", outcome.path);
        }
        for error in &outcome.errors {
            println!("  {error}");
        }
        for warning in &outcome.warnings {
            println!("  warning: {warning}");
        }
    }
}

fn print_json(outcomes: &[FileOutcome]) -> Result<(), PhaseTrackError> {
    let valid = outcomes.iter().filter(|o| o.errors.is_empty()).count();
    let files: Vec<_> = outcomes
        .iter()
        .map(|o| {
            json!({
                "path": o.path,
                "valid": o.errors.is_empty(),
                "errors": o.errors,
                "warnings": o.warnings,
            })
        })
        .collect();

    let output = json!({
        "files": files,
        "summary": {
            "valid": valid,
            "invalid": outcomes.len() - valid,
        },
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
