//! The `submit` management command.
//!
//! Replays a sequence of field edits against a form, submits it once, and
//! prints the rendered form followed by the result text or the field errors.
//! `--json` prints the whole report as a JSON document instead.
//!
//! ```text
//! formkit submit --set Name=Ana --set Age=30 --set Country=UK
//! formkit submit --json --set Name=Ana
//! ```

use std::collections::BTreeMap;

use async_trait::async_trait;
use formkit_core::{FormkitError, Settings};
use formkit_forms::{FormRenderer, RenderOptions, Schema, SubmitEvent};
use serde::Serialize;

use crate::command::ManagementCommand;
use crate::commands::{emit, resolve_schema, schema_arg};

/// Fills in and submits a form from the command line.
pub struct SubmitCommand;

/// What a submission produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReport {
    /// The rendered form after submission.
    pub html: String,
    /// The result text (empty unless a submission succeeded).
    pub result_text: String,
    /// Non-empty field errors, ordered by label.
    pub errors: BTreeMap<String, String>,
}

impl SubmissionReport {
    /// Returns `true` if the submission was accepted.
    pub fn accepted(&self) -> bool {
        self.errors.is_empty()
    }

    /// The lines printed after the form: the result text on success,
    /// otherwise one `label: message` line per field error.
    pub fn summary_lines(&self) -> Vec<String> {
        if self.accepted() {
            return vec![self.result_text.clone()];
        }
        self.errors
            .iter()
            .map(|(label, msg)| format!("{label}: {msg}"))
            .collect()
    }
}

/// Splits a `LABEL=VALUE` assignment at the first `=`. The value may be empty.
pub fn parse_assignment(raw: &str) -> Result<(String, String), FormkitError> {
    raw.split_once('=')
        .map(|(label, value)| (label.to_string(), value.to_string()))
        .ok_or_else(|| {
            FormkitError::CommandError(format!("Expected LABEL=VALUE, got '{raw}'"))
        })
}

/// Applies each edit in order, submits once, and reports the outcome.
pub fn run_submission(
    schema: Schema,
    settings: &Settings,
    edits: &[(String, String)],
) -> SubmissionReport {
    let mut form = FormRenderer::with_options(schema, RenderOptions::from_settings(settings));
    for (label, value) in edits {
        form.handle_change(label, value.as_str());
    }
    form.handle_submit(&mut SubmitEvent::new());

    SubmissionReport {
        html: form.render(),
        result_text: form.result_text().to_string(),
        errors: form
            .errors()
            .iter()
            .filter(|(_, msg)| !msg.is_empty())
            .map(|(label, msg)| (label.clone(), msg.clone()))
            .collect(),
    }
}

#[async_trait]
impl ManagementCommand for SubmitCommand {
    fn name(&self) -> &'static str {
        "submit"
    }

    fn help(&self) -> &'static str {
        "Fill in the form with --set LABEL=VALUE edits and submit it"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(schema_arg())
            .arg(
                clap::Arg::new("set")
                    .long("set")
                    .value_name("LABEL=VALUE")
                    .action(clap::ArgAction::Append)
                    .help("Edit a field before submitting (repeatable, applied in order)"),
            )
            .arg(
                clap::Arg::new("json")
                    .long("json")
                    .action(clap::ArgAction::SetTrue)
                    .help("Print the report as JSON"),
            )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), FormkitError> {
        let schema = resolve_schema(matches, settings)?;
        let edits = matches
            .get_many::<String>("set")
            .into_iter()
            .flatten()
            .map(|raw| parse_assignment(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let report = run_submission(schema, settings, &edits);
        if report.accepted() {
            tracing::info!(result = %report.result_text, "form submitted");
        } else {
            tracing::info!(errors = report.errors.len(), "form has errors");
        }

        if matches.get_flag("json") {
            return emit(&serde_json::to_string_pretty(&report)?);
        }
        emit(&report.html)?;
        for line in report.summary_lines() {
            emit(&line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formkit_forms::{example_schema, REQUIRED_MESSAGE};

    fn edits(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(l, v)| ((*l).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("Name=Ana").unwrap(),
            ("Name".to_string(), "Ana".to_string())
        );
        assert_eq!(
            parse_assignment("Note=a=b").unwrap(),
            ("Note".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_assignment("Name=").unwrap(),
            ("Name".to_string(), String::new())
        );
        assert!(parse_assignment("Name").is_err());
    }

    #[test]
    fn test_run_submission_valid() {
        let report = run_submission(
            example_schema(),
            &Settings::default(),
            &edits(&[("Name", "Ana"), ("Age", "30"), ("Country", "UK")]),
        );
        assert_eq!(report.result_text, "Ana is 30 years old from UK");
        assert!(report.errors.is_empty());
        assert!(report.html.contains("Ana is 30 years old from UK"));
    }

    #[test]
    fn test_run_submission_missing_fields() {
        let report = run_submission(
            example_schema(),
            &Settings::default(),
            &edits(&[("Name", "Ana")]),
        );
        assert_eq!(report.result_text, "");
        assert_eq!(
            report.errors.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["Age", "Country"]
        );
        assert!(report.errors.values().all(|m| m == REQUIRED_MESSAGE));
    }

    #[test]
    fn test_edits_apply_in_order() {
        let report = run_submission(
            example_schema(),
            &Settings::default(),
            &edits(&[
                ("Name", "Ana"),
                ("Name", "Bo"),
                ("Age", "7"),
                ("Country", "Other"),
            ]),
        );
        assert_eq!(report.result_text, "Bo is 7 years old from Other");
    }

    #[test]
    fn test_summary_lines_print_result_text_on_success() {
        let report = run_submission(
            example_schema(),
            &Settings::default(),
            &edits(&[("Name", "Ana"), ("Age", "30"), ("Country", "UK")]),
        );
        assert!(report.accepted());
        assert_eq!(report.summary_lines(), vec!["Ana is 30 years old from UK"]);
    }

    #[test]
    fn test_summary_lines_list_errors_by_label() {
        let report = run_submission(example_schema(), &Settings::default(), &[]);
        assert!(!report.accepted());
        assert_eq!(
            report.summary_lines(),
            vec![
                format!("Age: {REQUIRED_MESSAGE}"),
                format!("Country: {REQUIRED_MESSAGE}"),
                format!("Name: {REQUIRED_MESSAGE}"),
            ]
        );
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = run_submission(
            example_schema(),
            &Settings::default(),
            &edits(&[("Name", "Ana"), ("Age", "30")]),
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["result_text"], "");
        assert_eq!(value["errors"]["Country"], REQUIRED_MESSAGE);
        assert!(value["html"].as_str().unwrap().starts_with("<form"));
    }
}
