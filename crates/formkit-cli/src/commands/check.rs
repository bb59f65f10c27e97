//! The `check` management command.
//!
//! Runs schema checks to identify problems that the renderer tolerates but
//! that make a form misbehave: colliding labels, choices nobody can pick,
//! and labels the result text depends on.

use async_trait::async_trait;
use formkit_core::{FormkitError, Settings};
use formkit_forms::state::RESULT_TEMPLATE_LABELS;
use formkit_forms::{FieldKind, Schema};

use crate::command::ManagementCommand;
use crate::commands::{emit, resolve_schema, schema_arg};

/// Runs schema checks.
pub struct CheckCommand;

/// The result of a single schema check.
#[derive(Debug, Clone)]
pub struct CheckMessage {
    /// The severity level of this check result.
    pub level: CheckLevel,
    /// A human-readable description of the issue.
    pub msg: String,
    /// An optional hint for how to resolve the issue.
    pub hint: Option<String>,
    /// A unique identifier for this check (e.g. "schema.E001").
    pub id: String,
}

/// Severity levels for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckLevel {
    /// Informational message.
    Info,
    /// A warning that may indicate a problem.
    Warning,
    /// An error that must be resolved.
    Error,
}

impl std::fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Runs all checks against the given schema.
pub fn run_checks(schema: &Schema) -> Vec<CheckMessage> {
    let mut messages = Vec::new();

    if schema.is_empty() {
        messages.push(CheckMessage {
            level: CheckLevel::Warning,
            msg: "Schema has no fields".to_string(),
            hint: None,
            id: "schema.W003".to_string(),
        });
    }

    for label in schema.duplicate_labels() {
        messages.push(CheckMessage {
            level: CheckLevel::Error,
            msg: format!("Label '{label}' is used by more than one field"),
            hint: Some("Fields with the same label share one value and one error".to_string()),
            id: "schema.E001".to_string(),
        });
    }

    for field in schema {
        match field.kind {
            FieldKind::Select if field.options.is_empty() => {
                let hint = field
                    .required
                    .then(|| "A required select without options can never be submitted".to_string());
                messages.push(CheckMessage {
                    level: CheckLevel::Warning,
                    msg: format!("Select field '{}' has no options", field.label),
                    hint,
                    id: "schema.W001".to_string(),
                });
            }
            FieldKind::Text | FieldKind::Numeric if !field.options.is_empty() => {
                messages.push(CheckMessage {
                    level: CheckLevel::Info,
                    msg: format!(
                        "Options on {} field '{}' are ignored",
                        field.kind, field.label
                    ),
                    hint: None,
                    id: "schema.I001".to_string(),
                });
            }
            _ => {}
        }
    }

    let missing = schema.missing_labels(&RESULT_TEMPLATE_LABELS);
    if !missing.is_empty() {
        messages.push(CheckMessage {
            level: CheckLevel::Warning,
            msg: format!(
                "Result text reads {} but the schema has no such field(s)",
                missing.join(", ")
            ),
            hint: Some(format!(
                "The result text is always built from {}",
                RESULT_TEMPLATE_LABELS.join(", ")
            )),
            id: "schema.W002".to_string(),
        });
    }

    messages
}

#[async_trait]
impl ManagementCommand for CheckCommand {
    fn name(&self) -> &'static str {
        "check"
    }

    fn help(&self) -> &'static str {
        "Run schema checks"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(schema_arg())
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), FormkitError> {
        let schema = resolve_schema(matches, settings)?;
        let messages = run_checks(&schema);

        if messages.is_empty() {
            tracing::info!("Schema check identified no issues");
            return Ok(());
        }

        let errors = messages.iter().filter(|m| m.level >= CheckLevel::Error).count();
        let warnings = messages.iter().filter(|m| m.level == CheckLevel::Warning).count();

        for msg in &messages {
            let hint_text = msg
                .hint
                .as_ref()
                .map_or(String::new(), |h| format!("\n\tHINT: {h}"));
            emit(&format!("{} ({}): {}{}", msg.level, msg.id, msg.msg, hint_text))?;
        }

        tracing::info!(
            "Schema check identified {} issue(s) ({} error(s), {} warning(s))",
            messages.len(),
            errors,
            warnings
        );

        if errors > 0 {
            return Err(FormkitError::SchemaError(format!(
                "Schema check found {errors} error(s)"
            )));
        }

        Ok(())
    }
}
