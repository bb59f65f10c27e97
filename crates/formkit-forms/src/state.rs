//! Form state and its reducer.
//!
//! [`FormState`] holds the three pieces of mutable form state: current
//! values, current error messages and the result text. It never mutates in
//! place; [`FormState::reduce`] returns the next state for a [`FormAction`],
//! which keeps the per-field state machine testable without any rendering.
//!
//! ```text
//! Clean   --edit-->                      Clean   (error cleared)
//! Clean   --submit, required & empty-->  Invalid
//! Invalid --edit-->                      Clean
//! any     --submit, all valid-->         unchanged errors, result text set
//! ```

use std::collections::HashMap;

use thiserror::Error;

use crate::schema::Schema;

/// The message recorded for a required field that is empty at submit time.
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// The labels the result template reads, in template order.
///
/// These are fixed regardless of the schema in use.
pub const RESULT_TEMPLATE_LABELS: [&str; 3] = ["Name", "Age", "Country"];

/// A validation failure for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// A required field had an empty value at submit time.
    #[error("This field is required")]
    RequiredFieldMissing,
}

/// A state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// The user edited a field.
    FieldChanged {
        /// Label of the edited field.
        label: String,
        /// The field's new value.
        value: String,
    },
    /// The user submitted the form.
    SubmitAttempted,
}

impl FormAction {
    /// Shorthand for [`FormAction::FieldChanged`].
    pub fn field_changed(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::FieldChanged {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Per-form values, errors and result text.
///
/// An empty error string and a missing error entry both mean "no error".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: HashMap<String, String>,
    errors: HashMap<String, String>,
    result_text: String,
}

impl FormState {
    /// Every schema label mapped to an empty value and an empty error.
    pub fn initial(schema: &Schema) -> Self {
        let values: HashMap<String, String> = schema
            .fields()
            .iter()
            .map(|f| (f.label.clone(), String::new()))
            .collect();
        let errors = values.clone();
        Self {
            values,
            errors,
            result_text: String::new(),
        }
    }

    /// Returns the state that follows `action`.
    #[must_use]
    pub fn reduce(&self, schema: &Schema, action: FormAction) -> Self {
        let mut next = self.clone();
        match action {
            FormAction::FieldChanged { label, value } => {
                next.errors.insert(label.clone(), String::new());
                next.values.insert(label, value);
            }
            FormAction::SubmitAttempted => {
                let errors = validate(schema, &self.values);
                if errors.is_empty() {
                    next.result_text = format_result(&self.values);
                } else {
                    next.errors = errors
                        .into_iter()
                        .map(|(label, err)| (label, err.to_string()))
                        .collect();
                }
            }
        }
        next
    }

    /// All current values, keyed by label.
    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    /// All current error messages, keyed by label.
    pub fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    /// The result text, empty until a successful submission.
    pub fn result_text(&self) -> &str {
        &self.result_text
    }

    /// The current value of `label`, or `""`.
    pub fn value(&self, label: &str) -> &str {
        self.values.get(label).map_or("", String::as_str)
    }

    /// The current error of `label`, or `""`.
    pub fn error(&self, label: &str) -> &str {
        self.errors.get(label).map_or("", String::as_str)
    }

    /// Returns `true` if any field currently displays an error.
    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|e| !e.is_empty())
    }
}

/// Checks every required field for an empty value.
///
/// A label without an entry in `values` counts as empty. Only the
/// required-field rule exists; input patterns are not enforced here.
pub fn validate(schema: &Schema, values: &HashMap<String, String>) -> HashMap<String, FieldError> {
    schema
        .fields()
        .iter()
        .filter(|f| f.required && values.get(&f.label).map_or(true, String::is_empty))
        .map(|f| (f.label.clone(), FieldError::RequiredFieldMissing))
        .collect()
}

/// Formats `"{Name} is {Age} years old from {Country}"` from `values`.
///
/// A missing label contributes an empty string.
pub fn format_result(values: &HashMap<String, String>) -> String {
    let [name, age, country] =
        RESULT_TEMPLATE_LABELS.map(|label| values.get(label).map_or("", String::as_str));
    format!("{name} is {age} years old from {country}")
}
