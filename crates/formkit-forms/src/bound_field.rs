//! Bound fields: a descriptor paired with its current value and error.
//!
//! A [`BoundField`] is created during rendering for each descriptor in the
//! schema. It owns copies of everything needed to emit one form row: the
//! label, the control, the pass-through attributes, the value and the error.

use std::collections::BTreeMap;

use formkit_core::utils::text::{escape_html, id_fragment};

use crate::schema::{AttrValue, FieldDescriptor};
use crate::widgets::{self, Control};

/// A form field bound to its current value and error.
pub struct BoundField {
    /// The field's label, also used as the HTML `name`.
    pub label: String,
    /// The current value.
    pub value: String,
    /// The current error message; empty means no error.
    pub error: String,
    /// Pass-through attributes from the descriptor.
    pub attrs: BTreeMap<String, AttrValue>,
    /// The control used for rendering.
    pub control: Box<dyn Control>,
}

impl BoundField {
    /// Creates a new `BoundField` from a descriptor and current state.
    pub fn new(field: &FieldDescriptor, value: &str, error: &str) -> Self {
        Self {
            label: field.label.clone(),
            value: value.to_string(),
            error: error.to_string(),
            attrs: field.attrs.clone(),
            control: widgets::create_control(field),
        }
    }

    /// Returns the auto-generated HTML `id` for this field.
    pub fn auto_id(&self) -> String {
        format!("id_{}", id_fragment(&self.label))
    }

    /// The `id` the control is rendered with: a pass-through `id` if the
    /// descriptor has one, otherwise [`auto_id`](Self::auto_id).
    pub fn html_id(&self) -> String {
        match self.attrs.get("id") {
            Some(AttrValue::String(id)) => id.clone(),
            Some(AttrValue::Number(n)) => n.to_string(),
            _ => self.auto_id(),
        }
    }

    /// Renders the control HTML for this bound field.
    pub fn render(&self) -> String {
        let mut attrs = self.attrs.clone();
        attrs
            .entry("id".to_string())
            .or_insert_with(|| AttrValue::String(self.auto_id()));
        self.control.render(&self.label, &self.value, &attrs)
    }

    /// Renders a `<label>` element for this field.
    pub fn label_tag(&self) -> String {
        let label_id = self.control.id_for_label(&self.html_id());
        format!(
            r#"<label for="{}">{}</label>"#,
            escape_html(&label_id),
            escape_html(&self.label)
        )
    }

    /// Returns `true` if this field currently displays an error.
    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// Renders the error line, or an empty string when there is no error.
    pub fn error_html(&self) -> String {
        if self.error.is_empty() {
            return String::new();
        }
        format!(r#"<div class="error-message">{}</div>"#, escape_html(&self.error))
    }

    /// Renders the complete row: label, control, and the error line directly
    /// beneath the control.
    pub fn render_row(&self) -> String {
        format!(
            r#"<div class="field">{}{}{}</div>"#,
            self.label_tag(),
            self.render(),
            self.error_html()
        )
    }
}
