//! The form renderer.
//!
//! [`FormRenderer`] consumes a [`Schema`], owns the [`FormState`] derived from
//! it, handles change and submit events, and renders the form as HTML.
//!
//! ```
//! use formkit_forms::renderer::{FormRenderer, SubmitEvent};
//! use formkit_forms::schema::example_schema;
//!
//! let mut form = FormRenderer::new(example_schema());
//! form.handle_change("Name", "Ana");
//! form.handle_change("Age", "30");
//! form.handle_change("Country", "UK");
//!
//! let mut event = SubmitEvent::new();
//! form.handle_submit(&mut event);
//! assert!(event.default_prevented());
//! assert_eq!(form.result_text(), "Ana is 30 years old from UK");
//! ```

use std::collections::HashMap;

use formkit_core::logging::form_span;
use formkit_core::utils::text::escape_html;
use formkit_core::Settings;
use once_cell::unsync::OnceCell;

use crate::bound_field::BoundField;
use crate::schema::Schema;
use crate::state::{validate, FormAction, FormState, RESULT_TEMPLATE_LABELS};

/// A submit event raised by the rendering surface.
///
/// The renderer always calls [`prevent_default`](Self::prevent_default)
/// before handling a submission, so the surface must not navigate away.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    /// Creates a fresh event whose default action has not been prevented.
    pub const fn new() -> Self {
        Self {
            default_prevented: false,
        }
    }

    /// Suppresses the surface's default submit navigation.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Returns `true` once the default action has been prevented.
    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Presentation options that do not affect form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// The `id` of the `<form>` element.
    pub form_id: String,
    /// Caption of the submit button.
    pub submit_label: String,
    /// The `<h1>` text used by [`FormRenderer::render_page`].
    pub heading: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl RenderOptions {
    /// Reads the presentation options from settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            form_id: settings.form_id.clone(),
            submit_label: settings.submit_label.clone(),
            heading: settings.page_heading.clone(),
        }
    }
}

/// Renders a schema as a form and tracks its state.
///
/// Rendered rows are memoized: they are rebuilt only after the values, the
/// errors or the schema change.
pub struct FormRenderer {
    schema: Schema,
    state: FormState,
    options: RenderOptions,
    rows: OnceCell<Vec<String>>,
    span: tracing::Span,
}

impl FormRenderer {
    /// Creates a renderer with default presentation options.
    pub fn new(schema: Schema) -> Self {
        Self::with_options(schema, RenderOptions::default())
    }

    /// Creates a renderer with the given presentation options.
    pub fn with_options(schema: Schema, options: RenderOptions) -> Self {
        let span = form_span(&options.form_id);
        let renderer = Self {
            state: FormState::initial(&schema),
            schema,
            options,
            rows: OnceCell::new(),
            span,
        };
        renderer.warn_about_schema();
        renderer
    }

    /// Replaces the schema.
    ///
    /// State is re-derived only when `schema` is a different schema
    /// reference; passing a clone of the current schema changes nothing.
    pub fn set_schema(&mut self, schema: Schema) {
        if self.schema.same_ref(&schema) {
            return;
        }
        let _enter = self.span.enter();
        tracing::debug!(fields = schema.len(), "schema replaced, resetting form state");
        self.state = FormState::initial(&schema);
        self.schema = schema;
        self.rows.take();
        self.warn_about_schema();
    }

    /// Handles an edit of the field labelled `label`.
    pub fn handle_change(&mut self, label: &str, value: impl Into<String>) {
        self.dispatch(FormAction::field_changed(label, value));
    }

    /// Handles a submission. The event's default action is prevented first.
    pub fn handle_submit(&mut self, event: &mut SubmitEvent) {
        event.prevent_default();
        self.dispatch(FormAction::SubmitAttempted);
    }

    /// Applies `action` to the form state.
    pub fn dispatch(&mut self, action: FormAction) {
        let _enter = self.span.enter();
        let submitted = matches!(action, FormAction::SubmitAttempted);
        match &action {
            FormAction::FieldChanged { label, value } => {
                tracing::debug!(label = %label, len = value.len(), "field changed");
            }
            FormAction::SubmitAttempted => tracing::debug!("submit attempted"),
        }

        let next = self.state.reduce(&self.schema, action);
        if next.values() != self.state.values() || next.errors() != self.state.errors() {
            self.rows.take();
        }

        if submitted {
            // Submission never touches values, so this matches what `reduce` saw.
            let missing = validate(&self.schema, next.values());
            if missing.is_empty() {
                tracing::debug!(result = next.result_text(), "submission accepted");
            } else {
                tracing::debug!(missing = missing.len(), "submission rejected");
            }
        }
        self.state = next;
    }

    /// The rendered rows, one per descriptor, in schema order.
    pub fn rendered_fields(&self) -> &[String] {
        self.rows.get_or_init(|| {
            self.bound_fields()
                .iter()
                .map(BoundField::render_row)
                .collect()
        })
    }

    /// Returns bound fields for the current state.
    pub fn bound_fields(&self) -> Vec<BoundField> {
        self.schema
            .fields()
            .iter()
            .map(|field| {
                BoundField::new(
                    field,
                    self.state.value(&field.label),
                    self.state.error(&field.label),
                )
            })
            .collect()
    }

    /// Renders the whole form followed by the result line.
    pub fn render(&self) -> String {
        let mut html = format!(r#"<form id="{}">"#, escape_html(&self.options.form_id));
        html.push('\n');
        for row in self.rendered_fields() {
            html.push_str(row);
            html.push('\n');
        }
        html.push_str(&format!(
            r#"<button type="submit">{}</button>"#,
            escape_html(&self.options.submit_label)
        ));
        html.push_str("\n</form>\n");
        html.push_str(&format!(
            r#"<p class="result">{}</p>"#,
            escape_html(self.state.result_text())
        ));
        html
    }

    /// Renders the form inside a page wrapper headed by
    /// [`RenderOptions::heading`].
    pub fn render_page(&self) -> String {
        format!(
            "<div>\n<h1>{}</h1>\n{}\n</div>",
            escape_html(&self.options.heading),
            self.render()
        )
    }

    /// The schema in use.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The current state.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// All current values, keyed by label.
    pub fn values(&self) -> &HashMap<String, String> {
        self.state.values()
    }

    /// All current error messages, keyed by label.
    pub fn errors(&self) -> &HashMap<String, String> {
        self.state.errors()
    }

    /// The result text, empty until a successful submission.
    pub fn result_text(&self) -> &str {
        self.state.result_text()
    }

    fn warn_about_schema(&self) {
        let _enter = self.span.enter();
        let duplicates = self.schema.duplicate_labels();
        if !duplicates.is_empty() {
            tracing::warn!(?duplicates, "duplicate labels share one value and error slot");
        }
        let missing = self.schema.missing_labels(&RESULT_TEMPLATE_LABELS);
        if !missing.is_empty() {
            tracing::warn!(
                ?missing,
                "schema lacks labels used by the result text; they will render empty"
            );
        }
    }
}
