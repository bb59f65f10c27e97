//! Controls for rendering HTML form elements.
//!
//! Each [`FieldKind`] maps to one control:
//!
//! | kind | control | pattern |
//! |---|---|---|
//! | `text` | `<input type="text">` | `[A-Za-z]+` |
//! | `number` | `<input type="text" inputmode="numeric">` | `[0-9]+` |
//! | `select` | `<select>` with one `<option>` per option | - |
//!
//! The patterns are native-control hints only; validation never checks them.

use std::collections::BTreeMap;
use std::fmt;

use formkit_core::utils::text::escape_html;

use crate::schema::{AttrValue, FieldDescriptor, FieldKind};

/// Input pattern for free-text fields.
pub const ALPHA_PATTERN: &str = "[A-Za-z]+";

/// Input pattern for numeric fields.
pub const DIGIT_PATTERN: &str = "[0-9]+";

/// Attributes a control always sets itself; pass-through values for these
/// are dropped.
const RESERVED_ATTRS: [&str; 3] = ["type", "name", "value"];

/// Enumerates the built-in control types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlType {
    /// `<input type="text">` with a letters pattern.
    TextInput,
    /// `<input type="text" inputmode="numeric">` with a digits pattern.
    NumericInput,
    /// `<select>`.
    Select,
}

impl fmt::Display for ControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TextInput => "TextInput",
            Self::NumericInput => "NumericInput",
            Self::Select => "Select",
        };
        write!(f, "{name}")
    }
}

/// A trait for HTML form controls.
pub trait Control: Send + Sync + fmt::Debug {
    /// Returns the control type enum variant.
    fn control_type(&self) -> ControlType;

    /// Renders the control as an HTML string.
    ///
    /// # Arguments
    /// - `name` - The HTML `name` attribute
    /// - `value` - The current value to display
    /// - `attrs` - Additional HTML attributes, forwarded verbatim
    fn render(&self, name: &str, value: &str, attrs: &BTreeMap<String, AttrValue>) -> String;

    /// Returns the HTML `id` attribute value for a label targeting this control.
    fn id_for_label(&self, id: &str) -> String {
        id.to_string()
    }
}

/// Merges pass-through attributes over the control's defaults.
///
/// Pass-through values win over defaults, except for the reserved names the
/// control renders itself.
fn merge_attrs(
    defaults: &[(&str, &str)],
    attrs: &BTreeMap<String, AttrValue>,
) -> BTreeMap<String, AttrValue> {
    let mut merged: BTreeMap<String, AttrValue> = defaults
        .iter()
        .map(|(k, v)| ((*k).to_string(), AttrValue::from(*v)))
        .collect();
    for (key, value) in attrs {
        if !RESERVED_ATTRS.contains(&key.as_str()) {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Formats an attribute map into a string like ` key="value" flag`.
///
/// Output is ordered by attribute name. `Bool(true)` renders as a bare
/// attribute and `Bool(false)` is omitted.
fn render_attrs(attrs: &BTreeMap<String, AttrValue>) -> String {
    let mut out = String::new();
    for (key, value) in attrs {
        let key = escape_html(key);
        match value {
            AttrValue::Bool(true) => {
                out.push(' ');
                out.push_str(&key);
            }
            AttrValue::Bool(false) => {}
            AttrValue::Number(n) => out.push_str(&format!(r#" {key}="{n}""#)),
            AttrValue::String(s) => out.push_str(&format!(r#" {key}="{}""#, escape_html(s))),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Built-in controls
// ---------------------------------------------------------------------------

/// A free-text `<input type="text">` restricted to letters.
#[derive(Debug, Clone)]
pub struct TextInput;

impl Control for TextInput {
    fn control_type(&self) -> ControlType {
        ControlType::TextInput
    }

    fn render(&self, name: &str, value: &str, attrs: &BTreeMap<String, AttrValue>) -> String {
        let attrs = merge_attrs(&[("pattern", ALPHA_PATTERN)], attrs);
        format!(
            r#"<input type="text" name="{}" value="{}"{} />"#,
            escape_html(name),
            escape_html(value),
            render_attrs(&attrs)
        )
    }
}

/// A numeric-flavored `<input type="text">` restricted to digits.
#[derive(Debug, Clone)]
pub struct NumericInput;

impl Control for NumericInput {
    fn control_type(&self) -> ControlType {
        ControlType::NumericInput
    }

    fn render(&self, name: &str, value: &str, attrs: &BTreeMap<String, AttrValue>) -> String {
        let attrs = merge_attrs(&[("inputmode", "numeric"), ("pattern", DIGIT_PATTERN)], attrs);
        format!(
            r#"<input type="text" name="{}" value="{}"{} />"#,
            escape_html(name),
            escape_html(value),
            render_attrs(&attrs)
        )
    }
}

/// A `<select>` with one `<option>` per choice, value and text both the
/// choice string.
#[derive(Debug, Clone)]
pub struct Select {
    /// The available choices, in display order.
    pub options: Vec<String>,
}

impl Select {
    /// Creates a new `Select` control with the given options.
    pub fn new(options: Vec<String>) -> Self {
        Self { options }
    }
}

impl Control for Select {
    fn control_type(&self) -> ControlType {
        ControlType::Select
    }

    fn render(&self, name: &str, value: &str, attrs: &BTreeMap<String, AttrValue>) -> String {
        let attrs = merge_attrs(&[], attrs);
        let mut options = String::new();
        for option in &self.options {
            let selected = if option == value { " selected" } else { "" };
            let option = escape_html(option);
            options.push_str(&format!(
                r#"<option value="{option}"{selected}>{option}</option>"#
            ));
        }
        format!(
            r#"<select name="{}"{}>{options}</select>"#,
            escape_html(name),
            render_attrs(&attrs)
        )
    }
}

/// Creates the control for a descriptor's kind.
pub fn create_control(field: &FieldDescriptor) -> Box<dyn Control> {
    match field.kind {
        FieldKind::Text => Box::new(TextInput),
        FieldKind::Numeric => Box::new(NumericInput),
        FieldKind::Select => Box::new(Select::new(field.options.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_attrs() -> BTreeMap<String, AttrValue> {
        BTreeMap::new()
    }

    #[test]
    fn test_text_input_render() {
        let html = TextInput.render("Name", "Ana", &empty_attrs());
        assert_eq!(
            html,
            r#"<input type="text" name="Name" value="Ana" pattern="[A-Za-z]+" />"#
        );
    }

    #[test]
    fn test_numeric_input_render() {
        let html = NumericInput.render("Age", "", &empty_attrs());
        assert!(html.contains(r#"type="text""#));
        assert!(html.contains(r#"inputmode="numeric""#));
        assert!(html.contains(r#"pattern="[0-9]+""#));
        assert!(html.contains(r#"value="""#));
    }

    #[test]
    fn test_select_render_in_order() {
        let select = Select::new(vec!["USA".into(), "Canada".into(), "UK".into()]);
        let html = select.render("Country", "", &empty_attrs());
        assert_eq!(
            html,
            concat!(
                r#"<select name="Country">"#,
                r#"<option value="USA">USA</option>"#,
                r#"<option value="Canada">Canada</option>"#,
                r#"<option value="UK">UK</option>"#,
                "</select>"
            )
        );
    }

    #[test]
    fn test_select_marks_current_value() {
        let select = Select::new(vec!["USA".into(), "UK".into()]);
        let html = select.render("Country", "UK", &empty_attrs());
        assert!(html.contains(r#"<option value="UK" selected>UK</option>"#));
        assert!(html.contains(r#"<option value="USA">USA</option>"#));
    }

    #[test]
    fn test_select_without_options() {
        let html = Select::new(vec![]).render("Country", "", &empty_attrs());
        assert_eq!(html, r#"<select name="Country"></select>"#);
    }

    #[test]
    fn test_pass_through_attrs() {
        let mut attrs = BTreeMap::new();
        attrs.insert("placeholder".to_string(), AttrValue::from("Your name"));
        attrs.insert("maxlength".to_string(), AttrValue::from(20_i64));
        attrs.insert("autofocus".to_string(), AttrValue::Bool(true));
        attrs.insert("disabled".to_string(), AttrValue::Bool(false));
        let html = TextInput.render("Name", "", &attrs);
        assert!(html.contains(r#" placeholder="Your name""#));
        assert!(html.contains(r#" maxlength="20""#));
        assert!(html.contains(" autofocus"));
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn test_pass_through_overrides_pattern_but_not_name() {
        let mut attrs = BTreeMap::new();
        attrs.insert("pattern".to_string(), AttrValue::from("[a-z]{2,}"));
        attrs.insert("name".to_string(), AttrValue::from("hijacked"));
        attrs.insert("value".to_string(), AttrValue::from("forced"));
        let html = TextInput.render("Name", "Ana", &attrs);
        assert!(html.contains(r#"pattern="[a-z]{2,}""#));
        assert!(!html.contains(ALPHA_PATTERN));
        assert!(html.contains(r#"name="Name""#));
        assert!(!html.contains("hijacked"));
        assert!(!html.contains("forced"));
    }

    #[test]
    fn test_values_are_escaped() {
        let html = TextInput.render("Name", r#""><script>"#, &empty_attrs());
        assert!(html.contains(r#"value="&quot;&gt;&lt;script&gt;""#));

        let select = Select::new(vec!["A&B".into()]);
        let html = select.render("Co", "A&B", &empty_attrs());
        assert!(html.contains(r#"<option value="A&amp;B" selected>A&amp;B</option>"#));
    }

    #[test]
    fn test_create_control() {
        let cases = [
            (FieldDescriptor::text("a"), ControlType::TextInput),
            (FieldDescriptor::numeric("b"), ControlType::NumericInput),
            (FieldDescriptor::select("c", ["x"]), ControlType::Select),
        ];
        for (field, expected) in cases {
            assert_eq!(create_control(&field).control_type(), expected);
        }
    }

    #[test]
    fn test_control_type_display() {
        assert_eq!(ControlType::TextInput.to_string(), "TextInput");
        assert_eq!(ControlType::NumericInput.to_string(), "NumericInput");
        assert_eq!(ControlType::Select.to_string(), "Select");
    }
}
