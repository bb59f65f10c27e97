//! Field schemas: the declarative description of a form.
//!
//! A [`Schema`] is an ordered list of [`FieldDescriptor`]s. It is pure data;
//! the [`FormRenderer`](crate::renderer::FormRenderer) consumes it to derive
//! state and render controls.
//!
//! Schemas can be built in code:
//!
//! ```
//! use formkit_forms::schema::{FieldDescriptor, Schema};
//!
//! let schema = Schema::new(vec![
//!     FieldDescriptor::text("Name").required(true),
//!     FieldDescriptor::select("Plan", ["Free", "Pro"]).attr("class", "wide"),
//! ]);
//! assert_eq!(schema.labels(), vec!["Name", "Plan"]);
//! ```
//!
//! or loaded from JSON/TOML documents, where every key other than `kind`,
//! `label`, `options` and `required` lands in the descriptor's attribute bag:
//!
//! ```
//! use formkit_forms::schema::Schema;
//!
//! let schema = Schema::from_json_str(
//!     r#"[{"kind": "number", "label": "Age", "required": true, "maxlength": 3}]"#,
//! ).unwrap();
//! assert!(schema.fields()[0].attrs.contains_key("maxlength"));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use formkit_core::FormkitError;
use serde::{Deserialize, Serialize};

/// The kind of a field. Determines the rendered control and its input pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Free text, rendered as a text input.
    #[serde(rename = "text")]
    Text,
    /// Digits, rendered as a numeric-flavored text input.
    #[serde(rename = "number", alias = "numeric")]
    Numeric,
    /// A single choice among `options`, rendered as a `<select>`.
    #[serde(rename = "select")]
    Select,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Numeric => "number",
            Self::Select => "select",
        };
        write!(f, "{name}")
    }
}

/// A primitive value in a descriptor's pass-through attribute bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// A boolean attribute: `true` renders bare, `false` is omitted.
    Bool(bool),
    /// A numeric attribute.
    Number(serde_json::Number),
    /// A string attribute.
    String(String),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// One entry in a schema.
///
/// The `label` is both the caption and the key under which the field's value
/// and error are stored. Labels are expected to be unique; nothing enforces
/// it, and duplicates share a single value/error slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Which control to render.
    pub kind: FieldKind,
    /// Caption and state key.
    pub label: String,
    /// Selectable values, in display order. Only used by [`FieldKind::Select`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Whether submit-time validation requires a non-empty value.
    #[serde(default)]
    pub required: bool,
    /// Any other attributes, forwarded verbatim to the rendered control.
    #[serde(flatten)]
    pub attrs: BTreeMap<String, AttrValue>,
}

impl FieldDescriptor {
    /// Creates a descriptor of the given kind, optional and without options.
    pub fn new(kind: FieldKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            options: Vec::new(),
            required: false,
            attrs: BTreeMap::new(),
        }
    }

    /// A free-text field.
    pub fn text(label: impl Into<String>) -> Self {
        Self::new(FieldKind::Text, label)
    }

    /// A numeric field.
    pub fn numeric(label: impl Into<String>) -> Self {
        Self::new(FieldKind::Numeric, label)
    }

    /// A single-choice field with the given options.
    pub fn select<I, S>(label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut field = Self::new(FieldKind::Select, label);
        field.options = options.into_iter().map(Into::into).collect();
        field
    }

    /// Sets whether this field is required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Adds a pass-through attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

/// An ordered, shared sequence of field descriptors.
///
/// Cloning a `Schema` is cheap and keeps its identity: [`Schema::same_ref`]
/// tells whether two handles point at the same underlying list, which is what
/// decides whether a renderer must re-derive its state.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Arc<[FieldDescriptor]>,
}

/// Table form of a schema document: `{ fields = [...] }`.
#[derive(Deserialize)]
struct SchemaDocument {
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Creates a schema from descriptors, preserving their order.
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self {
            fields: fields.into(),
        }
    }

    /// Returns the descriptors in order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns the number of descriptors.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the schema has no descriptors.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the first descriptor with the given label.
    pub fn get(&self, label: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.label == label)
    }

    /// Returns all labels in schema order (duplicates included).
    pub fn labels(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.label.as_str()).collect()
    }

    /// Returns `true` if both handles share the same descriptor list.
    pub fn same_ref(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields)
    }

    /// Returns each label that appears more than once, in first-seen order.
    pub fn duplicate_labels(&self) -> Vec<&str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for field in self.fields.iter() {
            *counts.entry(field.label.as_str()).or_default() += 1;
        }
        let mut duplicates: Vec<&str> = Vec::new();
        for field in self.fields.iter() {
            let label = field.label.as_str();
            if counts[label] > 1 && !duplicates.contains(&label) {
                duplicates.push(label);
            }
        }
        duplicates
    }

    /// Returns the labels from `wanted` that no descriptor carries.
    pub fn missing_labels<'a>(&self, wanted: &[&'a str]) -> Vec<&'a str> {
        wanted
            .iter()
            .copied()
            .filter(|label| self.get(label).is_none())
            .collect()
    }

    /// Parses a JSON schema document: either a bare array of descriptors or
    /// an object with a `fields` array.
    pub fn from_json_str(json: &str) -> Result<Self, FormkitError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| FormkitError::SchemaError(format!("Failed to parse JSON schema: {e}")))?;
        let fields = match value {
            serde_json::Value::Array(_) => serde_json::from_value::<Vec<FieldDescriptor>>(value),
            serde_json::Value::Object(_) => {
                serde_json::from_value::<SchemaDocument>(value).map(|doc| doc.fields)
            }
            other => {
                return Err(FormkitError::SchemaError(format!(
                    "Expected an array or an object with 'fields', found {other}"
                )))
            }
        }
        .map_err(|e| FormkitError::SchemaError(format!("Invalid field descriptor: {e}")))?;
        Ok(Self::new(fields))
    }

    /// Parses a TOML schema document with a `[[fields]]` array of tables.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, FormkitError> {
        let doc: SchemaDocument = toml::from_str(toml_str)
            .map_err(|e| FormkitError::SchemaError(format!("Failed to parse TOML schema: {e}")))?;
        Ok(Self::new(doc.fields))
    }

    /// Loads a schema document from disk. `.toml` files are parsed as TOML,
    /// everything else as JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FormkitError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FormkitError::SchemaError(format!(
                "Failed to read schema file '{}': {e}",
                path.display()
            ))
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }
}

impl From<Vec<FieldDescriptor>> for Schema {
    fn from(fields: Vec<FieldDescriptor>) -> Self {
        Self::new(fields)
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// The demonstration schema: a required free-text `Name`, a required numeric
/// `Age` and a required single-choice `Country`.
pub fn example_schema() -> Schema {
    Schema::new(vec![
        FieldDescriptor::text("Name").required(true),
        FieldDescriptor::numeric("Age").required(true),
        FieldDescriptor::select("Country", ["USA", "Canada", "UK", "Other"]).required(true),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_schema() {
        let schema = example_schema();
        assert_eq!(schema.labels(), vec!["Name", "Age", "Country"]);
        assert!(schema.fields().iter().all(|f| f.required));
        let country = schema.get("Country").unwrap();
        assert_eq!(country.kind, FieldKind::Select);
        assert_eq!(country.options, vec!["USA", "Canada", "UK", "Other"]);
    }

    #[test]
    fn test_descriptor_defaults() {
        let field = FieldDescriptor::text("Nickname");
        assert!(!field.required);
        assert!(field.options.is_empty());
        assert!(field.attrs.is_empty());
    }

    #[test]
    fn test_same_ref() {
        let a = example_schema();
        let b = a.clone();
        let c = example_schema();
        assert!(a.same_ref(&b));
        assert!(!a.same_ref(&c));
    }

    #[test]
    fn test_duplicate_labels() {
        let schema = Schema::new(vec![
            FieldDescriptor::text("Name"),
            FieldDescriptor::numeric("Age"),
            FieldDescriptor::text("Name"),
            FieldDescriptor::text("Name"),
        ]);
        assert_eq!(schema.duplicate_labels(), vec!["Name"]);
        assert!(example_schema().duplicate_labels().is_empty());
    }

    #[test]
    fn test_missing_labels() {
        let schema = Schema::new(vec![FieldDescriptor::text("Name")]);
        assert_eq!(
            schema.missing_labels(&["Name", "Age", "Country"]),
            vec!["Age", "Country"]
        );
    }

    #[test]
    fn test_from_json_array() {
        let schema = Schema::from_json_str(
            r#"[
                {"kind": "text", "label": "Name", "required": true, "placeholder": "Your name"},
                {"kind": "select", "label": "Size", "options": ["S", "M"], "disabled": false}
            ]"#,
        )
        .unwrap();
        assert_eq!(schema.len(), 2);
        let name = &schema.fields()[0];
        assert!(name.required);
        assert_eq!(
            name.attrs.get("placeholder"),
            Some(&AttrValue::String("Your name".into()))
        );
        let size = &schema.fields()[1];
        assert!(!size.required);
        assert_eq!(size.options, vec!["S", "M"]);
        assert_eq!(size.attrs.get("disabled"), Some(&AttrValue::Bool(false)));
    }

    #[test]
    fn test_from_json_object_with_fields() {
        let schema =
            Schema::from_json_str(r#"{"fields": [{"kind": "numeric", "label": "Age"}]}"#).unwrap();
        assert_eq!(schema.fields()[0].kind, FieldKind::Numeric);
    }

    #[test]
    fn test_from_json_unknown_kind() {
        let err = Schema::from_json_str(r#"[{"kind": "date", "label": "When"}]"#).unwrap_err();
        assert!(matches!(err, FormkitError::SchemaError(_)));
    }

    #[test]
    fn test_from_json_scalar_rejected() {
        assert!(Schema::from_json_str("42").is_err());
    }

    #[test]
    fn test_from_toml() {
        let schema = Schema::from_toml_str(
            r#"
            [[fields]]
            kind = "text"
            label = "Name"
            required = true

            [[fields]]
            kind = "number"
            label = "Age"
            maxlength = 3
            "#,
        )
        .unwrap();
        assert_eq!(schema.labels(), vec!["Name", "Age"]);
        assert_eq!(
            schema.fields()[1].attrs.get("maxlength"),
            Some(&AttrValue::Number(3.into()))
        );
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(FieldKind::Text.to_string(), "text");
        assert_eq!(FieldKind::Numeric.to_string(), "number");
        assert_eq!(FieldKind::Select.to_string(), "select");
    }
}
