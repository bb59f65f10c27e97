//! # formkit-forms
//!
//! Renders a form from a declarative field list, tracks per-field values and
//! errors, validates required fields on submit, and produces a result line.
//!
//! - [`schema`] - field descriptors and schemas (pure data)
//! - [`state`] - form state and its reducer
//! - [`widgets`] - HTML controls per field kind
//! - [`bound_field`] - a descriptor bound to its value and error
//! - [`renderer`] - the form renderer

pub mod bound_field;
pub mod renderer;
pub mod schema;
pub mod state;
pub mod widgets;

pub use renderer::{FormRenderer, RenderOptions, SubmitEvent};
pub use schema::{example_schema, AttrValue, FieldDescriptor, FieldKind, Schema};
pub use state::{FieldError, FormAction, FormState, REQUIRED_MESSAGE};
