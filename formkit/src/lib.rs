//! # formkit
//!
//! Renders a form from a declarative field list, tracks per-field input
//! state, validates required fields on submission, and displays a result line.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient
//! access. Depend on `formkit` to get everything, or on individual crates for
//! finer-grained control.
//!
//! ```
//! use formkit::forms::{example_schema, FormRenderer, SubmitEvent};
//!
//! let mut form = FormRenderer::new(example_schema());
//! form.handle_submit(&mut SubmitEvent::new());
//! assert_eq!(form.errors().len(), 3);
//! ```

/// Settings, logging, and error types.
pub use formkit_core as core;

/// Schemas, form state, controls, and the renderer.
pub use formkit_forms as forms;

/// Management commands (CLI).
#[cfg(feature = "cli")]
pub use formkit_cli as cli;

/// Third-party crates re-exported for convenience.
pub use serde;
pub use serde_json;
pub use tracing;

/// Commonly used types, importable with `use formkit::prelude::*`.
pub mod prelude {
    pub use formkit_core::{FormkitError, FormkitResult, Settings};
    pub use formkit_forms::{
        example_schema, AttrValue, FieldDescriptor, FieldError, FieldKind, FormAction,
        FormRenderer, FormState, RenderOptions, Schema, SubmitEvent, REQUIRED_MESSAGE,
    };
}
