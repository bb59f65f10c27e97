//! Settings for the formkit tooling.
//!
//! [`Settings`] holds runtime configuration with sensible defaults. Every
//! field has a default, so a settings file only needs to name what it changes
//! (see [`settings_loader`](crate::settings_loader)).

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The complete set of runtime settings.
///
/// # Examples
///
/// ```
/// use formkit_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.submit_label, "Submit");
/// assert!(settings.schema_path.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log filter (e.g. "info", "debug", "formkit_forms=trace").
    pub log_level: String,

    // ── Form ─────────────────────────────────────────────────────────

    /// Path to a schema document. `None` selects the built-in example schema.
    pub schema_path: Option<PathBuf>,
    /// Caption of the submit control.
    pub submit_label: String,
    /// The `id` attribute of the rendered `<form>` element.
    pub form_id: String,
    /// The `<h1>` text of a full page render.
    pub page_heading: String,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            schema_path: None,
            submit_label: "Submit".to_string(),
            form_id: "formkit-form".to_string(),
            page_heading: "Dynamic Form Example".to_string(),
            extra: HashMap::new(),
        }
    }
}
