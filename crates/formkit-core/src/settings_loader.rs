//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `FORMKIT_DEBUG` | `debug` |
//! | `FORMKIT_LOG_LEVEL` | `log_level` |
//! | `FORMKIT_SCHEMA` | `schema_path` |
//! | `FORMKIT_SUBMIT_LABEL` | `submit_label` |
//! | `FORMKIT_FORM_ID` | `form_id` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use formkit_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file("formkit.toml").unwrap();
//! let settings = settings_loader::from_file_with_env("formkit.json").unwrap();
//! ```

use std::path::{Path, PathBuf};

use crate::error::FormkitError;
use crate::settings::Settings;

/// Loads settings from a TOML string. Missing keys keep their defaults.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, FormkitError> {
    toml::from_str(toml_str)
        .map_err(|e| FormkitError::ConfigurationError(format!("Failed to parse TOML: {e}")))
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, FormkitError> {
    let content = read_config(path.as_ref(), "TOML")?;
    from_toml_str(&content)
}

/// Loads settings from a JSON string. Missing keys keep their defaults.
pub fn from_json_str(json_str: &str) -> Result<Settings, FormkitError> {
    serde_json::from_str(json_str)
        .map_err(|e| FormkitError::ConfigurationError(format!("Failed to parse JSON: {e}")))
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, FormkitError> {
    let content = read_config(path.as_ref(), "JSON")?;
    from_json_str(&content)
}

/// Loads settings from a file, picking the format from its extension
/// (`.toml` is TOML, anything else is JSON), then applies environment
/// variable overrides.
pub fn from_file_with_env(path: impl AsRef<Path>) -> Result<Settings, FormkitError> {
    let path = path.as_ref();
    let mut settings = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => from_toml_file(path)?,
        _ => from_json_file(path)?,
    };
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// `FORMKIT_DEBUG` accepts "true"/"1"/"yes" (case-insensitive) as true;
/// anything else is false. An empty `FORMKIT_SCHEMA` clears the schema path.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("FORMKIT_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Ok(val) = std::env::var("FORMKIT_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("FORMKIT_SCHEMA") {
        settings.schema_path = if val.is_empty() {
            None
        } else {
            Some(PathBuf::from(val))
        };
    }

    if let Ok(val) = std::env::var("FORMKIT_SUBMIT_LABEL") {
        settings.submit_label = val;
    }

    if let Ok(val) = std::env::var("FORMKIT_FORM_ID") {
        settings.form_id = val;
    }

    if let Ok(val) = std::env::var("FORMKIT_PAGE_HEADING") {
        settings.page_heading = val;
    }
}

fn read_config(path: &Path, format: &str) -> Result<String, FormkitError> {
    std::fs::read_to_string(path).map_err(|e| {
        FormkitError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}
