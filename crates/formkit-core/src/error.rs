//! Core error types for formkit.
//!
//! [`FormkitError`] covers everything that can go wrong *around* a form:
//! loading settings, parsing a schema document, dispatching a command.
//! Field validation failures are not errors in this sense; they are state
//! owned and displayed by the form renderer.

use thiserror::Error;

/// The primary error type for the formkit workspace.
#[derive(Error, Debug)]
pub enum FormkitError {
    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Schema ───────────────────────────────────────────────────────

    /// A schema document could not be understood.
    #[error("Schema error: {0}")]
    SchemaError(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // ── Commands ─────────────────────────────────────────────────────

    /// A management command failed or could not be dispatched.
    #[error("Command error: {0}")]
    CommandError(String),
}

impl FormkitError {
    /// Returns the process exit code associated with this error.
    ///
    /// - `ConfigurationError`, `SchemaError`, `SerializationError` -> 78 (`EX_CONFIG`)
    /// - `IoError` -> 74 (`EX_IOERR`)
    /// - `CommandError` -> 1
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigurationError(_) | Self::SchemaError(_) | Self::SerializationError(_) => 78,
            Self::IoError(_) => 74,
            Self::CommandError(_) => 1,
        }
    }
}

impl From<serde_json::Error> for FormkitError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, FormkitError>`.
pub type FormkitResult<T> = Result<T, FormkitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formkit_error_exit_codes() {
        assert_eq!(FormkitError::ConfigurationError("x".into()).exit_code(), 78);
        assert_eq!(FormkitError::SchemaError("x".into()).exit_code(), 78);
        assert_eq!(FormkitError::SerializationError("x".into()).exit_code(), 78);
        assert_eq!(FormkitError::CommandError("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_formkit_error_display() {
        let err = FormkitError::SchemaError("duplicate label 'Name'".into());
        assert_eq!(err.to_string(), "Schema error: duplicate label 'Name'");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: FormkitError = io_err.into();
        assert_eq!(err.exit_code(), 74);
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FormkitError = json_err.into();
        assert!(matches!(err, FormkitError::SerializationError(_)));
    }
}
