//! # formkit-core
//!
//! Core types, settings, and error types for the formkit workspace.
//! This crate has no dependency on the form layer and provides the foundation
//! for the other crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Runtime configuration with defaults
//! - [`settings_loader`] - Loading settings from TOML/JSON files and the environment
//! - [`logging`] - Tracing-based logging integration
//! - [`utils`] - Text helpers (HTML escaping, id generation)

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{FormkitError, FormkitResult};
pub use settings::Settings;
