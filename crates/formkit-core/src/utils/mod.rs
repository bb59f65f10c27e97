//! Utility functions for formkit.
//!
//! - [`text`]: String helpers (HTML escaping, element ids).

pub mod text;
