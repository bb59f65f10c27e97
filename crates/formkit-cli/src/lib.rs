//! # formkit-cli
//!
//! Management commands for formkit.
//!
//! - **Management commands** - a framework for defining and registering CLI
//!   commands, plus the built-in `render`, `submit` and `check` commands
//! - **`formkit` binary** - loads settings, sets up logging, and dispatches
//!
//! ## Quick Start
//!
//! ```rust
//! use formkit_cli::command::CommandRegistry;
//! use formkit_cli::commands::register_builtin_commands;
//!
//! let mut registry = CommandRegistry::new();
//! register_builtin_commands(&mut registry);
//!
//! let names = registry.list_commands();
//! assert_eq!(names, vec!["check", "render", "submit"]);
//! ```

// - unused_async: command handlers keep a uniform async signature
#![allow(clippy::unused_async)]

pub mod command;
pub mod commands;

pub use command::{CommandRegistry, ManagementCommand};
