//! Built-in management commands.
//!
//! Each command implements the
//! [`ManagementCommand`](crate::command::ManagementCommand) trait and works on
//! a schema chosen by [`resolve_schema`].

pub mod check;
pub mod render;
pub mod submit;

pub use check::CheckCommand;
pub use render::RenderCommand;
pub use submit::SubmitCommand;

use std::io::Write;

use formkit_core::{FormkitError, Settings};
use formkit_forms::{example_schema, Schema};

use crate::command::CommandRegistry;

/// Registers all built-in management commands into the given registry.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(RenderCommand));
    registry.register(Box::new(SubmitCommand));
    registry.register(Box::new(CheckCommand));
}

/// Writes `text` and a newline to stdout. A closed pipe surfaces as
/// [`FormkitError::IoError`] rather than a panic.
pub fn emit(text: &str) -> Result<(), FormkitError> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{text}")?;
    out.flush()?;
    Ok(())
}

/// The `--schema PATH` argument shared by the built-in commands.
pub fn schema_arg() -> clap::Arg {
    clap::Arg::new("schema")
        .long("schema")
        .short('s')
        .value_name("PATH")
        .help("Schema document (JSON or TOML); defaults to the example schema")
}

/// Picks the schema for a command: `--schema`, then `settings.schema_path`,
/// then the built-in example schema.
pub fn resolve_schema(
    matches: &clap::ArgMatches,
    settings: &Settings,
) -> Result<Schema, FormkitError> {
    if let Some(path) = matches.get_one::<String>("schema") {
        tracing::debug!(path = %path, "loading schema from argument");
        return Schema::from_file(path);
    }
    if let Some(path) = &settings.schema_path {
        tracing::debug!(path = %path.display(), "loading schema from settings");
        return Schema::from_file(path);
    }
    Ok(example_schema())
}
