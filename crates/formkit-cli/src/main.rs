//! The `formkit` binary.
//!
//! ```bash
//! formkit render
//! formkit submit --set Name=Ana --set Age=30 --set Country=UK
//! formkit check --schema forms/contact.toml
//! formkit --settings formkit.toml render
//! ```

use std::process::ExitCode;

use formkit_cli::command::CommandRegistry;
use formkit_cli::commands::register_builtin_commands;
use formkit_core::logging::setup_logging;
use formkit_core::{settings_loader, FormkitError, Settings};

fn load_settings(matches: &clap::ArgMatches) -> Result<Settings, FormkitError> {
    match matches.get_one::<String>("settings") {
        Some(path) => settings_loader::from_file_with_env(path),
        None => Ok(settings_loader::from_env()),
    }
}

async fn run() -> Result<(), FormkitError> {
    let mut registry = CommandRegistry::new();
    register_builtin_commands(&mut registry);

    let matches = registry.build_cli().get_matches();
    let settings = load_settings(&matches)?;
    setup_logging(&settings);
    tracing::debug!(debug = settings.debug, log_level = %settings.log_level, "settings loaded");

    registry.execute(&matches, &settings).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err}");
            ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
        }
    }
}
