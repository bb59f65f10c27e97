//! Management command framework for formkit.
//!
//! A [`ManagementCommand`] is one `formkit` subcommand. The
//! [`CommandRegistry`] builds the clap CLI from the registered commands,
//! adds the global `--settings` option, and dispatches to the chosen command.
//!
//! ## Defining a Command
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use formkit_cli::command::ManagementCommand;
//! use formkit_cli::commands::{emit, resolve_schema, schema_arg};
//! use formkit_core::{FormkitError, Settings};
//!
//! struct LabelsCommand;
//!
//! #[async_trait]
//! impl ManagementCommand for LabelsCommand {
//!     fn name(&self) -> &'static str { "labels" }
//!     fn help(&self) -> &'static str { "List the schema's labels" }
//!
//!     fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
//!         cmd.arg(schema_arg())
//!     }
//!
//!     async fn handle(
//!         &self,
//!         matches: &clap::ArgMatches,
//!         settings: &Settings,
//!     ) -> Result<(), FormkitError> {
//!         let schema = resolve_schema(matches, settings)?;
//!         emit(&schema.labels().join("\n"))
//!     }
//! }
//! ```

use std::collections::BTreeMap;

use async_trait::async_trait;
use formkit_core::{FormkitError, Settings};

/// One `formkit` subcommand.
#[async_trait]
pub trait ManagementCommand: Send + Sync {
    /// The subcommand name.
    fn name(&self) -> &'static str;

    /// One-line help shown by `formkit --help`.
    fn help(&self) -> &'static str;

    /// Adds the command's own arguments. The default adds none.
    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Runs the command with its sub-matches and the loaded settings.
    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), FormkitError>;
}

/// The set of subcommands the `formkit` binary understands, keyed by name.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, Box<dyn ManagementCommand>>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `command`, replacing any command with the same name.
    pub fn register(&mut self, command: Box<dyn ManagementCommand>) {
        let name = command.name();
        if self.commands.insert(name, command).is_some() {
            tracing::warn!(command = name, "command registered twice, keeping the last one");
        }
    }

    /// Looks up a command by name.
    pub fn get(&self, name: &str) -> Option<&dyn ManagementCommand> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    /// Registered command names in alphabetical order.
    pub fn list_commands(&self) -> Vec<&'static str> {
        self.commands.keys().copied().collect()
    }

    /// Builds the `formkit` clap command with one subcommand per registered
    /// command and a global `--settings PATH` option.
    pub fn build_cli(&self) -> clap::Command {
        let app = clap::Command::new("formkit")
            .about("Render, fill in and check declarative forms")
            .version(env!("CARGO_PKG_VERSION"))
            .subcommand_required(true)
            .arg(
                clap::Arg::new("settings")
                    .long("settings")
                    .global(true)
                    .value_name("PATH")
                    .help("Settings file (TOML or JSON)"),
            );

        self.commands.values().fold(app, |app, cmd| {
            app.subcommand(cmd.add_arguments(clap::Command::new(cmd.name()).about(cmd.help())))
        })
    }

    /// Dispatches to the subcommand named in `matches`.
    pub async fn execute(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), FormkitError> {
        let (name, sub_matches) = matches
            .subcommand()
            .ok_or_else(|| FormkitError::CommandError("No subcommand specified".to_string()))?;

        let cmd = self
            .get(name)
            .ok_or_else(|| FormkitError::CommandError(format!("Unknown command: {name}")))?;

        tracing::debug!(command = name, "dispatching");
        cmd.handle(sub_matches, settings).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopCommand(&'static str);

    #[async_trait]
    impl ManagementCommand for NoopCommand {
        fn name(&self) -> &'static str {
            self.0
        }

        fn help(&self) -> &'static str {
            "Does nothing"
        }

        fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
            cmd.arg(
                clap::Arg::new("verbose")
                    .long("verbose")
                    .action(clap::ArgAction::SetTrue),
            )
        }

        async fn handle(
            &self,
            _matches: &clap::ArgMatches,
            _settings: &Settings,
        ) -> Result<(), FormkitError> {
            Ok(())
        }
    }

    struct FailingCommand;

    #[async_trait]
    impl ManagementCommand for FailingCommand {
        fn name(&self) -> &'static str {
            "fail"
        }

        fn help(&self) -> &'static str {
            "Always fails"
        }

        async fn handle(
            &self,
            _matches: &clap::ArgMatches,
            _settings: &Settings,
        ) -> Result<(), FormkitError> {
            Err(FormkitError::CommandError("deliberate failure".to_string()))
        }
    }

    #[test]
    fn test_registry_new_is_empty() {
        assert!(CommandRegistry::new().list_commands().is_empty());
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(NoopCommand("noop")));

        let cmd = registry.get("noop").unwrap();
        assert_eq!(cmd.name(), "noop");
        assert_eq!(cmd.help(), "Does nothing");
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_list_commands_sorted() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(NoopCommand("submit")));
        registry.register(Box::new(NoopCommand("check")));
        registry.register(Box::new(NoopCommand("render")));

        assert_eq!(registry.list_commands(), vec!["check", "render", "submit"]);
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(NoopCommand("noop")));
        registry.register(Box::new(NoopCommand("noop")));
        assert_eq!(registry.list_commands(), vec!["noop"]);
    }

    #[test]
    fn test_build_cli_with_global_settings() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(NoopCommand("noop")));

        let matches = registry
            .build_cli()
            .try_get_matches_from(["formkit", "noop", "--verbose", "--settings", "f.toml"])
            .unwrap();
        assert_eq!(
            matches.get_one::<String>("settings").map(String::as_str),
            Some("f.toml")
        );
        let (name, sub_matches) = matches.subcommand().unwrap();
        assert_eq!(name, "noop");
        assert!(sub_matches.get_flag("verbose"));
    }

    #[test]
    fn test_build_cli_requires_subcommand() {
        let registry = CommandRegistry::new();
        assert!(registry.build_cli().try_get_matches_from(["formkit"]).is_err());
    }

    #[tokio::test]
    async fn test_execute_success() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(NoopCommand("noop")));

        let matches = registry
            .build_cli()
            .try_get_matches_from(["formkit", "noop"])
            .unwrap();

        let result = registry.execute(&matches, &Settings::default()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_execute_failing_command() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(FailingCommand));

        let matches = registry
            .build_cli()
            .try_get_matches_from(["formkit", "fail"])
            .unwrap();

        let result = registry.execute(&matches, &Settings::default()).await;
        assert!(matches!(result, Err(FormkitError::CommandError(_))));
    }

    #[tokio::test]
    async fn test_execute_without_subcommand_is_command_error() {
        let registry = CommandRegistry::new();
        let matches = clap::Command::new("formkit").get_matches_from(["formkit"]);
        let err = registry
            .execute(&matches, &Settings::default())
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}
