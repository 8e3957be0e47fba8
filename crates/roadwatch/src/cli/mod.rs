//! Command-line interface for roadwatch.
//!
//! This module provides the CLI structure for the `roadwatch` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, CallCommand, ConfigCommand, ContactsCommand, DeleteCommand, ListCommand,
    OutputFormat, ShowCommand, StatusCommand,
};

use crate::logging::Verbosity;

/// roadwatch - Log road obstacles and reach emergency contacts
///
/// Keeps a local, newest-first log of obstacles reported on the road, with
/// optional GPS coordinates, and a fixed directory of contacts to call.
#[derive(Debug, Parser)]
#[command(name = "roadwatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List recorded obstacles, newest first
    List(ListCommand),

    /// Record a new obstacle
    Add(AddCommand),

    /// Remove an obstacle
    Delete(DeleteCommand),

    /// Show one obstacle
    Show(ShowCommand),

    /// List emergency contacts
    Contacts(ContactsCommand),

    /// Call an emergency contact
    Call(CallCommand),

    /// Show storage status and counters
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "roadwatch");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(parse(&["roadwatch", "list"]).verbosity(), Verbosity::Normal);
        assert_eq!(
            parse(&["roadwatch", "-vv", "list"]).verbosity(),
            Verbosity::Debug
        );
        assert_eq!(
            parse(&["roadwatch", "-q", "-v", "list"]).verbosity(),
            Verbosity::Quiet
        );
    }

    #[test]
    fn test_parse_list_json() {
        let cli = parse(&["roadwatch", "list", "--format", "json"]);
        match cli.command {
            Command::List(cmd) => assert_eq!(cmd.format, OutputFormat::Json),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_add_with_coordinates() {
        let cli = parse(&[
            "roadwatch",
            "add",
            "Flooded road",
            "--lat",
            "45.1",
            "--lng",
            "-5.2",
        ]);
        match cli.command {
            Command::Add(cmd) => {
                assert_eq!(cmd.description, "Flooded road");
                assert_eq!(cmd.lat.as_deref(), Some("45.1"));
                assert_eq!(cmd.lng.as_deref(), Some("-5.2"));
                assert!(!cmd.here);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_add_here_conflicts_with_lat() {
        let result = Cli::try_parse_from(["roadwatch", "add", "x", "--here", "--lat", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_add_requires_description() {
        assert!(Cli::try_parse_from(["roadwatch", "add"]).is_err());
    }

    #[test]
    fn test_parse_delete() {
        let cli = parse(&["roadwatch", "delete", "abc"]);
        assert!(matches!(cli.command, Command::Delete(ref cmd) if cmd.id == "abc"));
    }

    #[test]
    fn test_parse_show_json() {
        let cli = parse(&["roadwatch", "show", "abc", "--json"]);
        assert!(matches!(cli.command, Command::Show(ref cmd) if cmd.json));
    }

    #[test]
    fn test_parse_call_without_confirmation() {
        let cli = parse(&["roadwatch", "call", "3"]);
        match cli.command {
            Command::Call(cmd) => {
                assert_eq!(cmd.contact_id, "3");
                assert!(!cmd.yes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = parse(&["roadwatch", "config", "validate", "--file", "x.toml"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["roadwatch", "-c", "/custom/config.toml", "status"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }
}
