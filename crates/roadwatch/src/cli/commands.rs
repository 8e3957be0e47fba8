//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Add command arguments.
///
/// Coordinates are taken as raw text and validated together with the
/// description, so `--lat ""` behaves like leaving the field blank.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// What is blocking the road
    pub description: String,

    /// Latitude in decimal degrees
    #[arg(long, value_name = "DEGREES", allow_hyphen_values = true)]
    pub lat: Option<String>,

    /// Longitude in decimal degrees
    #[arg(long, value_name = "DEGREES", allow_hyphen_values = true)]
    pub lng: Option<String>,

    /// Fill in coordinates from the configured location source
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub here: bool,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Identifier of the obstacle to remove
    pub id: String,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Identifier of the obstacle
    pub id: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Contacts command arguments.
#[derive(Debug, Args)]
pub struct ContactsCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Call command arguments.
#[derive(Debug, Args)]
pub struct CallCommand {
    /// Identifier of the contact to call
    pub contact_id: String,

    /// Place the call without asking
    #[arg(short, long)]
    pub yes: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Plain,
    /// JSON output
    Json,
}
