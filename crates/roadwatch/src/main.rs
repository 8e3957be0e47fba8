//! `roadwatch` - CLI for the road obstacle log
//!
//! This binary records and lists road obstacles and hands emergency calls to
//! the platform's dialer.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use chrono::Local;
use clap::Parser;

use roadwatch::cli::{
    AddCommand, CallCommand, Cli, Command, ConfigCommand, OutputFormat, StatusCommand,
};
use roadwatch::contacts::{self, Dialer};
use roadwatch::display;
use roadwatch::draft::ObstacleDraft;
use roadwatch::obstacle::ObstacleId;
use roadwatch::store::{ObstacleStore, SqliteKeyValue};
use roadwatch::{init_logging, Config, Error, Result};

// Platform-specific imports using conditional compilation
#[cfg(target_os = "linux")]
use roadwatch_linux as platform;

#[cfg(target_os = "macos")]
use roadwatch_mac as platform;

type Store = ObstacleStore<SqliteKeyValue>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(hint) = e.hint() {
                eprintln!("{hint}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Config inspection must work even when the config itself is broken
    let config = match &cli.command {
        Command::Config(ConfigCommand::Validate { file }) => {
            return handle_config_validate(file.clone().or_else(|| cli.config.clone()));
        }
        Command::Config(ConfigCommand::Path) => {
            println!("{}", Config::default_config_path().display());
            return Ok(());
        }
        _ => Config::load_from(cli.config.clone())?,
    };

    match cli.command {
        Command::List(cmd) => handle_list(&open_store(&config)?, cmd.format),
        Command::Add(cmd) => handle_add(&config, &mut open_store(&config)?, cmd).await,
        Command::Delete(cmd) => {
            let id = ObstacleId::from(cmd.id);
            if open_store(&config)?.remove(&id)? == 0 {
                println!("No obstacle with id {id}; nothing deleted.");
            } else {
                println!("Obstacle deleted.");
            }
            Ok(())
        }
        Command::Show(cmd) => {
            let id = ObstacleId::from(cmd.id);
            let obstacle = open_store(&config)?
                .get(&id)?
                .ok_or(Error::ObstacleNotFound(id))?;
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&obstacle)?);
            } else {
                print!("{}", display::render_obstacle(&obstacle, &Local));
            }
            Ok(())
        }
        Command::Contacts(cmd) => {
            match cmd.format {
                OutputFormat::Plain => print!("{}", display::render_contacts(contacts::all())),
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(contacts::all())?);
                }
            }
            Ok(())
        }
        Command::Call(cmd) => handle_call(&cmd),
        Command::Status(cmd) => handle_status(&config, &cmd),
        Command::Config(ConfigCommand::Show { json }) => handle_config_show(&config, json),
        Command::Config(ConfigCommand::Path | ConfigCommand::Validate { .. }) => Ok(()),
    }
}

fn open_store(config: &Config) -> Result<Store> {
    let backend = SqliteKeyValue::open(config.database_path())?;
    Ok(ObstacleStore::with_key(backend, config.storage.key.clone()))
}

fn handle_list(store: &Store, format: OutputFormat) -> Result<()> {
    let obstacles = store.load()?;
    let stats = store.stats()?;

    match format {
        OutputFormat::Plain => {
            print!("{}", display::render_obstacles(&obstacles, stats, &Local));
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "stats": stats,
                "obstacles": obstacles,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

async fn handle_add(config: &Config, store: &mut Store, cmd: AddCommand) -> Result<()> {
    let mut draft = ObstacleDraft::new(cmd.description);

    if cmd.here {
        let provider = config.location.build_provider()?;
        match draft.use_current_position(provider.as_ref()).await {
            Ok(position) => println!(
                "Using current position: {:.6}, {:.6}",
                position.latitude(),
                position.longitude()
            ),
            Err(e) => eprintln!("Could not get current position ({e}); saving without GPS."),
        }
    } else {
        draft = draft.with_coordinates(
            cmd.lat.unwrap_or_default(),
            cmd.lng.unwrap_or_default(),
        );
    }

    let obstacle = draft.validate()?.into_obstacle();
    let id = obstacle.id().clone();
    store.append(obstacle)?;

    println!("Obstacle saved ({id}).");
    Ok(())
}

/// Hands `tel:` URIs to the desktop's registered handler.
#[derive(Debug)]
struct PlatformDialer;

impl Dialer for PlatformDialer {
    fn dial(&self, uri: &str) -> Result<()> {
        platform::open_uri(uri).map_err(|e| Error::platform(e.to_string()))
    }
}

fn handle_call(cmd: &CallCommand) -> Result<()> {
    let contact = contacts::find(&cmd.contact_id)
        .ok_or_else(|| Error::ContactNotFound(cmd.contact_id.clone()))?;

    if !cmd.yes {
        println!("Call {} at {}?", contact.name, contact.phone);
        println!("Use --yes to confirm.");
        return Ok(());
    }

    platform::init().map_err(|e| Error::platform(e.to_string()))?;
    contacts::call(contact, &PlatformDialer)?;
    println!("Calling {} ({})...", contact.name, contact.phone);
    Ok(())
}

fn handle_status(config: &Config, cmd: &StatusCommand) -> Result<()> {
    let store = open_store(config)?;
    let stats = store.stats()?;
    let database_path = config.database_path();
    let database_size = store.backend().size_bytes();

    if cmd.json {
        let status = serde_json::json!({
            "platform": platform::platform_name(),
            "database_path": database_path,
            "database_size_bytes": database_size,
            "storage_key": store.key(),
            "location_mode": config.location.mode,
            "obstacles": stats,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("roadwatch status");
        println!("----------------");
        println!("Platform:      {}", platform::platform_name());
        println!("Database:      {}", database_path.display());
        println!("Size:          {database_size} bytes");
        println!("Location:      {:?}", config.location.mode);
        println!("Obstacles:     {}", stats.total);
        println!("With GPS:      {}", stats.with_location);
    }
    Ok(())
}

fn handle_config_show(config: &Config, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("Current Configuration");
    println!("=====================");
    println!();
    println!("[Storage]");
    println!("  Database path:      {}", config.database_path().display());
    println!("  Key:                {}", config.storage.key);
    println!();
    println!("[Location]");
    println!("  Mode:               {:?}", config.location.mode);
    match config.location.position() {
        Some(position) => println!(
            "  Position:           {:.6}, {:.6}",
            position.latitude(),
            position.longitude()
        ),
        None => println!("  Position:           (none)"),
    }
    Ok(())
}

fn handle_config_validate(file: Option<std::path::PathBuf>) -> Result<()> {
    let path = file.unwrap_or_else(Config::default_config_path);
    println!("Validating configuration: {}", path.display());
    Config::load_from(Some(path))?;
    println!("Configuration is valid.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_validate_fails_on_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[location]\nmode = \"fixed\"").unwrap();

        let err = handle_config_validate(Some(file.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));
    }

    #[test]
    fn test_config_validate_accepts_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[storage]\nkey = \"obstacles\"").unwrap();

        assert!(handle_config_validate(Some(file.path().to_path_buf())).is_ok());
    }
}
