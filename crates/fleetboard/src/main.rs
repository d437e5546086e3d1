//! `fleetboard` - CLI for the fleet status dashboard
//!
//! This binary loads the fleet from the configured backend and renders the
//! dashboard, or applies a single status change.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use tracing::warn;

use fleetboard::backend::{self, LocalBackend};
use fleetboard::cli::{
    shell, Cli, Command, ConfigCommand, ListCommand, MarkersCommand, OutputFormat,
    ReadinessCommand, ResetCommand, SetCommand,
};
use fleetboard::config::BackendKind;
use fleetboard::storage::Storage;
use fleetboard::{default_fleet, init_logging, render, AircraftStore, Config, DashboardView};
use fleetboard::{AircraftStatus, UpdateOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::List(cmd) => handle_list(&config, cmd).await,
        Command::Readiness(cmd) => handle_readiness(&config, &cmd).await,
        Command::Set(cmd) => handle_set(&config, &cmd).await,
        Command::Markers(cmd) => handle_markers(&config, &cmd).await,
        Command::Shell => handle_shell(&config).await,
        Command::Reset(cmd) => handle_reset(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

async fn mounted_view(config: &Config) -> anyhow::Result<DashboardView> {
    let backend = backend::from_config(config).context("opening fleet backend")?;
    let mut view = DashboardView::new(AircraftStore::new(backend));
    view.mount().await;
    Ok(view)
}

async fn handle_list(config: &Config, cmd: ListCommand) -> anyhow::Result<()> {
    let mut view = mounted_view(config).await?;
    view.set_filter(cmd.filter.into());

    let out = render::dashboard(&view.visible(), view.readiness(), None, cmd.format)?;
    print!("{out}");
    if cmd.format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

async fn handle_readiness(config: &Config, cmd: &ReadinessCommand) -> anyhow::Result<()> {
    let view = mounted_view(config).await?;
    let readiness = view.readiness();

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&readiness)?);
    } else {
        println!("{}", render::readiness_line(readiness));
    }
    Ok(())
}

async fn handle_set(config: &Config, cmd: &SetCommand) -> anyhow::Result<()> {
    let mut view = mounted_view(config).await?;
    let status = AircraftStatus::from(cmd.status);

    let outcome = view
        .update_status(&cmd.tail_number, status)
        .await
        .with_context(|| format!("{} was not changed; try again", cmd.tail_number))?;

    match outcome {
        UpdateOutcome::Updated(record) => {
            println!("{} is now {}", record.tail_number, record.status);
            println!("{}", render::readiness_line(view.readiness()));
            Ok(())
        }
        UpdateOutcome::NoSuchAircraft => {
            anyhow::bail!("no aircraft with tail number {}", cmd.tail_number)
        }
    }
}

async fn handle_markers(config: &Config, cmd: &MarkersCommand) -> anyhow::Result<()> {
    let view = mounted_view(config).await?;
    let out = render::markers(&view.markers(), cmd.json)?;
    print!("{out}");
    if cmd.json {
        println!();
    }
    Ok(())
}

async fn handle_shell(config: &Config) -> anyhow::Result<()> {
    let mut view = mounted_view(config).await?;
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    shell::run(&mut view, input, &mut stdout).await?;
    stdout.flush()?;
    Ok(())
}

fn handle_reset(config: &Config, cmd: &ResetCommand) -> anyhow::Result<()> {
    if config.backend.kind == BackendKind::Remote {
        warn!("backend is remote; nothing stored locally to reset");
        println!("Backend is remote ({}); nothing to reset.", config.remote.base_url);
        return Ok(());
    }

    if !cmd.yes {
        println!("This will discard the stored fleet; the next run reseeds it.");
        println!("Use --yes to confirm.");
        return Ok(());
    }

    let path = config.database_path();
    let storage = Storage::open(&path).context("opening local database")?;
    let local = LocalBackend::new(storage, config.local.slot_key.clone(), default_fleet());
    if local.clear()? {
        println!("Removed '{}' from {}", local.slot_key(), path.display());
    } else {
        println!("Nothing stored under '{}'.", local.slot_key());
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Backend]");
                println!("  Kind:               {}", config.backend.kind);
                println!();
                println!("[Local]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Slot key:           {}", config.local.slot_key);
                match &config.local.seed_file {
                    Some(path) => println!("  Seed file:          {}", path.display()),
                    None => println!("  Seed file:          (built-in fleet)"),
                }
                println!();
                println!("[Remote]");
                println!("  Base URL:           {}", config.remote.base_url);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => anyhow::bail!("configuration error: {e}"),
            }
        }
    }
    Ok(())
}
