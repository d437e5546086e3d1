//! Command-line interface for fleetboard.
//!
//! This module provides the CLI structure for the `fleetboard` binary and the
//! interactive dashboard session.

mod commands;
pub mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, FilterArgs, ListCommand, MarkersCommand, OutputFormat, ReadinessCommand,
    ResetCommand, SetCommand, StatusArg,
};

/// fleetboard - Fleet status at a glance
///
/// Shows every aircraft with its model, location and status, counts how many
/// are ready, and lets maintenance staff change a status from the terminal.
#[derive(Debug, Parser)]
#[command(name = "fleetboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
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
    /// Show the fleet, optionally filtered
    List(ListCommand),

    /// Show how many aircraft are ready
    Readiness(ReadinessCommand),

    /// Change an aircraft's status
    Set(SetCommand),

    /// Print map markers for the fleet
    Markers(MarkersCommand),

    /// Open an interactive dashboard session
    Shell,

    /// Discard the locally stored fleet
    Reset(ResetCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Verbosity;
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Readiness(ReadinessCommand { json: false }),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "fleetboard");
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(3, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_defaults() {
        let cli = Cli::try_parse_from(["fleetboard", "list"]).unwrap();
        let Command::List(cmd) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(cmd.format, OutputFormat::Table);
        assert!(cmd.filter.tail.is_empty());
        assert!(cmd.filter.status.is_none());
        assert!(!cmd.filter.ready_only);
    }

    #[test]
    fn test_parse_list_filters() {
        let args = [
            "fleetboard", "list", "-t", "tn2", "--model", "airbus", "-s", "maintenance", "-r",
            "-f", "json",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::List(cmd) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(cmd.filter.tail, "tn2");
        assert_eq!(cmd.filter.model, "airbus");
        assert_eq!(cmd.filter.status, Some(StatusArg::Maintenance));
        assert!(cmd.filter.ready_only);
        assert_eq!(cmd.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_set() {
        let cli = Cli::try_parse_from(["fleetboard", "set", "TN3", "available"]).unwrap();
        let Command::Set(cmd) = cli.command else {
            panic!("expected set");
        };
        assert_eq!(cmd.tail_number, "TN3");
        assert_eq!(cmd.status, StatusArg::Available);
    }

    #[test]
    fn test_parse_set_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["fleetboard", "set", "TN3", "parked"]).is_err());
    }

    #[test]
    fn test_parse_shell_and_reset() {
        let cli = Cli::try_parse_from(["fleetboard", "shell"]).unwrap();
        assert!(matches!(cli.command, Command::Shell));

        let cli = Cli::try_parse_from(["fleetboard", "reset", "--yes"]).unwrap();
        assert!(matches!(cli.command, Command::Reset(ResetCommand { yes: true })));
    }

    #[test]
    fn test_parse_config_show() {
        let cli = Cli::try_parse_from(["fleetboard", "config", "show", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Show { json: true })
        ));
    }

    #[test]
    fn test_parse_with_global_flags() {
        let args = ["fleetboard", "-c", "/custom/config.toml", "-v", "readiness"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.verbose, 1);

        let cli = Cli::try_parse_from(["fleetboard", "markers", "-q"]).unwrap();
        assert!(cli.quiet);
    }
}
