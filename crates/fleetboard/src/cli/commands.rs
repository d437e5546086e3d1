//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::aircraft::AircraftStatus;
use crate::view::FleetFilter;

/// Filter flags shared by commands that show the fleet.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Only tail numbers containing this text (case-insensitive)
    #[arg(short, long, default_value = "")]
    pub tail: String,

    /// Only models containing this text (case-insensitive)
    #[arg(short, long, default_value = "")]
    pub model: String,

    /// Only aircraft with this status
    #[arg(short, long, value_enum)]
    pub status: Option<StatusArg>,

    /// Only aircraft that are available
    #[arg(short, long)]
    pub ready_only: bool,
}

impl From<FilterArgs> for FleetFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            tail: args.tail,
            model: args.model,
            status: args.status.map(AircraftStatus::from),
            ready_only: args.ready_only,
        }
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Filter criteria
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Readiness command arguments.
#[derive(Debug, Args)]
pub struct ReadinessCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Set command arguments.
#[derive(Debug, Args)]
pub struct SetCommand {
    /// Tail number of the aircraft to update
    pub tail_number: String,

    /// New status
    #[arg(value_enum)]
    pub status: StatusArg,
}

/// Markers command arguments.
#[derive(Debug, Args)]
pub struct MarkersCommand {
    /// Output as JSON, including the default map view
    #[arg(short, long)]
    pub json: bool,
}

/// Reset command arguments.
#[derive(Debug, Args)]
pub struct ResetCommand {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
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

/// Status argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Ready for dispatch
    Available,
    /// Undergoing maintenance
    Maintenance,
    /// Aircraft on ground
    Aog,
}

impl From<StatusArg> for AircraftStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Available => Self::Available,
            StatusArg::Maintenance => Self::Maintenance,
            StatusArg::Aog => Self::Aog,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One card per aircraft
    #[default]
    Plain,
    /// Aligned table
    Table,
    /// JSON output
    Json,
}
