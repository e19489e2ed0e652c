//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Report command arguments.
#[derive(Debug, Args)]
pub struct ReportCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Also render the SVG charts
    #[arg(long)]
    pub charts: bool,

    /// Directory for the charts (overrides configuration)
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Year to measure net-zero progress from (defaults to this year)
    #[arg(long, value_name = "YEAR")]
    pub current_year: Option<i32>,
}

/// Races command arguments.
#[derive(Debug, Args)]
pub struct RacesCommand {
    /// Only show races whose freight travels by this mode
    #[arg(short, long, value_enum)]
    pub mode: Option<FreightModeArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Scenarios command arguments.
#[derive(Debug, Args)]
pub struct ScenariosCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Net-zero command arguments.
#[derive(Debug, Args)]
pub struct NetZeroCommand {
    /// Target year (overrides configuration)
    #[arg(short, long, value_name = "YEAR")]
    pub target_year: Option<i32>,

    /// Year to measure progress from (defaults to this year)
    #[arg(long, value_name = "YEAR")]
    pub current_year: Option<i32>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Charts command arguments.
#[derive(Debug, Args)]
pub struct ChartsCommand {
    /// Directory for the charts (overrides configuration)
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
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

/// Freight mode argument for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FreightModeArg {
    /// Air freight
    Air,
    /// Sea freight
    Sea,
    /// Road freight
    Road,
}

impl From<FreightModeArg> for crate::calendar::FreightMode {
    fn from(arg: FreightModeArg) -> Self {
        match arg {
            FreightModeArg::Air => Self::Air,
            FreightModeArg::Sea => Self::Sea,
            FreightModeArg::Road => Self::Road,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
