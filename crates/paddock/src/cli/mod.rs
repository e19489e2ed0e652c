//! Command-line interface for paddock.
//!
//! This module provides the CLI structure for the `paddock` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ChartsCommand, ConfigCommand, FreightModeArg, NetZeroCommand, OutputFormat, RacesCommand,
    ReportCommand, ScenariosCommand,
};

/// paddock - Carbon footprint of a racing season
///
/// Estimates season emissions from freight, travel, fuel, circuit operations
/// and lodging, and shows what it would take to reach net zero.
#[derive(Debug, Parser)]
#[command(name = "paddock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
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
    /// Print the full season report
    Report(ReportCommand),

    /// Show the per-race breakdown
    Races(RacesCommand),

    /// Show the sustainability scenarios
    Scenarios(ScenariosCommand),

    /// Show progress towards the net-zero target
    NetZero(NetZeroCommand),

    /// Render the season charts as SVG
    Charts(ChartsCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Scenarios(ScenariosCommand { json: false }),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "paddock");
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_report() {
        let args = vec!["paddock", "report", "--charts", "-o", "/tmp/out"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Report(cmd) => {
                assert!(cmd.charts);
                assert!(!cmd.json);
                assert_eq!(cmd.out_dir, Some(PathBuf::from("/tmp/out")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_races_with_mode() {
        let args = vec!["paddock", "races", "--mode", "air", "--format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Races(cmd) => {
                assert_eq!(cmd.mode, Some(FreightModeArg::Air));
                assert_eq!(cmd.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_races_defaults_to_table() {
        let cli = Cli::try_parse_from(vec!["paddock", "races"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Races(RacesCommand {
                mode: None,
                format: OutputFormat::Table
            })
        ));
    }

    #[test]
    fn test_parse_net_zero() {
        let args = vec![
            "paddock",
            "net-zero",
            "--target-year",
            "2040",
            "--current-year",
            "2026",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::NetZero(cmd) => {
                assert_eq!(cmd.target_year, Some(2040));
                assert_eq!(cmd.current_year, Some(2026));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_config_validate() {
        let args = vec!["paddock", "config", "validate", "-f", "/custom/config.toml"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }

    #[test]
    fn test_parse_with_global_flags() {
        let args = vec!["paddock", "-c", "/custom/config.toml", "-v", "charts"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.verbose, 1);
        assert!(matches!(cli.command, Command::Charts(_)));
    }

    #[test]
    fn test_parse_rejects_unknown_mode() {
        let args = vec!["paddock", "races", "--mode", "rail"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
