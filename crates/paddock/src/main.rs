//! `paddock` - CLI for the racing season carbon footprint tracker
//!
//! This binary prints the season report, the per-race breakdown, the
//! reduction scenarios and the net-zero tracker, and renders the charts.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use paddock::calendar::{Calendar, FreightMode};
use paddock::cli::{
    ChartsCommand, Cli, Command, ConfigCommand, NetZeroCommand, OutputFormat, RacesCommand,
    ReportCommand,
};
use paddock::emissions::{EmissionsModel, RaceEmissions};
use paddock::{charts, net_zero, report};
use paddock::{init_logging, Config, NetZeroProgress, ScenarioSet, SeasonReport};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let calendar = Calendar::season_2024();
    match cli.command {
        Command::Report(cmd) => handle_report(&load_config(cli.config)?, &calendar, &cmd),
        Command::Races(cmd) => handle_races(&load_config(cli.config)?, &calendar, &cmd),
        Command::Scenarios(cmd) => handle_scenarios(&load_config(cli.config)?, &calendar, cmd.json),
        Command::NetZero(cmd) => handle_net_zero(&load_config(cli.config)?, &calendar, &cmd),
        Command::Charts(cmd) => handle_charts(&load_config(cli.config)?, &calendar, &cmd),
        Command::Config(cmd) => handle_config(cli.config, cmd),
    }
}

fn load_config(config_path: Option<PathBuf>) -> anyhow::Result<Config> {
    Config::load_from(config_path).context("failed to load configuration")
}

fn handle_report(config: &Config, calendar: &Calendar, cmd: &ReportCommand) -> anyhow::Result<()> {
    let current_year = cmd.current_year.unwrap_or_else(net_zero::current_year);
    let season_report = SeasonReport::build(config, calendar, current_year)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&season_report)?);
    } else {
        print!("{}", season_report.render_text());
    }

    if cmd.charts {
        let out_dir = cmd.out_dir.clone().unwrap_or_else(|| config.chart_dir());
        write_charts(config, &season_report, &out_dir)?;
    }
    Ok(())
}

fn handle_races(config: &Config, calendar: &Calendar, cmd: &RacesCommand) -> anyhow::Result<()> {
    let model = EmissionsModel::from_config(config);
    let races: Vec<RaceEmissions> = match cmd.mode.map(FreightMode::from) {
        Some(mode) => calendar
            .races_by_mode(mode)
            .map(|race| model.race_emissions(race))
            .collect(),
        None => model.season_emissions(calendar).races().to_vec(),
    };

    match cmd.format {
        OutputFormat::Plain => print!("{}", report::render_races_plain(&races)),
        OutputFormat::Table => {
            print!("{}", report::render_races_table(&races));
            let total: f64 = races.iter().map(|race| race.total).sum();
            println!();
            println!(
                "{} races, {:.1} tonnes CO2",
                races.len(),
                report::tonnes(total)
            );
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&races)?),
    }
    Ok(())
}

fn handle_scenarios(config: &Config, calendar: &Calendar, json: bool) -> anyhow::Result<()> {
    let season = EmissionsModel::from_config(config).season_emissions(calendar);
    let scenarios = ScenarioSet::simulate(&season, &config.scenarios)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&scenarios)?);
    } else {
        print!(
            "{}",
            report::render_scenarios(&scenarios, config.net_zero.target_year)
        );
    }
    Ok(())
}

fn handle_net_zero(
    config: &Config,
    calendar: &Calendar,
    cmd: &NetZeroCommand,
) -> anyhow::Result<()> {
    let season = EmissionsModel::from_config(config).season_emissions(calendar);
    let target_year = cmd.target_year.unwrap_or(config.net_zero.target_year);
    let current_year = cmd.current_year.unwrap_or_else(net_zero::current_year);
    let progress = NetZeroProgress::compute(season.total(), target_year, current_year)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&progress)?);
    } else {
        print!("{}", report::render_net_zero(&progress));
        if progress.is_overdue() {
            println!("Target year {target_year} has been reached without getting to zero.");
        }
    }
    Ok(())
}

fn handle_charts(config: &Config, calendar: &Calendar, cmd: &ChartsCommand) -> anyhow::Result<()> {
    let season_report = SeasonReport::build(config, calendar, net_zero::current_year())?;
    let out_dir = cmd.out_dir.clone().unwrap_or_else(|| config.chart_dir());
    write_charts(config, &season_report, &out_dir)
}

fn write_charts(
    config: &Config,
    season_report: &SeasonReport,
    out_dir: &std::path::Path,
) -> anyhow::Result<()> {
    let written = charts::render_all(season_report, out_dir, &config.charts)
        .with_context(|| format!("failed to render charts into {}", out_dir.display()))?;
    info!(count = written.len(), "Charts rendered");
    for path in written {
        println!("Chart saved: {}", path.display());
    }
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = load_config(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print_config(&config);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path)).context("configuration is invalid")?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}

fn print_config(config: &Config) {
    println!("Current Configuration");
    println!("=====================");
    println!();
    println!("[Factors] (kg CO2)");
    println!("  Air freight:          {}", config.factors.air_freight);
    println!("  Sea freight:          {}", config.factors.sea_freight);
    println!("  Road freight:         {}", config.factors.road_freight);
    println!("  Fuel per liter:       {}", config.factors.fuel_per_liter);
    println!(
        "  Flight per km:        {}",
        config.factors.passenger_flight_per_km
    );
    println!("  Circuit operations:   {}", config.factors.circuit_operations);
    println!("  Hotel night:          {}", config.factors.hotel_night);
    println!();
    println!("[Operations]");
    println!("  Teams:                {}", config.operations.teams);
    println!(
        "  Personnel per team:   {}",
        config.operations.personnel_per_team
    );
    println!(
        "  Freight per team kg:  {}",
        config.operations.freight_weight_per_team_kg
    );
    println!("  Cars per race:        {}", config.operations.cars_per_race);
    println!(
        "  Support series:       x{}",
        config.operations.support_series_factor
    );
    println!();
    println!("[Scenarios]");
    println!(
        "  Sustainable fuel:     {}",
        config.scenarios.sustainable_aviation_fuel
    );
    println!(
        "  Calendar:             {}",
        config.scenarios.calendar_optimization
    );
    println!(
        "  Renewable energy:     {}",
        config.scenarios.renewable_energy
    );
    println!();
    println!("[Net Zero]");
    println!("  Target year:          {}", config.net_zero.target_year);
    println!("  Season year:          {}", config.net_zero.season_year);
    println!();
    println!("[Charts]");
    println!("  Output dir:           {}", config.chart_dir().display());
}
