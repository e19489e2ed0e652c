//! Configuration management for paddock.
//!
//! Emission factors, operational assumptions and report settings are loaded
//! with figment from defaults, an optional TOML file and the environment.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name under the platform config dir.
const APP_DIR_NAME: &str = "paddock";

/// Default chart output directory, relative to the working directory.
const DEFAULT_CHART_DIR: &str = "paddock-charts";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `PADDOCK_`, sections split by `__`)
/// 2. TOML config file at `~/.config/paddock/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Emission factors per category.
    pub factors: EmissionFactors,
    /// Operational assumptions for a race weekend.
    pub operations: Operations,
    /// Baselines for real-world comparisons.
    pub comparisons: ComparisonBaselines,
    /// Reduction fractions for the sustainability scenarios.
    pub scenarios: ScenarioFactors,
    /// Net-zero target settings.
    pub net_zero: NetZeroConfig,
    /// Chart rendering settings.
    pub charts: ChartSettings,
}

/// Emission factors, in kg CO2 per unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionFactors {
    /// Air freight, per kg of freight per 1000 km.
    pub air_freight: f64,
    /// Sea freight, per kg of freight per 1000 km.
    pub sea_freight: f64,
    /// Road freight, per kg of freight per 1000 km.
    pub road_freight: f64,
    /// Per liter of race fuel burned.
    pub fuel_per_liter: f64,
    /// Per passenger km flown.
    pub passenger_flight_per_km: f64,
    /// Per race weekend for lighting and facilities.
    pub circuit_operations: f64,
    /// Per person per hotel night.
    pub hotel_night: f64,
}

/// Operational assumptions for every race weekend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Operations {
    /// Number of teams on the grid.
    pub teams: u32,
    /// Travelling personnel per team.
    pub personnel_per_team: u32,
    /// Freight per team in kg, cars and equipment included.
    pub freight_weight_per_team_kg: f64,
    /// Fuel per car per session in liters.
    pub fuel_per_car_per_session_l: f64,
    /// Cars taking part in each race.
    pub cars_per_race: u32,
    /// Running sessions per weekend (practice, qualifying, race).
    pub sessions_per_weekend: u32,
    /// Hotel nights per person per weekend.
    pub hotel_nights: u32,
    /// Multiplier for emissions from support series.
    pub support_series_factor: f64,
}

/// Baselines used to express emissions in everyday terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonBaselines {
    /// Annual emissions of an average home, kg CO2.
    pub average_home_annual_kg: f64,
    /// Passenger car emissions per km, kg CO2.
    pub passenger_car_per_km: f64,
    /// One transatlantic flight for one passenger, kg CO2.
    pub transatlantic_flight_per_passenger: f64,
}

/// Reduction fractions applied by the sustainability scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioFactors {
    /// Share of freight emissions removed by sustainable aviation fuel.
    pub sustainable_aviation_fuel: f64,
    /// Share of freight and travel emissions removed by a regional calendar.
    pub calendar_optimization: f64,
    /// Share of circuit emissions removed by renewable energy.
    pub renewable_energy: f64,
}

/// Net-zero target settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetZeroConfig {
    /// Year by which emissions should reach zero.
    pub target_year: i32,
    /// Season year shown in report headings.
    pub season_year: i32,
}

/// Chart rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Directory the SVG files are written to.
    /// Defaults to `./paddock-charts`
    pub output_dir: Option<PathBuf>,
    /// Width of the season breakdown figure in pixels.
    pub breakdown_width: u32,
    /// Height of the season breakdown figure in pixels.
    pub breakdown_height: u32,
    /// Width of the scenario figure in pixels.
    pub scenario_width: u32,
    /// Height of the scenario figure in pixels.
    pub scenario_height: u32,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            air_freight: 2.1,
            sea_freight: 0.015,
            road_freight: 0.1,
            fuel_per_liter: 2.31,
            passenger_flight_per_km: 0.255,
            circuit_operations: 500_000.0,
            hotel_night: 30.0,
        }
    }
}

impl Default for Operations {
    fn default() -> Self {
        Self {
            teams: 10,
            personnel_per_team: 80,
            freight_weight_per_team_kg: 15_000.0,
            fuel_per_car_per_session_l: 100.0,
            cars_per_race: 20,
            sessions_per_weekend: 3,
            hotel_nights: 3,
            support_series_factor: 1.3,
        }
    }
}

impl Default for ComparisonBaselines {
    fn default() -> Self {
        Self {
            average_home_annual_kg: 16_000.0,
            passenger_car_per_km: 0.192,
            transatlantic_flight_per_passenger: 1_600.0,
        }
    }
}

impl Default for ScenarioFactors {
    fn default() -> Self {
        Self {
            sustainable_aviation_fuel: 0.5,
            calendar_optimization: 0.2,
            renewable_energy: 0.8,
        }
    }
}

impl Default for NetZeroConfig {
    fn default() -> Self {
        Self {
            target_year: 2030,
            season_year: 2024,
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            output_dir: None,
            breakdown_width: 1400,
            breakdown_height: 900,
            scenario_width: 1000,
            scenario_height: 500,
        }
    }
}

impl Operations {
    /// Total freight shipped between races, kg.
    #[must_use]
    pub fn total_freight_kg(&self) -> f64 {
        f64::from(self.teams) * self.freight_weight_per_team_kg
    }

    /// Total travelling personnel.
    #[must_use]
    pub fn total_personnel(&self) -> f64 {
        f64::from(self.teams) * f64::from(self.personnel_per_team)
    }

    /// Fuel burned over a race weekend, liters.
    #[must_use]
    pub fn fuel_per_weekend_l(&self) -> f64 {
        self.fuel_per_car_per_session_l
            * f64::from(self.cars_per_race)
            * f64::from(self.sessions_per_weekend)
    }
}

impl Config {
    /// Load configuration, reading `config_path` or the default config file.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("PADDOCK_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let factors = [
            ("factors.air_freight", self.factors.air_freight),
            ("factors.sea_freight", self.factors.sea_freight),
            ("factors.road_freight", self.factors.road_freight),
            ("factors.fuel_per_liter", self.factors.fuel_per_liter),
            (
                "factors.passenger_flight_per_km",
                self.factors.passenger_flight_per_km,
            ),
            ("factors.circuit_operations", self.factors.circuit_operations),
            ("factors.hotel_night", self.factors.hotel_night),
            (
                "operations.freight_weight_per_team_kg",
                self.operations.freight_weight_per_team_kg,
            ),
            (
                "operations.fuel_per_car_per_session_l",
                self.operations.fuel_per_car_per_session_l,
            ),
        ];
        for (name, value) in factors {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::validation(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        // A factor below 1 would put the total under the category sum.
        let support = self.operations.support_series_factor;
        if support.is_nan() || support < 1.0 {
            return Err(Error::validation(format!(
                "operations.support_series_factor must be at least 1, got {support}"
            )));
        }

        let fractions = [
            (
                "scenarios.sustainable_aviation_fuel",
                self.scenarios.sustainable_aviation_fuel,
            ),
            (
                "scenarios.calendar_optimization",
                self.scenarios.calendar_optimization,
            ),
            ("scenarios.renewable_energy", self.scenarios.renewable_energy),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::validation(format!(
                    "{name} must be between 0 and 1, got {value}"
                )));
            }
        }

        let baselines = [
            (
                "comparisons.average_home_annual_kg",
                self.comparisons.average_home_annual_kg,
            ),
            (
                "comparisons.passenger_car_per_km",
                self.comparisons.passenger_car_per_km,
            ),
            (
                "comparisons.transatlantic_flight_per_passenger",
                self.comparisons.transatlantic_flight_per_passenger,
            ),
        ];
        for (name, value) in baselines {
            if value.is_nan() || value <= 0.0 {
                return Err(Error::validation(format!(
                    "{name} must be greater than 0, got {value}"
                )));
            }
        }

        if self.charts.breakdown_width == 0
            || self.charts.breakdown_height == 0
            || self.charts.scenario_width == 0
            || self.charts.scenario_height == 0
        {
            return Err(Error::validation("chart dimensions must be greater than 0"));
        }

        Ok(())
    }

    /// Get the chart output directory, resolving the default if not set.
    #[must_use]
    pub fn chart_dir(&self) -> PathBuf {
        self.charts
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CHART_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_factors() {
        let factors = EmissionFactors::default();

        assert!((factors.air_freight - 2.1).abs() < f64::EPSILON);
        assert!((factors.sea_freight - 0.015).abs() < f64::EPSILON);
        assert!((factors.road_freight - 0.1).abs() < f64::EPSILON);
        assert!((factors.fuel_per_liter - 2.31).abs() < f64::EPSILON);
        assert!((factors.passenger_flight_per_km - 0.255).abs() < f64::EPSILON);
        assert!((factors.circuit_operations - 500_000.0).abs() < f64::EPSILON);
        assert!((factors.hotel_night - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_operations() {
        let ops = Operations::default();

        assert_eq!(ops.teams, 10);
        assert_eq!(ops.personnel_per_team, 80);
        assert_eq!(ops.cars_per_race, 20);
        assert_eq!(ops.sessions_per_weekend, 3);
        assert_eq!(ops.hotel_nights, 3);
        assert!((ops.support_series_factor - 1.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_operations_derived_quantities() {
        let ops = Operations::default();

        assert!((ops.total_freight_kg() - 150_000.0).abs() < f64::EPSILON);
        assert!((ops.total_personnel() - 800.0).abs() < f64::EPSILON);
        assert!((ops.fuel_per_weekend_l() - 6_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_net_zero() {
        let net_zero = NetZeroConfig::default();
        assert_eq!(net_zero.target_year, 2030);
        assert_eq!(net_zero.season_year, 2024);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_negative_factor() {
        let mut config = Config::default();
        config.factors.sea_freight = -0.1;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("factors.sea_freight"));
    }

    #[test]
    fn test_validate_nan_factor() {
        let mut config = Config::default();
        config.factors.hotel_night = f64::NAN;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("factors.hotel_night"));
    }

    #[test]
    fn test_validate_support_factor_below_one() {
        let mut config = Config::default();
        config.operations.support_series_factor = 0.9;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("support_series_factor"));
    }

    #[test]
    fn test_validate_scenario_fraction_out_of_range() {
        let mut config = Config::default();
        config.scenarios.renewable_energy = 1.5;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("scenarios.renewable_energy"));
    }

    #[test]
    fn test_validate_zero_comparison_baseline() {
        let mut config = Config::default();
        config.comparisons.passenger_car_per_km = 0.0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("passenger_car_per_km"));
    }

    #[test]
    fn test_validate_zero_chart_dimension() {
        let mut config = Config::default();
        config.charts.scenario_height = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("chart dimensions"));
    }

    #[test]
    fn test_chart_dir_default() {
        let config = Config::default();
        assert_eq!(config.chart_dir(), PathBuf::from("paddock-charts"));
    }

    #[test]
    fn test_chart_dir_custom() {
        let mut config = Config::default();
        config.charts.output_dir = Some(PathBuf::from("/tmp/season"));
        assert_eq!(config.chart_dir(), PathBuf::from("/tmp/season"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("paddock"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    fn load(path: &str) -> Result<Config> {
        Config::load_from(Some(PathBuf::from(path)))
    }

    #[test]
    fn test_load_nonexistent_config() {
        figment::Jail::expect_with(|_jail| {
            // A missing file falls back to defaults
            let config = load("missing.toml").map_err(|e| e.to_string())?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                "[operations]\nteams = 11\n\n[net_zero]\ntarget_year = 2035\n",
            )?;

            let config = load("config.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.operations.teams, 11);
            assert_eq!(config.operations.personnel_per_team, 80);
            assert_eq!(config.net_zero.target_year, 2035);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                "[operations]\nteams = 11\n\n[net_zero]\ntarget_year = 2035\n",
            )?;
            jail.set_env("PADDOCK_OPERATIONS__TEAMS", "12");
            jail.set_env("PADDOCK_NET_ZERO__TARGET_YEAR", "2040");

            let config = load("config.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.operations.teams, 12);
            assert_eq!(config.net_zero.target_year, 2040);
            // Keys absent from both layers keep their defaults
            assert_eq!(config.operations.personnel_per_team, 80);
            Ok(())
        });
    }

    #[test]
    fn test_env_override_is_validated() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PADDOCK_SCENARIOS__RENEWABLE_ENERGY", "1.5");

            let result = load("missing.toml");
            assert!(matches!(result, Err(Error::ConfigValidation { .. })));
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_toml_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[scenarios]\ncalendar_optimization = 2.0\n")?;

            let result = load("config.toml");
            assert!(matches!(result, Err(Error::ConfigValidation { .. })));
            Ok(())
        });
    }

    #[test]
    fn test_config_serialize() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("support_series_factor"));
        assert!(json.contains("air_freight"));
    }

    #[test]
    fn test_operations_deserialize_partial() {
        let json = r#"{"teams": 12, "hotel_nights": 4}"#;
        let ops: Operations = serde_json::from_str(json).unwrap();
        assert_eq!(ops.teams, 12);
        assert_eq!(ops.hotel_nights, 4);
        assert_eq!(ops.cars_per_race, 20);
    }
}
