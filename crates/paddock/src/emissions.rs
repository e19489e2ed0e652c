//! Per-race emissions calculation.
//!
//! Every race weekend is broken down into five emission categories. The race
//! total is the category sum scaled by the support-series factor.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{Calendar, FreightMode, Race};
use crate::config::{Config, EmissionFactors, Operations};
use crate::season::SeasonEmissions;

/// Emission category of a race weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Shipping cars and equipment between venues.
    Freight,
    /// Flying team personnel between venues.
    PersonnelTravel,
    /// Race fuel burned on track.
    Fuel,
    /// Lighting and facilities at the circuit.
    CircuitOperations,
    /// Hotel nights for team personnel.
    Accommodation,
}

impl Category {
    /// All categories, in report order.
    pub const ALL: [Category; 5] = [
        Self::Freight,
        Self::PersonnelTravel,
        Self::Fuel,
        Self::CircuitOperations,
        Self::Accommodation,
    ];

    /// Human-readable label used in reports and charts.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Freight => "Freight Transport",
            Self::PersonnelTravel => "Personnel Travel",
            Self::Fuel => "Fuel Consumption",
            Self::CircuitOperations => "Circuit Operations",
            Self::Accommodation => "Accommodation",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Freight => write!(f, "freight"),
            Self::PersonnelTravel => write!(f, "personnel_travel"),
            Self::Fuel => write!(f, "fuel"),
            Self::CircuitOperations => write!(f, "circuit_operations"),
            Self::Accommodation => write!(f, "accommodation"),
        }
    }
}

/// Emissions per category, kg CO2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// Freight transport.
    pub freight: f64,
    /// Personnel travel.
    pub personnel_travel: f64,
    /// Fuel consumption.
    pub fuel: f64,
    /// Circuit operations.
    pub circuit_operations: f64,
    /// Accommodation.
    pub accommodation: f64,
}

impl CategoryBreakdown {
    /// Value for a single category.
    #[must_use]
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Freight => self.freight,
            Category::PersonnelTravel => self.personnel_travel,
            Category::Fuel => self.fuel,
            Category::CircuitOperations => self.circuit_operations,
            Category::Accommodation => self.accommodation,
        }
    }

    /// Sum of all categories, before the support-series factor.
    #[must_use]
    pub fn sum(&self) -> f64 {
        Category::ALL.iter().map(|&c| self.get(c)).sum()
    }

    /// Freight plus personnel travel.
    #[must_use]
    pub fn logistics(&self) -> f64 {
        self.freight + self.personnel_travel
    }

    /// Iterate over `(category, value)` pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.iter().map(move |&c| (c, self.get(c)))
    }
}

impl std::ops::Add for CategoryBreakdown {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            freight: self.freight + rhs.freight,
            personnel_travel: self.personnel_travel + rhs.personnel_travel,
            fuel: self.fuel + rhs.fuel,
            circuit_operations: self.circuit_operations + rhs.circuit_operations,
            accommodation: self.accommodation + rhs.accommodation,
        }
    }
}

impl std::iter::Sum for CategoryBreakdown {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, b| acc + b)
    }
}

/// Emissions of one race weekend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceEmissions {
    /// Position on the calendar.
    pub round: usize,
    /// Event name.
    pub race: String,
    /// Host city.
    pub location: String,
    /// Travel distance from the previous event, km.
    pub distance_km: f64,
    /// How the freight travelled.
    pub freight_mode: FreightMode,
    /// Per-category emissions, kg CO2.
    pub breakdown: CategoryBreakdown,
    /// Category sum scaled by the support-series factor, kg CO2.
    pub total: f64,
}

/// Applies emission factors and operational assumptions to races.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionsModel {
    factors: EmissionFactors,
    operations: Operations,
}

impl EmissionsModel {
    /// Create a model from explicit factors and operations.
    #[must_use]
    pub fn new(factors: EmissionFactors, operations: Operations) -> Self {
        Self {
            factors,
            operations,
        }
    }

    /// Create a model from the loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.factors, config.operations)
    }

    /// Calculate the emissions of a single race weekend.
    #[must_use]
    pub fn race_emissions(&self, race: &Race) -> RaceEmissions {
        let distance = race.distance_from_previous_km;
        let ops = &self.operations;
        let factors = &self.factors;

        // Freight factors are quoted per 1000 km.
        let freight =
            ops.total_freight_kg() * distance * race.freight_mode.factor(factors) / 1000.0;
        let personnel_travel = ops.total_personnel() * distance * factors.passenger_flight_per_km;
        let fuel = ops.fuel_per_weekend_l() * factors.fuel_per_liter;
        let accommodation =
            ops.total_personnel() * f64::from(ops.hotel_nights) * factors.hotel_night;

        let breakdown = CategoryBreakdown {
            freight,
            personnel_travel,
            fuel,
            circuit_operations: factors.circuit_operations,
            accommodation,
        };
        let total = breakdown.sum() * ops.support_series_factor;

        debug!(
            round = race.round,
            race = %race.name,
            mode = %race.freight_mode,
            total_kg = total,
            "Calculated race emissions"
        );

        RaceEmissions {
            round: race.round,
            race: race.name.clone(),
            location: race.location.clone(),
            distance_km: distance,
            freight_mode: race.freight_mode,
            breakdown,
            total,
        }
    }

    /// Calculate the emissions of every race on the calendar.
    #[must_use]
    pub fn season_emissions(&self, calendar: &Calendar) -> SeasonEmissions {
        let races = calendar.iter().map(|r| self.race_emissions(r)).collect();
        SeasonEmissions::new(races)
    }
}

impl Default for EmissionsModel {
    fn default() -> Self {
        Self::new(EmissionFactors::default(), Operations::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-6;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < TOLERANCE,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_fixed_weekend_costs() {
        let model = EmissionsModel::default();
        let race = Race::new(1, "Bahrain GP", "Manama", 0.0, FreightMode::Sea);
        let result = model.race_emissions(&race);

        assert_close(result.breakdown.freight, 0.0);
        assert_close(result.breakdown.personnel_travel, 0.0);
        assert_close(result.breakdown.fuel, 13_860.0);
        assert_close(result.breakdown.circuit_operations, 500_000.0);
        assert_close(result.breakdown.accommodation, 72_000.0);
        assert_close(result.total, 761_618.0);
    }

    #[test]
    fn test_long_haul_air_leg() {
        let model = EmissionsModel::default();
        let race = Race::new(6, "Miami GP", "Miami", 17_000.0, FreightMode::Air);
        let result = model.race_emissions(&race);

        // 150 000 kg * 17 000 km * 2.1 / 1000
        assert_close(result.breakdown.freight, 5_355_000.0);
        // 800 people * 17 000 km * 0.255
        assert_close(result.breakdown.personnel_travel, 3_468_000.0);
        assert_close(result.total, 12_231_518.0);
    }

    #[test]
    fn test_freight_mode_selects_factor() {
        let model = EmissionsModel::default();
        let freight = |mode| {
            model
                .race_emissions(&Race::new(1, "Test", "Nowhere", 1_000.0, mode))
                .breakdown
                .freight
        };

        assert_close(freight(FreightMode::Air), 315_000.0);
        assert_close(freight(FreightMode::Sea), 2_250.0);
        assert_close(freight(FreightMode::Road), 15_000.0);
    }

    #[test]
    fn test_total_is_scaled_category_sum() {
        let model = EmissionsModel::default();
        for race in Calendar::season_2024().iter() {
            let result = model.race_emissions(race);
            let sum = result.breakdown.sum();
            assert!(result.total >= sum);
            assert_close(result.total, sum * 1.3);
            for (_, value) in result.breakdown.iter() {
                assert!(value >= 0.0);
            }
        }
    }

    #[test]
    fn test_unit_support_factor_total_equals_sum() {
        let operations = Operations {
            support_series_factor: 1.0,
            ..Operations::default()
        };
        let model = EmissionsModel::new(EmissionFactors::default(), operations);
        let race = Race::new(2, "Saudi Arabian GP", "Jeddah", 450.0, FreightMode::Road);
        let result = model.race_emissions(&race);
        assert_close(result.total, result.breakdown.sum());
    }

    #[test]
    fn test_race_identity_is_carried() {
        let model = EmissionsModel::default();
        let race = Race::new(15, "Dutch GP", "Zandvoort", 300.0, FreightMode::Road);
        let result = model.race_emissions(&race);
        assert_eq!(result.round, 15);
        assert_eq!(result.race, "Dutch GP");
        assert_eq!(result.location, "Zandvoort");
        assert_eq!(result.freight_mode, FreightMode::Road);
    }

    #[test]
    fn test_breakdown_sum_and_add() {
        let a = CategoryBreakdown {
            freight: 1.0,
            personnel_travel: 2.0,
            fuel: 3.0,
            circuit_operations: 4.0,
            accommodation: 5.0,
        };
        assert_close(a.sum(), 15.0);
        assert_close(a.logistics(), 3.0);

        let total: CategoryBreakdown = vec![a, a].into_iter().sum();
        assert_close(total.sum(), 30.0);
        assert_close(total.get(Category::CircuitOperations), 8.0);
    }

    #[test]
    fn test_category_labels() {
        let labels: Vec<_> = Category::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Freight Transport",
                "Personnel Travel",
                "Fuel Consumption",
                "Circuit Operations",
                "Accommodation"
            ]
        );
    }

    #[test]
    fn test_category_display_matches_serde() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{category}\""));
        }
    }
}
