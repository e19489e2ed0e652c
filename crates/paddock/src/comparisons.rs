//! Everyday equivalents for a quantity of CO2.

use serde::Serialize;

use crate::config::ComparisonBaselines;

/// A season total expressed in relatable terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparisons {
    /// Homes whose annual emissions add up to the total.
    pub homes_powered_annually: f64,
    /// Kilometres driven by an average passenger car.
    pub car_driving_km: f64,
    /// One-passenger transatlantic flights.
    pub transatlantic_flights: f64,
}

impl Comparisons {
    /// Express `total_kg` against the given baselines.
    ///
    /// Baselines are validated to be positive when the configuration loads.
    #[must_use]
    pub fn from_total(total_kg: f64, baselines: &ComparisonBaselines) -> Self {
        Self {
            homes_powered_annually: total_kg / baselines.average_home_annual_kg,
            car_driving_km: total_kg / baselines.passenger_car_per_km,
            transatlantic_flights: total_kg / baselines.transatlantic_flight_per_passenger,
        }
    }
}
