//! Progress tracking towards a net-zero target year.

use chrono::Datelike;
use serde::Serialize;

use crate::error::{Error, Result};

/// What it takes to reach zero emissions by the target year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetZeroProgress {
    /// Current annual emissions, kg CO2.
    pub current_emissions: f64,
    /// Year emissions should reach zero.
    pub target_year: i32,
    /// Year the progress is measured from.
    pub current_year: i32,
    /// Years left until the target; zero or negative once it has passed.
    pub years_remaining: i32,
    /// Emissions to cut every year, kg CO2.
    pub required_annual_reduction: f64,
    /// Annual cut as a percentage of current emissions.
    pub required_annual_rate: f64,
}

impl NetZeroProgress {
    /// Compute the required straight-line reduction.
    ///
    /// With no years left the whole of the current emissions must go at once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroBaseline`] if `current_emissions` is not positive,
    /// or a validation error if the years are too far apart to count.
    pub fn compute(current_emissions: f64, target_year: i32, current_year: i32) -> Result<Self> {
        if current_emissions <= 0.0 {
            return Err(Error::ZeroBaseline {
                quantity: "net-zero reduction rate",
            });
        }

        let years_remaining = target_year.checked_sub(current_year).ok_or_else(|| {
            Error::validation(format!(
                "years between {current_year} and target year {target_year} are out of range"
            ))
        })?;
        let required_annual_reduction = if years_remaining > 0 {
            current_emissions / f64::from(years_remaining)
        } else {
            current_emissions
        };

        Ok(Self {
            current_emissions,
            target_year,
            current_year,
            years_remaining,
            required_annual_reduction,
            required_annual_rate: required_annual_reduction / current_emissions * 100.0,
        })
    }

    /// Whether the target year has already been reached.
    #[must_use]
    pub fn is_overdue(&self) -> bool {
        self.years_remaining <= 0
    }
}

/// The current calendar year from the local clock.
#[must_use]
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_line_reduction() {
        let progress = NetZeroProgress::compute(80_000_000.0, 2030, 2026).unwrap();
        assert_eq!(progress.years_remaining, 4);
        assert!((progress.required_annual_reduction - 20_000_000.0).abs() < 1e-6);
        assert!((progress.required_annual_rate - 25.0).abs() < 1e-9);
        assert!(!progress.is_overdue());
    }

    #[test]
    fn test_target_year_reached() {
        let progress = NetZeroProgress::compute(1_000.0, 2030, 2030).unwrap();
        assert_eq!(progress.years_remaining, 0);
        assert!((progress.required_annual_reduction - 1_000.0).abs() < f64::EPSILON);
        assert!((progress.required_annual_rate - 100.0).abs() < f64::EPSILON);
        assert!(progress.is_overdue());
    }

    #[test]
    fn test_target_year_passed() {
        let progress = NetZeroProgress::compute(1_000.0, 2030, 2033).unwrap();
        assert_eq!(progress.years_remaining, -3);
        assert!((progress.required_annual_rate - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_emissions_rejected() {
        let err = NetZeroProgress::compute(0.0, 2030, 2026).unwrap_err();
        assert!(err.is_zero_baseline());
    }

    #[test]
    fn test_extreme_years_rejected() {
        let err = NetZeroProgress::compute(1.0, i32::MAX, i32::MIN).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));

        let err = NetZeroProgress::compute(1_000.0, i32::MAX, -1).unwrap_err();
        assert!(err.to_string().contains("out of range"));

        let progress = NetZeroProgress::compute(1_000.0, i32::MIN, 0).unwrap();
        assert_eq!(progress.years_remaining, i32::MIN);
        assert!(progress.is_overdue());
    }

    #[test]
    fn test_current_year_is_plausible() {
        assert!(current_year() >= 2024);
    }
}
