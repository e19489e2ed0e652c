//! What-if sustainability scenarios.
//!
//! Each scenario removes a fixed fraction of one or more season category
//! sums. The combined scenario stacks the three independent ones.

use serde::Serialize;

use crate::config::ScenarioFactors;
use crate::error::{Error, Result};
use crate::season::SeasonEmissions;

/// A reduction scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Sustainable aviation fuel cuts freight emissions.
    SustainableAviationFuel,
    /// A regional calendar cuts freight and personnel travel.
    CalendarOptimization,
    /// Renewable energy at circuits cuts operations emissions.
    RenewableEnergy,
    /// All of the above together.
    CombinedApproach,
}

impl ScenarioKind {
    /// All scenarios, in report order.
    pub const ALL: [ScenarioKind; 4] = [
        Self::SustainableAviationFuel,
        Self::CalendarOptimization,
        Self::RenewableEnergy,
        Self::CombinedApproach,
    ];

    /// Title-cased name used in reports and charts.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::SustainableAviationFuel => "Sustainable Aviation Fuel",
            Self::CalendarOptimization => "Calendar Optimization",
            Self::RenewableEnergy => "Renewable Energy",
            Self::CombinedApproach => "Combined Approach",
        }
    }

    /// Whether this scenario is built from the others.
    #[must_use]
    pub fn is_combined(self) -> bool {
        matches!(self, Self::CombinedApproach)
    }
}

impl std::fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SustainableAviationFuel => write!(f, "sustainable_aviation_fuel"),
            Self::CalendarOptimization => write!(f, "calendar_optimization"),
            Self::RenewableEnergy => write!(f, "renewable_energy"),
            Self::CombinedApproach => write!(f, "combined_approach"),
        }
    }
}

/// Outcome of one scenario against the season baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scenario {
    /// Which scenario this is.
    pub kind: ScenarioKind,
    /// Emissions avoided, kg CO2.
    pub reduction: f64,
    /// Season total after the reduction, kg CO2.
    pub new_total: f64,
    /// Reduction as a percentage of the baseline.
    pub percentage_reduction: f64,
}

impl Scenario {
    fn new(kind: ScenarioKind, reduction: f64, base_total: f64) -> Self {
        Self {
            kind,
            reduction,
            new_total: base_total - reduction,
            percentage_reduction: reduction / base_total * 100.0,
        }
    }
}

/// All scenarios for one season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSet {
    /// Season total the reductions are measured against, kg CO2.
    pub base_total: f64,
    /// Scenarios in report order.
    pub scenarios: Vec<Scenario>,
}

impl ScenarioSet {
    /// Run every scenario against the season.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroBaseline`] if the season total is not positive.
    pub fn simulate(season: &SeasonEmissions, factors: &ScenarioFactors) -> Result<Self> {
        let base_total = season.total();
        if base_total <= 0.0 {
            return Err(Error::ZeroBaseline {
                quantity: "scenario reductions",
            });
        }

        let categories = season.category_totals();
        let saf = categories.freight * factors.sustainable_aviation_fuel;
        let calendar = categories.logistics() * factors.calendar_optimization;
        let renewable = categories.circuit_operations * factors.renewable_energy;
        let combined = saf + calendar + renewable;

        let scenarios = [saf, calendar, renewable, combined]
            .into_iter()
            .zip(ScenarioKind::ALL)
            .map(|(reduction, kind)| Scenario::new(kind, reduction, base_total))
            .collect();

        Ok(Self {
            base_total,
            scenarios,
        })
    }

    /// Look up a scenario by kind.
    #[must_use]
    pub fn get(&self, kind: ScenarioKind) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.kind == kind)
    }

    /// Iterate over scenarios in report order.
    pub fn iter(&self) -> std::slice::Iter<'_, Scenario> {
        self.scenarios.iter()
    }

    /// The independent scenario with the largest reduction.
    #[must_use]
    pub fn largest_single(&self) -> Option<&Scenario> {
        self.scenarios
            .iter()
            .filter(|s| !s.kind.is_combined())
            .reduce(|best, s| if s.reduction > best.reduction { s } else { best })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Calendar;
    use crate::emissions::EmissionsModel;

    fn default_set() -> ScenarioSet {
        let season = EmissionsModel::default().season_emissions(&Calendar::season_2024());
        ScenarioSet::simulate(&season, &ScenarioFactors::default()).unwrap()
    }

    fn reduction(set: &ScenarioSet, kind: ScenarioKind) -> f64 {
        set.get(kind).unwrap().reduction
    }

    #[test]
    fn test_default_reductions() {
        let set = default_set();

        let saf = reduction(&set, ScenarioKind::SustainableAviationFuel);
        assert!((saf - 13_943_437.5).abs() < 1e-4);
        let calendar = reduction(&set, ScenarioKind::CalendarOptimization);
        assert!((calendar - 10_275_495.0).abs() < 1e-4);
        let renewable = reduction(&set, ScenarioKind::RenewableEnergy);
        assert!((renewable - 9_600_000.0).abs() < 1e-4);
    }

    #[test]
    fn test_combined_is_sum_of_independent_scenarios() {
        let set = default_set();
        let independent: f64 = set
            .iter()
            .filter(|s| !s.kind.is_combined())
            .map(|s| s.reduction)
            .sum();
        assert!((reduction(&set, ScenarioKind::CombinedApproach) - independent).abs() < 1e-6);
    }

    #[test]
    fn test_percentages_match_reductions() {
        let set = default_set();
        for scenario in set.iter() {
            let expected = scenario.reduction / set.base_total * 100.0;
            assert!((scenario.percentage_reduction - expected).abs() < 1e-9);
            assert!((scenario.new_total + scenario.reduction - set.base_total).abs() < 1e-6);
        }

        let combined = set.get(ScenarioKind::CombinedApproach).unwrap();
        assert!((combined.percentage_reduction - 39.754_451_15).abs() < 1e-6);
    }

    #[test]
    fn test_scenarios_in_report_order() {
        let set = default_set();
        let kinds: Vec<_> = set.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, ScenarioKind::ALL.to_vec());
    }

    #[test]
    fn test_largest_single_scenario() {
        let set = default_set();
        assert_eq!(
            set.largest_single().unwrap().kind,
            ScenarioKind::SustainableAviationFuel
        );
    }

    #[test]
    fn test_zero_fractions_leave_total_unchanged() {
        let season = EmissionsModel::default().season_emissions(&Calendar::season_2024());
        let factors = ScenarioFactors {
            sustainable_aviation_fuel: 0.0,
            calendar_optimization: 0.0,
            renewable_energy: 0.0,
        };
        let set = ScenarioSet::simulate(&season, &factors).unwrap();
        for scenario in set.iter() {
            assert!(scenario.reduction.abs() < f64::EPSILON);
            assert!((scenario.new_total - set.base_total).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_empty_season_is_rejected() {
        let season = SeasonEmissions::new(Vec::new());
        let err = ScenarioSet::simulate(&season, &ScenarioFactors::default()).unwrap_err();
        assert!(err.is_zero_baseline());
    }

    #[test]
    fn test_scenario_titles() {
        assert_eq!(
            ScenarioKind::SustainableAviationFuel.title(),
            "Sustainable Aviation Fuel"
        );
        assert_eq!(ScenarioKind::CombinedApproach.to_string(), "combined_approach");
    }
}
