//! Season report assembly and console rendering.
//!
//! [`SeasonReport`] gathers every derived figure for one run. It serializes
//! to JSON as-is and renders the fixed-format console report.

use std::fmt::Write as _;

use serde::Serialize;
use tracing::info;

use crate::calendar::{Calendar, FreightMode};
use crate::comparisons::Comparisons;
use crate::config::Config;
use crate::emissions::{Category, EmissionsModel, RaceEmissions};
use crate::error::Result;
use crate::net_zero::NetZeroProgress;
use crate::scenarios::{ScenarioKind, ScenarioSet};
use crate::season::SeasonEmissions;

const KG_PER_TONNE: f64 = 1_000.0;
const RULE_WIDTH: usize = 50;

/// One category line of the breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategorySummary {
    /// The category.
    pub category: Category,
    /// Season sum, kg CO2.
    pub emissions_kg: f64,
    /// Share of the season total, percent.
    pub share: f64,
}

/// The race with the largest footprint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntensiveRace {
    /// Event name.
    pub race: String,
    /// How its freight travelled.
    pub freight_mode: FreightMode,
    /// Race total, kg CO2.
    pub total_kg: f64,
}

/// Headline takeaways derived from the figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    /// Freight plus personnel travel as a share of the total, percent.
    pub logistics_share: f64,
    /// The single most carbon-intensive race.
    pub most_intensive: Option<IntensiveRace>,
    /// Reduction of the combined scenario, percent.
    pub combined_reduction: f64,
    /// The independent scenario with the biggest impact.
    pub largest_single_scenario: Option<ScenarioKind>,
}

/// Every derived figure of one season run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonReport {
    /// Season shown in headings.
    pub season_year: i32,
    /// Season total, kg CO2.
    pub total_kg: f64,
    /// Average per race, kg CO2.
    pub average_per_race_kg: f64,
    /// Per-category season sums.
    pub categories: Vec<CategorySummary>,
    /// Emissions attributed to support series, kg CO2.
    pub support_series_uplift_kg: f64,
    /// Everyday equivalents of the total.
    pub comparisons: Comparisons,
    /// Reduction scenarios.
    pub scenarios: ScenarioSet,
    /// Net-zero progress.
    pub net_zero: NetZeroProgress,
    /// Headline takeaways.
    pub insights: Insights,
    /// BLAKE3 digest of the per-race results.
    pub fingerprint: String,
    /// Per-race results.
    pub season: SeasonEmissions,
}

impl SeasonReport {
    /// Run the whole calculation for a calendar.
    ///
    /// # Errors
    ///
    /// Returns an error if the season has no positive emissions, or if the
    /// results cannot be fingerprinted.
    pub fn build(config: &Config, calendar: &Calendar, current_year: i32) -> Result<Self> {
        let season = EmissionsModel::from_config(config).season_emissions(calendar);
        let total_kg = season.total();
        info!(
            races = season.race_count(),
            total_kg, "Calculated season emissions"
        );

        let scenarios = ScenarioSet::simulate(&season, &config.scenarios)?;
        let net_zero =
            NetZeroProgress::compute(total_kg, config.net_zero.target_year, current_year)?;

        let totals = season.category_totals();
        let categories = Category::ALL
            .iter()
            .map(|&category| {
                Ok(CategorySummary {
                    category,
                    emissions_kg: totals.get(category),
                    share: season.category_share(category)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let insights = Insights {
            logistics_share: season.logistics_share()?,
            most_intensive: season.most_intensive().map(|r| IntensiveRace {
                race: r.race.clone(),
                freight_mode: r.freight_mode,
                total_kg: r.total,
            }),
            combined_reduction: scenarios
                .get(ScenarioKind::CombinedApproach)
                .map_or(0.0, |s| s.percentage_reduction),
            largest_single_scenario: scenarios.largest_single().map(|s| s.kind),
        };

        Ok(Self {
            season_year: config.net_zero.season_year,
            total_kg,
            average_per_race_kg: season.average_per_race().unwrap_or_default(),
            categories,
            support_series_uplift_kg: season.support_series_uplift(),
            comparisons: Comparisons::from_total(total_kg, &config.comparisons),
            fingerprint: season.fingerprint()?,
            scenarios,
            net_zero,
            insights,
            season,
        })
    }

    /// Render the full console report.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "🏎️  Racing Season Carbon Footprint Tracker");
        let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));

        let _ = writeln!(out);
        let _ = writeln!(out, "📊 {} Season Carbon Footprint", self.season_year);
        let _ = writeln!(
            out,
            "Total CO2 Emissions: {:.1} tonnes",
            tonnes(self.total_kg)
        );
        let _ = writeln!(
            out,
            "Average per race: {:.1} tonnes",
            tonnes(self.average_per_race_kg)
        );

        let _ = writeln!(out);
        let _ = writeln!(out, "🔍 Emissions Breakdown:");
        for summary in &self.categories {
            let _ = writeln!(
                out,
                "  • {}: {:.1} tonnes ({:.1}%)",
                summary.category.label(),
                tonnes(summary.emissions_kg),
                summary.share
            );
        }
        let _ = writeln!(
            out,
            "  • Support Series Uplift: {:.1} tonnes ({:.1}%)",
            tonnes(self.support_series_uplift_kg),
            self.support_series_uplift_kg / self.total_kg * 100.0
        );

        let _ = writeln!(out);
        let _ = writeln!(out, "🌍 Real-World Comparisons:");
        let _ = writeln!(
            out,
            "  • Equivalent to powering {:.0} homes for a year",
            self.comparisons.homes_powered_annually
        );
        let _ = writeln!(
            out,
            "  • Same as driving {:.1} million km by car",
            self.comparisons.car_driving_km / 1_000_000.0
        );
        let _ = writeln!(
            out,
            "  • Equal to {:.0} transatlantic flights",
            self.comparisons.transatlantic_flights
        );

        let _ = writeln!(out);
        out.push_str(&render_scenarios(&self.scenarios, self.net_zero.target_year));
        let _ = writeln!(out);
        out.push_str(&render_net_zero(&self.net_zero));

        let _ = writeln!(out);
        let _ = writeln!(out, "💡 Key Insights:");
        let _ = writeln!(
            out,
            "  • Logistics (freight + travel) account for {:.1}% of emissions",
            self.insights.logistics_share
        );
        if let Some(top) = &self.insights.most_intensive {
            let _ = writeln!(
                out,
                "  • The most carbon-intensive race is {} ({} freight, {:.1} tonnes)",
                top.race,
                top.freight_mode,
                tonnes(top.total_kg)
            );
        }
        let _ = writeln!(
            out,
            "  • A combined sustainability approach could reduce emissions by {:.1}%",
            self.insights.combined_reduction
        );
        if let Some(kind) = self.insights.largest_single_scenario {
            let _ = writeln!(out, "  • {} offers the biggest single impact", kind.title());
        }

        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "🏁 Season analysis complete (fingerprint {})",
            short_fingerprint(&self.fingerprint)
        );
        out
    }
}

/// Render the scenario section of the report.
#[must_use]
pub fn render_scenarios(scenarios: &ScenarioSet, target_year: i32) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "🚀 Sustainability Scenarios (Path to Net Zero {target_year}):"
    );
    for scenario in scenarios.iter() {
        let _ = writeln!(
            out,
            "  • {}: {:.1}% reduction ({:.0} tonnes CO2 saved)",
            scenario.kind.title(),
            scenario.percentage_reduction,
            tonnes(scenario.reduction)
        );
    }
    out
}

/// Render the net-zero section of the report.
#[must_use]
pub fn render_net_zero(progress: &NetZeroProgress) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "🎯 Net Zero {} Progress Tracker:",
        progress.target_year
    );
    let _ = writeln!(
        out,
        "Current annual emissions: {:.1} tonnes CO2",
        tonnes(progress.current_emissions)
    );
    let _ = writeln!(out, "Years remaining: {}", progress.years_remaining);
    let _ = writeln!(
        out,
        "Required annual reduction: {:.1} tonnes CO2/year",
        tonnes(progress.required_annual_reduction)
    );
    let _ = writeln!(
        out,
        "Required annual reduction rate: {:.1}%",
        progress.required_annual_rate
    );
    out
}

/// Render per-race results as plain lines.
#[must_use]
pub fn render_races_plain(races: &[RaceEmissions]) -> String {
    let mut out = String::new();
    for race in races {
        let _ = writeln!(
            out,
            "{:>2}. {} ({}, {} freight): {:.1} tonnes",
            race.round,
            race.race,
            race.location,
            race.freight_mode,
            tonnes(race.total)
        );
    }
    out
}

/// Render per-race results as an aligned table, figures in tonnes.
#[must_use]
pub fn render_races_table(races: &[RaceEmissions]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<18} {:<12} {:>6} {:>5} {:>9} {:>9} {:>6} {:>8} {:>7} {:>9}",
        "#",
        "Race",
        "Location",
        "km",
        "Mode",
        "Freight",
        "Travel",
        "Fuel",
        "Circuit",
        "Hotel",
        "Total"
    );
    let _ = writeln!(out, "{}", "-".repeat(106));
    for race in races {
        let b = &race.breakdown;
        let _ = writeln!(
            out,
            "{:>3}  {:<18} {:<12} {:>6.0} {:>5} {:>9.1} {:>9.1} {:>6.1} {:>8.1} {:>7.1} {:>9.1}",
            race.round,
            race.race,
            race.location,
            race.distance_km,
            race.freight_mode.to_string(),
            tonnes(b.freight),
            tonnes(b.personnel_travel),
            tonnes(b.fuel),
            tonnes(b.circuit_operations),
            tonnes(b.accommodation),
            tonnes(race.total)
        );
    }
    out
}

/// Convert kg to tonnes.
#[must_use]
pub fn tonnes(kg: f64) -> f64 {
    kg / KG_PER_TONNE
}

fn short_fingerprint(fingerprint: &str) -> &str {
    fingerprint.get(..12).unwrap_or(fingerprint)
}
