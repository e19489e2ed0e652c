//! Season-level aggregation of race emissions.

use serde::Serialize;

use crate::emissions::{Category, CategoryBreakdown, RaceEmissions};
use crate::error::{Error, Result};

/// Emissions of every race in a season, in calendar order.
///
/// All aggregates are derived on demand from the per-race results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonEmissions {
    races: Vec<RaceEmissions>,
}

impl SeasonEmissions {
    /// Wrap per-race results that are already in calendar order.
    #[must_use]
    pub fn new(races: Vec<RaceEmissions>) -> Self {
        Self { races }
    }

    /// Per-race results.
    #[must_use]
    pub fn races(&self) -> &[RaceEmissions] {
        &self.races
    }

    /// Number of races in the season.
    #[must_use]
    pub fn race_count(&self) -> usize {
        self.races.len()
    }

    /// Season total, kg CO2.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.races.iter().map(|r| r.total).sum()
    }

    /// Average total per race, or `None` for an empty season.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_per_race(&self) -> Option<f64> {
        if self.races.is_empty() {
            None
        } else {
            Some(self.total() / self.races.len() as f64)
        }
    }

    /// Per-category sums over the season, before the support-series factor.
    #[must_use]
    pub fn category_totals(&self) -> CategoryBreakdown {
        self.races.iter().map(|r| r.breakdown).sum()
    }

    /// Share of the season total taken by a category, in percent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroBaseline`] if the season total is not positive.
    pub fn category_share(&self, category: Category) -> Result<f64> {
        self.percent_of_total(self.category_totals().get(category), "category share")
    }

    /// Share of the season total taken by freight and personnel travel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroBaseline`] if the season total is not positive.
    pub fn logistics_share(&self) -> Result<f64> {
        self.percent_of_total(self.category_totals().logistics(), "logistics share")
    }

    /// Emissions attributed to support series by the multiplier, kg CO2.
    #[must_use]
    pub fn support_series_uplift(&self) -> f64 {
        self.total() - self.category_totals().sum()
    }

    /// Running season total after each race, kg CO2.
    #[must_use]
    pub fn cumulative_totals(&self) -> Vec<f64> {
        self.races
            .iter()
            .scan(0.0, |acc, r| {
                *acc += r.total;
                Some(*acc)
            })
            .collect()
    }

    /// The race with the largest total, first one on ties.
    #[must_use]
    pub fn most_intensive(&self) -> Option<&RaceEmissions> {
        self.races.iter().reduce(|best, r| {
            if r.total > best.total {
                r
            } else {
                best
            }
        })
    }

    /// BLAKE3 digest of the per-race results.
    ///
    /// Identical inputs always produce the same fingerprint, which makes the
    /// figures easy to compare between runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the results cannot be serialized.
    pub fn fingerprint(&self) -> Result<String> {
        let bytes = serde_json::to_vec(&self.races)?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }

    fn percent_of_total(&self, value: f64, quantity: &'static str) -> Result<f64> {
        let total = self.total();
        if total <= 0.0 {
            return Err(Error::ZeroBaseline { quantity });
        }
        Ok(value / total * 100.0)
    }
}
