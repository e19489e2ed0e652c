//! Race calendar model.
//!
//! The calendar is an ordered list of race weekends with the logistics data
//! needed to estimate their footprint: distance from the previous event and
//! how the freight got there.

use serde::{Deserialize, Serialize};

use crate::config::EmissionFactors;

/// How team freight is shipped to a race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreightMode {
    /// Air freight, the most carbon-intensive option.
    Air,
    /// Sea freight, used for early-planned long-haul legs.
    Sea,
    /// Road freight between neighbouring venues.
    Road,
}

impl FreightMode {
    /// All freight modes, in a fixed order.
    pub const ALL: [FreightMode; 3] = [Self::Air, Self::Sea, Self::Road];

    /// Emission factor for this mode, kg CO2 per kg freight per 1000 km.
    #[must_use]
    pub fn factor(self, factors: &EmissionFactors) -> f64 {
        match self {
            Self::Air => factors.air_freight,
            Self::Sea => factors.sea_freight,
            Self::Road => factors.road_freight,
        }
    }
}

impl std::fmt::Display for FreightMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Air => write!(f, "air"),
            Self::Sea => write!(f, "sea"),
            Self::Road => write!(f, "road"),
        }
    }
}

/// A single race weekend on the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    /// Position on the calendar, starting at 1.
    pub round: usize,
    /// Event name.
    pub name: String,
    /// Host city.
    pub location: String,
    /// Travel distance from the previous event in km.
    pub distance_from_previous_km: f64,
    /// How the freight reaches this event.
    pub freight_mode: FreightMode,
}

impl Race {
    /// Create a new race.
    #[must_use]
    pub fn new(
        round: usize,
        name: impl Into<String>,
        location: impl Into<String>,
        distance_from_previous_km: f64,
        freight_mode: FreightMode,
    ) -> Self {
        Self {
            round,
            name: name.into(),
            location: location.into(),
            distance_from_previous_km,
            freight_mode,
        }
    }
}

/// An ordered season calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calendar {
    races: Vec<Race>,
}

/// Name, location, km from previous event, freight mode.
const SEASON_2024: [(&str, &str, f64, FreightMode); 24] = [
    ("Bahrain GP", "Manama", 0.0, FreightMode::Sea),
    ("Saudi Arabian GP", "Jeddah", 450.0, FreightMode::Road),
    ("Australian GP", "Melbourne", 8_500.0, FreightMode::Sea),
    ("Japanese GP", "Suzuka", 8_000.0, FreightMode::Sea),
    ("Chinese GP", "Shanghai", 1_700.0, FreightMode::Road),
    ("Miami GP", "Miami", 17_000.0, FreightMode::Air),
    ("Emilia Romagna GP", "Imola", 8_500.0, FreightMode::Air),
    ("Monaco GP", "Monaco", 350.0, FreightMode::Road),
    ("Canadian GP", "Montreal", 6_200.0, FreightMode::Air),
    ("Spanish GP", "Barcelona", 5_200.0, FreightMode::Air),
    ("Austrian GP", "Spielberg", 1_000.0, FreightMode::Road),
    ("British GP", "Silverstone", 1_200.0, FreightMode::Road),
    ("Hungarian GP", "Budapest", 1_500.0, FreightMode::Road),
    ("Belgian GP", "Spa", 1_200.0, FreightMode::Road),
    ("Dutch GP", "Zandvoort", 300.0, FreightMode::Road),
    ("Italian GP", "Monza", 1_000.0, FreightMode::Road),
    ("Azerbaijan GP", "Baku", 3_000.0, FreightMode::Air),
    ("Singapore GP", "Singapore", 7_500.0, FreightMode::Air),
    ("United States GP", "Austin", 17_000.0, FreightMode::Air),
    ("Mexican GP", "Mexico City", 1_500.0, FreightMode::Road),
    ("Brazilian GP", "Sao Paulo", 3_500.0, FreightMode::Air),
    ("Las Vegas GP", "Las Vegas", 8_000.0, FreightMode::Air),
    ("Qatar GP", "Doha", 12_000.0, FreightMode::Air),
    ("Abu Dhabi GP", "Abu Dhabi", 550.0, FreightMode::Road),
];

impl Calendar {
    /// Build a calendar from races already in running order.
    #[must_use]
    pub fn new(races: Vec<Race>) -> Self {
        Self { races }
    }

    /// The 24-round 2024 calendar with estimated logistics.
    #[must_use]
    pub fn season_2024() -> Self {
        let races = SEASON_2024
            .iter()
            .enumerate()
            .map(|(i, &(name, location, distance, mode))| {
                Race::new(i + 1, name, location, distance, mode)
            })
            .collect();
        Self { races }
    }

    /// All races in running order.
    #[must_use]
    pub fn races(&self) -> &[Race] {
        &self.races
    }

    /// Iterate over races in running order.
    pub fn iter(&self) -> std::slice::Iter<'_, Race> {
        self.races.iter()
    }

    /// Number of races.
    #[must_use]
    pub fn len(&self) -> usize {
        self.races.len()
    }

    /// Check if the calendar has no races.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.races.is_empty()
    }

    /// Total distance travelled over the season, km.
    #[must_use]
    pub fn total_distance_km(&self) -> f64 {
        self.races.iter().map(|r| r.distance_from_previous_km).sum()
    }

    /// Races whose freight travels by the given mode.
    pub fn races_by_mode(&self, mode: FreightMode) -> impl Iterator<Item = &Race> + '_ {
        self.races.iter().filter(move |r| r.freight_mode == mode)
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::season_2024()
    }
}

impl<'a> IntoIterator for &'a Calendar {
    type Item = &'a Race;
    type IntoIter = std::slice::Iter<'a, Race>;

    fn into_iter(self) -> Self::IntoIter {
        self.races.iter()
    }
}
