//! `paddock` - Carbon footprint tracking for a racing season
//!
//! This library models a championship calendar, estimates per-race and
//! season emissions, and derives comparisons, reduction scenarios, net-zero
//! progress, a text report and SVG charts from them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod calendar;
pub mod charts;
pub mod cli;
pub mod comparisons;
pub mod config;
pub mod emissions;
pub mod error;
pub mod logging;
pub mod net_zero;
pub mod report;
pub mod scenarios;
pub mod season;

pub use calendar::{Calendar, FreightMode, Race};
pub use comparisons::Comparisons;
pub use config::Config;
pub use emissions::{Category, CategoryBreakdown, EmissionsModel, RaceEmissions};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use net_zero::NetZeroProgress;
pub use report::SeasonReport;
pub use scenarios::{Scenario, ScenarioKind, ScenarioSet};
pub use season::SeasonEmissions;
