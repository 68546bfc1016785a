//! The nine measurement kinds carried by the fact table.
//!
//! Codes follow the source dataset's column names (GHCN-style); the
//! descriptions mirror the dashboard's measure vocabulary.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A fact-table measure column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Measure {
  Prcp,
  Tavg,
  Tmax,
  Tmin,
  Snwd,
  Pgtm,
  Snow,
  Wdfg,
  Wsfg,
}

impl Measure {
  /// Every measure, in fact-table column order.
  pub const ALL: [Measure; 9] = [
    Measure::Prcp,
    Measure::Tavg,
    Measure::Tmax,
    Measure::Tmin,
    Measure::Snwd,
    Measure::Pgtm,
    Measure::Snow,
    Measure::Wdfg,
    Measure::Wsfg,
  ];

  /// The warehouse column name for this measure.
  pub fn column(self) -> &'static str {
    match self {
      Measure::Prcp => "PRCP",
      Measure::Tavg => "TAVG",
      Measure::Tmax => "TMAX",
      Measure::Tmin => "TMIN",
      Measure::Snwd => "SNWD",
      Measure::Pgtm => "PGTM",
      Measure::Snow => "SNOW",
      Measure::Wdfg => "WDFG",
      Measure::Wsfg => "WSFG",
    }
  }

  /// Human-readable description, including the unit.
  pub fn description(self) -> &'static str {
    match self {
      Measure::Prcp => "Precipitation (millimetres)",
      Measure::Tavg => "Average temperature (degrees Celsius)",
      Measure::Tmax => "Maximum temperature (degrees Celsius)",
      Measure::Tmin => "Minimum temperature (degrees Celsius)",
      Measure::Snwd => "Snow depth (millimetres)",
      Measure::Pgtm => "Atmospheric pressure (hectopascals)",
      Measure::Snow => "Snowfall (millimetres)",
      Measure::Wdfg => "Wind direction (degrees)",
      Measure::Wsfg => "Peak wind gust speed (km/h)",
    }
  }
}

impl fmt::Display for Measure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.column())
  }
}

impl FromStr for Measure {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Measure::ALL
      .into_iter()
      .find(|m| m.column().eq_ignore_ascii_case(s))
      .ok_or_else(|| Error::UnknownMeasure(s.to_owned()))
  }
}
