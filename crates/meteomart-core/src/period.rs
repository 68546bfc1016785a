//! Calendar groupings used by the dashboard filters.
//!
//! Seasons and quarters are fixed month sets; a row matches a period when its
//! `Month` dimension value is in the set.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Season ──────────────────────────────────────────────────────────────────

/// Meteorological season (northern hemisphere).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
  Spring,
  Summer,
  Autumn,
  Winter,
}

impl Season {
  pub const ALL: [Season; 4] =
    [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

  /// The months belonging to this season. Winter wraps the year boundary.
  pub fn months(self) -> [u32; 3] {
    match self {
      Season::Spring => [3, 4, 5],
      Season::Summer => [6, 7, 8],
      Season::Autumn => [9, 10, 11],
      Season::Winter => [12, 1, 2],
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Season::Spring => "Spring",
      Season::Summer => "Summer",
      Season::Autumn => "Autumn",
      Season::Winter => "Winter",
    }
  }
}

impl fmt::Display for Season {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Season {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Season::ALL
      .into_iter()
      .find(|season| season.name().eq_ignore_ascii_case(s))
      .ok_or_else(|| Error::UnknownSeason(s.to_owned()))
  }
}

// ─── Quarter ─────────────────────────────────────────────────────────────────

/// Calendar quarter, serialised as its number (1-4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Quarter {
  Q1,
  Q2,
  Q3,
  Q4,
}

impl Quarter {
  pub const ALL: [Quarter; 4] =
    [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

  pub fn months(self) -> [u32; 3] {
    match self {
      Quarter::Q1 => [1, 2, 3],
      Quarter::Q2 => [4, 5, 6],
      Quarter::Q3 => [7, 8, 9],
      Quarter::Q4 => [10, 11, 12],
    }
  }

  pub fn number(self) -> u8 {
    match self {
      Quarter::Q1 => 1,
      Quarter::Q2 => 2,
      Quarter::Q3 => 3,
      Quarter::Q4 => 4,
    }
  }
}

impl fmt::Display for Quarter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Q{}", self.number())
  }
}

impl TryFrom<u8> for Quarter {
  type Error = Error;

  fn try_from(n: u8) -> Result<Self, Self::Error> {
    match n {
      1 => Ok(Quarter::Q1),
      2 => Ok(Quarter::Q2),
      3 => Ok(Quarter::Q3),
      4 => Ok(Quarter::Q4),
      other => Err(Error::QuarterOutOfRange(other)),
    }
  }
}

impl From<Quarter> for u8 {
  fn from(q: Quarter) -> u8 { q.number() }
}
