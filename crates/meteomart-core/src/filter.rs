//! Dashboard filter selection, applied in memory to a [`JoinedFrame`].
//!
//! Every field is optional; set fields combine conjunctively. A season and a
//! quarter may both be set, in which case the row's month must be in both
//! sets (this mirrors the dashboard's independent dropdowns, where e.g.
//! Winter ∩ Q1 leaves January and February).

use serde::{Deserialize, Serialize};

use crate::{
  frame::{JoinedFrame, JoinedRow},
  period::{Quarter, Season},
};

/// A conjunctive filter over joined rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
  /// Station display name (exact match).
  pub station: Option<String>,
  pub year:    Option<i32>,
  pub season:  Option<Season>,
  pub quarter: Option<Quarter>,
  pub month:   Option<u32>,
}

impl FilterSelection {
  pub fn matches(&self, row: &JoinedRow) -> bool {
    if let Some(station) = &self.station
      && row.name != *station
    {
      return false;
    }
    if let Some(year) = self.year
      && row.year != year
    {
      return false;
    }
    if let Some(season) = self.season
      && !season.months().contains(&row.month)
    {
      return false;
    }
    if let Some(quarter) = self.quarter
      && !quarter.months().contains(&row.month)
    {
      return false;
    }
    if let Some(month) = self.month
      && row.month != month
    {
      return false;
    }
    true
  }

  /// Borrow the subset of `frame` matching this selection.
  pub fn apply<'a>(&self, frame: &'a JoinedFrame) -> Vec<&'a JoinedRow> {
    frame.rows.iter().filter(|row| self.matches(row)).collect()
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::record::Measurements;

  fn row(name: &str, year: i32, month: u32) -> JoinedRow {
    JoinedRow {
      station_id:   1,
      date_id:      1,
      station_code: "X".into(),
      name:         name.into(),
      latitude:     None,
      longitude:    None,
      elevation:    None,
      country:      None,
      date:         NaiveDate::from_ymd_opt(year, month, 1).unwrap(),
      year,
      month,
      day:          1,
      measures:     Measurements::default(),
    }
  }

  #[test]
  fn empty_selection_matches_everything() {
    let selection = FilterSelection::default();
    assert!(selection.matches(&row("Alpha", 2020, 6)));
  }

  #[test]
  fn filters_combine_conjunctively() {
    let selection = FilterSelection {
      station: Some("Alpha".into()),
      year: Some(2020),
      ..Default::default()
    };
    assert!(selection.matches(&row("Alpha", 2020, 6)));
    assert!(!selection.matches(&row("Alpha", 2021, 6)));
    assert!(!selection.matches(&row("Beta", 2020, 6)));
  }

  #[test]
  fn season_and_quarter_intersect() {
    let selection = FilterSelection {
      season: Some(Season::Winter),
      quarter: Some(Quarter::Q1),
      ..Default::default()
    };
    // Winter ∩ Q1 = {1, 2}.
    assert!(selection.matches(&row("Alpha", 2020, 1)));
    assert!(selection.matches(&row("Alpha", 2020, 2)));
    assert!(!selection.matches(&row("Alpha", 2020, 12)));
    assert!(!selection.matches(&row("Alpha", 2020, 3)));
  }

  #[test]
  fn apply_borrows_matching_rows() {
    let frame = JoinedFrame::new(vec![
      row("Alpha", 2020, 1),
      row("Beta", 2020, 1),
      row("Alpha", 2020, 7),
    ]);
    let selection = FilterSelection {
      station: Some("Alpha".into()),
      ..Default::default()
    };
    let subset = selection.apply(&frame);
    assert_eq!(subset.len(), 2);
    assert!(subset.iter().all(|r| r.name == "Alpha"));
  }
}
