//! The materialized join result — every fact row with its station and date
//! dimension attributes flattened in.
//!
//! This is the warehouse's entire read surface: the Query Façade returns one
//! [`JoinedFrame`] and all filtering happens in memory afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::Measurements;

/// One row of the fact ⋈ station ⋈ date join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedRow {
  pub station_id:   i64,
  pub date_id:      i64,
  pub station_code: String,
  pub name:         String,
  pub latitude:     Option<f64>,
  pub longitude:    Option<f64>,
  pub elevation:    Option<f64>,
  pub country:      Option<String>,
  pub date:         NaiveDate,
  pub year:         i32,
  pub month:        u32,
  pub day:          u32,
  pub measures:     Measurements,
}

/// An in-memory frame of joined rows, in (StationID, DateID) order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JoinedFrame {
  pub rows: Vec<JoinedRow>,
}

impl JoinedFrame {
  pub fn new(rows: Vec<JoinedRow>) -> Self { Self { rows } }

  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  /// Distinct station display names, sorted.
  pub fn station_names(&self) -> Vec<String> {
    let mut names: Vec<String> =
      self.rows.iter().map(|r| r.name.clone()).collect();
    names.sort();
    names.dedup();
    names
  }

  /// Distinct years, ascending.
  pub fn years(&self) -> Vec<i32> {
    let mut years: Vec<i32> = self.rows.iter().map(|r| r.year).collect();
    years.sort_unstable();
    years.dedup();
    years
  }

  /// Distinct months, ascending.
  pub fn months(&self) -> Vec<u32> {
    let mut months: Vec<u32> = self.rows.iter().map(|r| r.month).collect();
    months.sort_unstable();
    months.dedup();
    months
  }
}
