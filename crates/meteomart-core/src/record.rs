//! Source records — the denormalized wide rows read from the observations
//! file, one row per (station, date) observation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::measure::Measure;

/// The nine nullable measure values of one observation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
  pub prcp: Option<f64>,
  pub tavg: Option<f64>,
  pub tmax: Option<f64>,
  pub tmin: Option<f64>,
  pub snwd: Option<f64>,
  pub pgtm: Option<f64>,
  pub snow: Option<f64>,
  pub wdfg: Option<f64>,
  pub wsfg: Option<f64>,
}

impl Measurements {
  pub fn get(&self, measure: Measure) -> Option<f64> {
    match measure {
      Measure::Prcp => self.prcp,
      Measure::Tavg => self.tavg,
      Measure::Tmax => self.tmax,
      Measure::Tmin => self.tmin,
      Measure::Snwd => self.snwd,
      Measure::Pgtm => self.pgtm,
      Measure::Snow => self.snow,
      Measure::Wdfg => self.wdfg,
      Measure::Wsfg => self.wsfg,
    }
  }
}

/// One wide source row: station attributes, date attributes, and measures.
///
/// The station code is the only field the reader refuses to leave empty;
/// everything else is nullable here and validated against the warehouse
/// schema's NOT NULL columns at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
  pub station_code: String,
  pub name:         Option<String>,
  pub latitude:     Option<f64>,
  pub longitude:    Option<f64>,
  pub elevation:    Option<f64>,
  /// Two-letter country code.
  pub country:      Option<String>,
  pub date:         NaiveDate,
  pub year:         i32,
  pub month:        u32,
  pub day:          u32,
  pub measures:     Measurements,
}
