//! Encoding and decoding helpers between Rust domain types and the plain
//! representations stored in SQLite columns.
//!
//! Calendar dates are stored as ISO 8601 (`%Y-%m-%d`) text. Measures map
//! directly to nullable REAL columns.

use chrono::NaiveDate;
use meteomart_core::{frame::JoinedRow, record::Measurements};

use crate::{Error, Result};

// ─── Date ────────────────────────────────────────────────────────────────────

pub fn encode_date(date: NaiveDate) -> String {
  date.format("%Y-%m-%d").to_string()
}

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Join rows ───────────────────────────────────────────────────────────────

/// A join row as it comes off the wire — the date still a string. Conversion
/// to [`JoinedRow`] happens outside the connection closure so date errors
/// surface as [`Error::DateParse`] rather than a database error.
#[derive(Debug)]
pub struct RawJoinedRow {
  pub station_id:   i64,
  pub date_id:      i64,
  pub station_code: String,
  pub name:         String,
  pub latitude:     Option<f64>,
  pub longitude:    Option<f64>,
  pub elevation:    Option<f64>,
  pub country:      Option<String>,
  pub date:         String,
  pub year:         i32,
  pub month:        u32,
  pub day:          u32,
  pub measures:     Measurements,
}

impl RawJoinedRow {
  /// Column order must match [`crate::schema::JOIN_QUERY`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      station_id:   row.get(0)?,
      date_id:      row.get(1)?,
      station_code: row.get(2)?,
      name:         row.get(3)?,
      latitude:     row.get(4)?,
      longitude:    row.get(5)?,
      elevation:    row.get(6)?,
      country:      row.get(7)?,
      date:         row.get(8)?,
      year:         row.get(9)?,
      month:        row.get(10)?,
      day:          row.get(11)?,
      measures:     Measurements {
        prcp: row.get(12)?,
        tavg: row.get(13)?,
        tmax: row.get(14)?,
        tmin: row.get(15)?,
        snwd: row.get(16)?,
        pgtm: row.get(17)?,
        snow: row.get(18)?,
        wdfg: row.get(19)?,
        wsfg: row.get(20)?,
      },
    })
  }

  pub fn into_joined(self) -> Result<JoinedRow> {
    Ok(JoinedRow {
      station_id:   self.station_id,
      date_id:      self.date_id,
      station_code: self.station_code,
      name:         self.name,
      latitude:     self.latitude,
      longitude:    self.longitude,
      elevation:    self.elevation,
      country:      self.country,
      date:         decode_date(&self.date)?,
      year:         self.year,
      month:        self.month,
      day:          self.day,
      measures:     self.measures,
    })
  }
}
