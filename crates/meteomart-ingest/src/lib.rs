//! Reader for the flat weather-observations file.
//!
//! The source is delimited text with one denormalized wide row per
//! observation: station attributes, date attributes, and the nine measure
//! columns. Headers follow the original dataset (`STATION`, `NAME`, …,
//! `PAYS`); `COUNTRY` is accepted as an alias for `PAYS`. Empty cells become
//! `None` — the reader does no validation beyond field types, leaving
//! NOT NULL enforcement to the warehouse schema.

pub mod error;

use std::{fs::File, io::Read, path::Path};

use chrono::NaiveDate;
use meteomart_core::record::{Measurements, SourceRecord};
use serde::Deserialize;

pub use error::{Error, Result};

/// One raw CSV row, field names bound to the source file's headers.
#[derive(Debug, Deserialize)]
struct RawRow {
  #[serde(rename = "STATION")]
  station:   String,
  #[serde(rename = "NAME")]
  name:      Option<String>,
  #[serde(rename = "LATITUDE")]
  latitude:  Option<f64>,
  #[serde(rename = "LONGITUDE")]
  longitude: Option<f64>,
  #[serde(rename = "ELEVATION")]
  elevation: Option<f64>,
  #[serde(rename = "PAYS", alias = "COUNTRY")]
  country:   Option<String>,
  #[serde(rename = "DATE")]
  date:      NaiveDate,
  #[serde(rename = "YEAR")]
  year:      i32,
  #[serde(rename = "MONTH")]
  month:     u32,
  #[serde(rename = "DAY")]
  day:       u32,
  #[serde(rename = "PRCP")]
  prcp:      Option<f64>,
  #[serde(rename = "TAVG")]
  tavg:      Option<f64>,
  #[serde(rename = "TMAX")]
  tmax:      Option<f64>,
  #[serde(rename = "TMIN")]
  tmin:      Option<f64>,
  #[serde(rename = "SNWD")]
  snwd:      Option<f64>,
  #[serde(rename = "PGTM")]
  pgtm:      Option<f64>,
  #[serde(rename = "SNOW")]
  snow:      Option<f64>,
  #[serde(rename = "WDFG")]
  wdfg:      Option<f64>,
  #[serde(rename = "WSFG")]
  wsfg:      Option<f64>,
}

impl From<RawRow> for SourceRecord {
  fn from(raw: RawRow) -> Self {
    SourceRecord {
      station_code: raw.station,
      name:         raw.name,
      latitude:     raw.latitude,
      longitude:    raw.longitude,
      elevation:    raw.elevation,
      country:      raw.country,
      date:         raw.date,
      year:         raw.year,
      month:        raw.month,
      day:          raw.day,
      measures:     Measurements {
        prcp: raw.prcp,
        tavg: raw.tavg,
        tmax: raw.tmax,
        tmin: raw.tmin,
        snwd: raw.snwd,
        pgtm: raw.pgtm,
        snow: raw.snow,
        wdfg: raw.wdfg,
        wsfg: raw.wsfg,
      },
    }
  }
}

/// Read every observation record from `path`.
pub fn read_path(path: impl AsRef<Path>) -> Result<Vec<SourceRecord>> {
  let path = path.as_ref();
  let file = File::open(path).map_err(|source| Error::Open {
    path: path.to_path_buf(),
    source,
  })?;
  read_from(file)
}

/// Read every observation record from an open reader.
///
/// The first row must be the header row. Parsing is strict: any malformed
/// row fails the whole read, matching the loader's all-or-nothing contract.
pub fn read_from(reader: impl Read) -> Result<Vec<SourceRecord>> {
  let mut csv_reader = csv::ReaderBuilder::new()
    .has_headers(true)
    .trim(csv::Trim::All)
    .from_reader(reader);

  let mut records = Vec::new();
  for row in csv_reader.deserialize::<RawRow>() {
    records.push(row?.into());
  }
  Ok(records)
}

#[cfg(test)]
mod tests {
  use super::*;

  const HEADER: &str = "STATION,NAME,LATITUDE,LONGITUDE,ELEVATION,PAYS,\
                        DATE,YEAR,MONTH,DAY,\
                        PRCP,TAVG,TMAX,TMIN,SNWD,PGTM,SNOW,WDFG,WSFG";

  #[test]
  fn reads_a_full_row() {
    let data = format!(
      "{HEADER}\nS1,Alpha,10.0,20.0,5.0,US,2020-01-01,2020,1,1,\
       0.5,10.0,15.0,5.0,0.0,1013.0,0.0,180.0,30.0"
    );
    let records = read_from(data.as_bytes()).unwrap();
    assert_eq!(records.len(), 1);

    let r = &records[0];
    assert_eq!(r.station_code, "S1");
    assert_eq!(r.name.as_deref(), Some("Alpha"));
    assert_eq!(r.country.as_deref(), Some("US"));
    assert_eq!(r.date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    assert_eq!((r.year, r.month, r.day), (2020, 1, 1));
    assert_eq!(r.measures.tmax, Some(15.0));
    assert_eq!(r.measures.wsfg, Some(30.0));
  }

  #[test]
  fn empty_cells_become_none() {
    let data = format!(
      "{HEADER}\nS1,Alpha,,,,,2020-01-01,2020,1,1,,,15.0,,,,,,"
    );
    let records = read_from(data.as_bytes()).unwrap();
    let r = &records[0];
    assert_eq!(r.latitude, None);
    assert_eq!(r.country, None);
    assert_eq!(r.measures.prcp, None);
    assert_eq!(r.measures.tmax, Some(15.0));
  }

  #[test]
  fn country_header_is_accepted_as_alias() {
    let data = "STATION,NAME,LATITUDE,LONGITUDE,ELEVATION,COUNTRY,\
                DATE,YEAR,MONTH,DAY,\
                PRCP,TAVG,TMAX,TMIN,SNWD,PGTM,SNOW,WDFG,WSFG\n\
                S1,Alpha,10.0,20.0,5.0,FR,2020-01-01,2020,1,1,\
                ,,,,,,,,";
    let records = read_from(data.as_bytes()).unwrap();
    assert_eq!(records[0].country.as_deref(), Some("FR"));
  }

  #[test]
  fn malformed_date_fails_the_read() {
    let data = format!(
      "{HEADER}\nS1,Alpha,10.0,20.0,5.0,US,not-a-date,2020,1,1,\
       ,,,,,,,,"
    );
    assert!(matches!(read_from(data.as_bytes()), Err(Error::Csv(_))));
  }

  #[test]
  fn missing_file_reports_the_path() {
    let err = read_path("/nonexistent/weather.csv").unwrap_err();
    assert!(matches!(err, Error::Open { .. }));
  }
}
