//! Stateless chart transforms.
//!
//! Each chart is a pure function of (joined frame, filter selection, measure)
//! — no callback graph, no shared state. Rows whose selected measure is null
//! are skipped rather than plotted as zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  filter::FilterSelection,
  frame::{JoinedFrame, JoinedRow},
  measure::Measure,
};

/// Bin count for [`histogram`] when the caller has no preference.
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

// ─── Payload types ───────────────────────────────────────────────────────────

/// One point of the by-day time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
  pub date:  NaiveDate,
  pub day:   u32,
  pub value: f64,
}

/// One station marker on the geographic map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
  pub station:   String,
  pub latitude:  f64,
  pub longitude: f64,
  pub value:     f64,
}

/// One fixed-width histogram bin over `[lower, upper)`; the last bin is
/// closed on both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
  pub lower: f64,
  pub upper: f64,
  pub count: usize,
}

/// The three dashboard charts for one filtered subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBundle {
  pub measure:     Measure,
  pub description: String,
  pub time_series: Vec<SeriesPoint>,
  pub map_points:  Vec<MapPoint>,
  pub histogram:   Vec<HistogramBin>,
}

impl ChartBundle {
  /// An all-empty bundle — what the dashboard renders when the warehouse
  /// cannot be queried.
  pub fn empty(measure: Measure) -> Self {
    Self {
      measure,
      description: measure.description().to_owned(),
      time_series: Vec::new(),
      map_points: Vec::new(),
      histogram: Vec::new(),
    }
  }
}

// ─── Transforms ──────────────────────────────────────────────────────────────

/// Measured values by calendar date, ascending.
pub fn time_series(rows: &[&JoinedRow], measure: Measure) -> Vec<SeriesPoint> {
  let mut points: Vec<SeriesPoint> = rows
    .iter()
    .filter_map(|row| {
      row.measures.get(measure).map(|value| SeriesPoint {
        date: row.date,
        day: row.day,
        value,
      })
    })
    .collect();
  points.sort_by_key(|p| p.date);
  points
}

/// Station markers carrying the measured value. Rows without coordinates or
/// without the measure are skipped.
pub fn map_points(rows: &[&JoinedRow], measure: Measure) -> Vec<MapPoint> {
  rows
    .iter()
    .filter_map(|row| {
      let latitude = row.latitude?;
      let longitude = row.longitude?;
      let value = row.measures.get(measure)?;
      Some(MapPoint {
        station: row.name.clone(),
        latitude,
        longitude,
        value,
      })
    })
    .collect()
}

/// Fixed-width bins over the value range of the non-null measures.
///
/// An empty subset yields no bins; a single-valued range collapses to one
/// bin holding every value.
pub fn histogram(
  rows: &[&JoinedRow],
  measure: Measure,
  bins: usize,
) -> Vec<HistogramBin> {
  let values: Vec<f64> =
    rows.iter().filter_map(|row| row.measures.get(measure)).collect();
  if values.is_empty() || bins == 0 {
    return Vec::new();
  }

  let min = values.iter().copied().fold(f64::INFINITY, f64::min);
  let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

  if min == max {
    return vec![HistogramBin { lower: min, upper: max, count: values.len() }];
  }

  let width = (max - min) / bins as f64;
  let mut out: Vec<HistogramBin> = (0..bins)
    .map(|i| HistogramBin {
      lower: min + width * i as f64,
      upper: min + width * (i + 1) as f64,
      count: 0,
    })
    .collect();

  for value in values {
    let index = (((value - min) / width) as usize).min(bins - 1);
    out[index].count += 1;
  }
  out
}

/// Apply `selection` to `frame` and build all three charts for `measure`.
pub fn chart_bundle(
  frame: &JoinedFrame,
  selection: &FilterSelection,
  measure: Measure,
) -> ChartBundle {
  let subset = selection.apply(frame);
  ChartBundle {
    measure,
    description: measure.description().to_owned(),
    time_series: time_series(&subset, measure),
    map_points: map_points(&subset, measure),
    histogram: histogram(&subset, measure, DEFAULT_HISTOGRAM_BINS),
  }
}
