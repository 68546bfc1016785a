//! `GET /filters` — the dropdown vocabularies for the dashboard.
//!
//! Station names, years, and months come from the warehouse contents;
//! seasons, quarters, and measures are fixed vocabularies. If the warehouse
//! cannot be queried the data-driven lists come back empty so the dashboard
//! still renders its controls.

use std::sync::Arc;

use axum::{Json, extract::State};
use meteomart_core::{
  frame::JoinedFrame,
  measure::Measure,
  period::{Quarter, Season},
  warehouse::Warehouse,
};
use serde::Serialize;

/// One entry of the measure dropdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasureOption {
  pub code:        Measure,
  pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
  pub stations: Vec<String>,
  pub years:    Vec<i32>,
  pub months:   Vec<u32>,
  pub seasons:  Vec<&'static str>,
  pub quarters: Vec<u8>,
  pub measures: Vec<MeasureOption>,
}

impl FilterOptions {
  /// Fixed vocabularies only — what an unreachable or unloaded warehouse
  /// still offers.
  pub fn empty() -> Self {
    Self::from_frame(&JoinedFrame::default())
  }

  pub fn from_frame(frame: &JoinedFrame) -> Self {
    Self {
      stations: frame.station_names(),
      years:    frame.years(),
      months:   frame.months(),
      seasons:  Season::ALL.iter().map(|s| s.name()).collect(),
      quarters: Quarter::ALL.iter().map(|q| q.number()).collect(),
      measures: Measure::ALL
        .into_iter()
        .map(|code| MeasureOption { code, description: code.description() })
        .collect(),
    }
  }
}

/// `GET /filters`
pub async fn handler<W>(
  State(warehouse): State<Arc<W>>,
) -> Json<FilterOptions>
where
  W: Warehouse,
{
  match warehouse.query_joined().await {
    Ok(frame) => Json(FilterOptions::from_frame(&frame)),
    Err(error) => {
      tracing::warn!(%error, "warehouse query failed; serving empty filters");
      Json(FilterOptions::empty())
    }
  }
}
