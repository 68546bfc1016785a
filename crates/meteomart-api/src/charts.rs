//! `GET /charts` — the three dashboard charts for one filter selection.
//!
//! | Param     | Meaning                                  |
//! |-----------|------------------------------------------|
//! | `station` | station display name, exact match        |
//! | `year`    | calendar year                            |
//! | `season`  | `spring` \| `summer` \| `autumn` \| `winter` |
//! | `quarter` | `1`–`4`                                  |
//! | `month`   | `1`–`12`                                 |
//! | `measure` | measure code, default `TMAX`             |
//!
//! All filter params are optional and combine conjunctively. A failed
//! warehouse query degrades to an empty bundle rather than an error — the
//! dashboard renders empty charts instead of crashing the session.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use meteomart_core::{
  chart::{ChartBundle, chart_bundle},
  filter::FilterSelection,
  measure::Measure,
  period::{Quarter, Season},
  warehouse::Warehouse,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChartParams {
  pub station: Option<String>,
  pub year:    Option<i32>,
  pub season:  Option<Season>,
  pub quarter: Option<Quarter>,
  pub month:   Option<u32>,
  pub measure: Option<Measure>,
}

impl ChartParams {
  fn selection(&self) -> FilterSelection {
    FilterSelection {
      station: self.station.clone(),
      year:    self.year,
      season:  self.season,
      quarter: self.quarter,
      month:   self.month,
    }
  }
}

/// `GET /charts?station=&year=&season=&quarter=&month=&measure=`
pub async fn handler<W>(
  State(warehouse): State<Arc<W>>,
  Query(params): Query<ChartParams>,
) -> Json<ChartBundle>
where
  W: Warehouse,
{
  let measure = params.measure.unwrap_or(Measure::Tmax);

  let frame = match warehouse.query_joined().await {
    Ok(frame) => frame,
    Err(error) => {
      tracing::warn!(%error, "warehouse query failed; serving empty charts");
      return Json(ChartBundle::empty(measure));
    }
  };

  Json(chart_bundle(&frame, &params.selection(), measure))
}
