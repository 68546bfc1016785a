//! `GET /observations` — the raw query façade output.
//!
//! Returns every row of the star join, unfiltered. This endpoint does not
//! degrade: a warehouse failure here is a 500 with a JSON error body.

use std::sync::Arc;

use axum::{Json, extract::State};
use meteomart_core::{frame::JoinedFrame, warehouse::Warehouse};

use crate::error::ApiError;

/// `GET /observations`
pub async fn handler<W>(
  State(warehouse): State<Arc<W>>,
) -> Result<Json<JoinedFrame>, ApiError>
where
  W: Warehouse,
{
  let frame = warehouse
    .query_joined()
    .await
    .map_err(|e| ApiError::Warehouse(Box::new(e)))?;
  Ok(Json(frame))
}
