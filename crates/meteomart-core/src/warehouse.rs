//! The `Warehouse` trait and supporting load types.
//!
//! The trait is implemented by storage backends (e.g.
//! `meteomart-store-sqlite`). Higher layers (`meteomart-api`,
//! `meteomart-cli`) depend on this abstraction, not on any concrete backend.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{frame::JoinedFrame, record::SourceRecord};

// ─── Load types ──────────────────────────────────────────────────────────────

/// How the loader assigns fact-table foreign keys.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum KeyPolicy {
  /// Lookup-or-insert per natural key: one dimension row per distinct
  /// station code / calendar date, fact keys taken from the dedup maps.
  #[default]
  NaturalKey,
  /// Historical lockstep behavior: one dimension row per source record, no
  /// dedup, fact row N references surrogate keys (N, N). Only yields correct
  /// joins when every source row has a distinct station and a distinct
  /// date.
  Positional,
}

/// Row counts produced by one load pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
  pub source_records: usize,
  pub stations:       usize,
  pub dates:          usize,
  pub observations:   usize,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a dimensional weather warehouse backend.
///
/// The schema manager and loader are the only writers; the query façade is
/// read-only. A load always follows a schema reset — rows are inserted once
/// and never updated.
pub trait Warehouse: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Drop and recreate the three warehouse tables — dimensions first, fact
  /// table last. Destroys all existing data.
  fn reset_schema(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Populate the warehouse from wide source records. The whole load is
  /// atomic: a failing record leaves the warehouse untouched.
  fn load(
    &self,
    records: Vec<SourceRecord>,
    policy: KeyPolicy,
  ) -> impl Future<Output = Result<LoadSummary, Self::Error>> + Send + '_;

  /// Execute the star join and materialize every resulting row. No
  /// filtering, pagination, or aggregation happens warehouse-side.
  fn query_joined(
    &self,
  ) -> impl Future<Output = Result<JoinedFrame, Self::Error>> + Send + '_;
}
