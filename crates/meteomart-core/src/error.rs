//! Error types for `meteomart-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown measure code: {0:?}")]
  UnknownMeasure(String),

  #[error("unknown season: {0:?}")]
  UnknownSeason(String),

  #[error("quarter out of range (expected 1-4): {0}")]
  QuarterOutOfRange(u8),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
