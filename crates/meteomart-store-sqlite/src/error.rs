//! Error type for `meteomart-store-sqlite`.
//!
//! Variants follow the warehouse failure taxonomy: connection, schema
//! rebuild, load, query. All load-path errors are fatal and unrecovered —
//! the crate performs no retries and no compensating cleanup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The storage engine cannot be reached or answered out of band.
  #[error("cannot reach the storage engine: {0}")]
  Connection(#[source] tokio_rusqlite::Error),

  /// Table creation was rejected. Fatal; no partial-schema recovery.
  #[error("schema rebuild failed: {0}")]
  Schema(#[source] tokio_rusqlite::Error),

  /// An insert failed. The transaction is rolled back, so the warehouse is
  /// left as it was before the load started.
  #[error("load failed: {0}")]
  Load(#[from] LoadFailure),

  #[error("join query failed: {0}")]
  Query(#[source] tokio_rusqlite::Error),

  #[error("invalid date in warehouse: {0}")]
  DateParse(String),
}

/// What went wrong inside a load pass, pinned to a table (and record, for
/// inserts) so the diagnostic names the failure site.
#[derive(Debug, Error)]
pub enum LoadFailure {
  #[error("cannot prepare insert for {table}: {source}")]
  Prepare {
    table:  &'static str,
    #[source]
    source: rusqlite::Error,
  },

  #[error("insert into {table} failed at record {record}: {source}")]
  Insert {
    table:  &'static str,
    /// Zero-based index of the source record being inserted.
    record: usize,
    #[source]
    source: rusqlite::Error,
  },
}

impl LoadFailure {
  pub fn table(&self) -> &'static str {
    match self {
      LoadFailure::Prepare { table, .. } => table,
      LoadFailure::Insert { table, .. } => table,
    }
  }
}

impl Error {
  /// Recover a [`LoadFailure`] smuggled through the connection layer as
  /// [`tokio_rusqlite::Error::Other`]; anything else is a connection-level
  /// failure (e.g. transaction begin/commit).
  pub(crate) fn from_load(error: tokio_rusqlite::Error) -> Self {
    match error {
      tokio_rusqlite::Error::Other(inner) => {
        match inner.downcast::<LoadFailure>() {
          Ok(failure) => Error::Load(*failure),
          Err(other) => Error::Connection(tokio_rusqlite::Error::Other(other)),
        }
      }
      other => Error::Connection(other),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
