//! [`SqliteWarehouse`] — the SQLite implementation of [`Warehouse`].

use std::{collections::HashMap, path::Path};

use chrono::NaiveDate;
use meteomart_core::{
  frame::JoinedFrame,
  record::SourceRecord,
  warehouse::{KeyPolicy, LoadSummary, Warehouse},
};

use crate::{
  decode::{RawJoinedRow, encode_date},
  error::LoadFailure,
  schema::{JOIN_QUERY, RESET_SCHEMA},
  Error, Result,
};

const STATION_TABLE: &str = "station_dim";
const DATE_TABLE: &str = "date_dim";
const FACT_TABLE: &str = "weather_fact";

const INSERT_STATION: &str = "INSERT INTO station_dim \
   (StationCode, Name, Latitude, Longitude, Elevation, CountryCode) \
   VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const INSERT_DATE: &str = "INSERT INTO date_dim \
   (\"Date\", Year, Month, Day) VALUES (?1, ?2, ?3, ?4)";

const INSERT_FACT: &str = "INSERT INTO weather_fact \
   (StationID, DateID, PRCP, TAVG, TMAX, TMIN, SNWD, PGTM, SNOW, WDFG, WSFG) \
   VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";

// ─── Warehouse ───────────────────────────────────────────────────────────────

/// A dimensional weather warehouse backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. There is no
/// global connection state: the warehouse owns its session, and dropping the
/// last clone closes it.
#[derive(Clone)]
pub struct SqliteWarehouse {
  conn: tokio_rusqlite::Connection,
}

/// Current row counts of the three warehouse tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
  pub stations:     u64,
  pub dates:        u64,
  pub observations: u64,
}

impl SqliteWarehouse {
  /// Open (or create) a warehouse at `path`.
  ///
  /// Referential integrity is enforced for the lifetime of the connection.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(Error::Connection)?;
    let warehouse = Self { conn };
    warehouse.enable_foreign_keys().await?;
    Ok(warehouse)
  }

  /// Open an in-memory warehouse — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(Error::Connection)?;
    let warehouse = Self { conn };
    warehouse.enable_foreign_keys().await?;
    Ok(warehouse)
  }

  async fn enable_foreign_keys(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
      })
      .await
      .map_err(Error::Connection)
  }

  /// Row counts per table, bypassing the join (a fact row with a dangling
  /// key would not survive the join, so counts come from the tables
  /// themselves).
  pub async fn table_counts(&self) -> Result<TableCounts> {
    self
      .conn
      .call(|conn| {
        let count = |table: &str| -> rusqlite::Result<u64> {
          conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| {
            r.get(0)
          })
        };
        Ok(TableCounts {
          stations:     count(STATION_TABLE)?,
          dates:        count(DATE_TABLE)?,
          observations: count(FACT_TABLE)?,
        })
      })
      .await
      .map_err(Error::Query)
  }

  #[cfg(test)]
  pub(crate) fn raw_conn(&self) -> &tokio_rusqlite::Connection { &self.conn }
}

// ─── Warehouse impl ──────────────────────────────────────────────────────────

impl Warehouse for SqliteWarehouse {
  type Error = Error;

  async fn reset_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(RESET_SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(Error::Schema)
  }

  async fn load(
    &self,
    records: Vec<SourceRecord>,
    policy: KeyPolicy,
  ) -> Result<LoadSummary> {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let summary = match policy {
          KeyPolicy::Positional => load_positional(&tx, &records),
          KeyPolicy::NaturalKey => load_natural_key(&tx, &records),
        }
        .map_err(|failure| tokio_rusqlite::Error::Other(Box::new(failure)))?;
        tx.commit()?;
        Ok(summary)
      })
      .await
      .map_err(Error::from_load)
  }

  async fn query_joined(&self) -> Result<JoinedFrame> {
    let raw_rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(JOIN_QUERY)?;
        let rows = stmt
          .query_map([], RawJoinedRow::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::Query)?;

    let rows = raw_rows
      .into_iter()
      .map(RawJoinedRow::into_joined)
      .collect::<Result<Vec<_>>>()?;
    Ok(JoinedFrame::new(rows))
  }
}

// ─── Load passes ─────────────────────────────────────────────────────────────

fn prepare<'c>(
  tx: &'c rusqlite::Transaction<'_>,
  sql: &str,
  table: &'static str,
) -> Result<rusqlite::Statement<'c>, LoadFailure> {
  tx.prepare(sql)
    .map_err(|source| LoadFailure::Prepare { table, source })
}

fn insert_station(
  stmt: &mut rusqlite::Statement<'_>,
  record: &SourceRecord,
  index: usize,
) -> Result<(), LoadFailure> {
  stmt
    .execute(rusqlite::params![
      record.station_code,
      record.name,
      record.latitude,
      record.longitude,
      record.elevation,
      record.country,
    ])
    .map(|_| ())
    .map_err(|source| LoadFailure::Insert {
      table: STATION_TABLE,
      record: index,
      source,
    })
}

fn insert_date(
  stmt: &mut rusqlite::Statement<'_>,
  date: NaiveDate,
  year: i32,
  month: u32,
  day: u32,
  index: usize,
) -> Result<(), LoadFailure> {
  stmt
    .execute(rusqlite::params![encode_date(date), year, month, day])
    .map(|_| ())
    .map_err(|source| LoadFailure::Insert {
      table: DATE_TABLE,
      record: index,
      source,
    })
}

fn insert_fact(
  stmt: &mut rusqlite::Statement<'_>,
  record: &SourceRecord,
  station_id: i64,
  date_id: i64,
  index: usize,
) -> Result<(), LoadFailure> {
  let m = &record.measures;
  stmt
    .execute(rusqlite::params![
      station_id, date_id, m.prcp, m.tavg, m.tmax, m.tmin, m.snwd, m.pgtm,
      m.snow, m.wdfg, m.wsfg,
    ])
    .map(|_| ())
    .map_err(|source| LoadFailure::Insert {
      table: FACT_TABLE,
      record: index,
      source,
    })
}

/// Historical lockstep load: one station row and one date row per source
/// record, fact row N keyed (N, N). No dedup — repeated station codes and
/// dates produce repeated dimension rows, and the count of all three tables
/// equals the source row count by construction.
fn load_positional(
  tx: &rusqlite::Transaction<'_>,
  records: &[SourceRecord],
) -> Result<LoadSummary, LoadFailure> {
  {
    let mut stmt = prepare(tx, INSERT_STATION, STATION_TABLE)?;
    for (index, record) in records.iter().enumerate() {
      insert_station(&mut stmt, record, index)?;
    }
  }
  {
    let mut stmt = prepare(tx, INSERT_DATE, DATE_TABLE)?;
    for (index, record) in records.iter().enumerate() {
      insert_date(
        &mut stmt,
        record.date,
        record.year,
        record.month,
        record.day,
        index,
      )?;
    }
  }
  {
    let mut stmt = prepare(tx, INSERT_FACT, FACT_TABLE)?;
    for (index, record) in records.iter().enumerate() {
      // Rowid keys restart at 1 after a rebuild, so record N holds keys
      // (N + 1, N + 1) across all three passes.
      let key = (index + 1) as i64;
      insert_fact(&mut stmt, record, key, key, index)?;
    }
  }

  Ok(LoadSummary {
    source_records: records.len(),
    stations:       records.len(),
    dates:          records.len(),
    observations:   records.len(),
  })
}

/// Dimensional load with lookup-or-insert by natural key: station code maps
/// to one `StationID`, calendar date to one `DateID`, and fact rows carry
/// the keys actually generated by the engine.
fn load_natural_key(
  tx: &rusqlite::Transaction<'_>,
  records: &[SourceRecord],
) -> Result<LoadSummary, LoadFailure> {
  let mut station_keys: HashMap<String, i64> = HashMap::new();
  let mut date_keys: HashMap<NaiveDate, i64> = HashMap::new();

  let mut station_stmt = prepare(tx, INSERT_STATION, STATION_TABLE)?;
  let mut date_stmt = prepare(tx, INSERT_DATE, DATE_TABLE)?;
  let mut fact_stmt = prepare(tx, INSERT_FACT, FACT_TABLE)?;

  for (index, record) in records.iter().enumerate() {
    let station_id = match station_keys.get(&record.station_code) {
      Some(&id) => id,
      None => {
        insert_station(&mut station_stmt, record, index)?;
        let id = tx.last_insert_rowid();
        station_keys.insert(record.station_code.clone(), id);
        id
      }
    };

    let date_id = match date_keys.get(&record.date) {
      Some(&id) => id,
      None => {
        insert_date(
          &mut date_stmt,
          record.date,
          record.year,
          record.month,
          record.day,
          index,
        )?;
        let id = tx.last_insert_rowid();
        date_keys.insert(record.date, id);
        id
      }
    };

    insert_fact(&mut fact_stmt, record, station_id, date_id, index)?;
  }

  Ok(LoadSummary {
    source_records: records.len(),
    stations:       station_keys.len(),
    dates:          date_keys.len(),
    observations:   records.len(),
  })
}
