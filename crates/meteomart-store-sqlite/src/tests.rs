//! Integration tests for `SqliteWarehouse` against an in-memory database.

use chrono::NaiveDate;
use meteomart_core::{
  record::{Measurements, SourceRecord},
  warehouse::{KeyPolicy, Warehouse},
};

use crate::{Error, LoadFailure, SqliteWarehouse};

async fn warehouse() -> SqliteWarehouse {
  let wh = SqliteWarehouse::open_in_memory()
    .await
    .expect("in-memory warehouse");
  wh.reset_schema().await.expect("schema rebuild");
  wh
}

fn record(code: &str, name: &str, ymd: (i32, u32, u32)) -> SourceRecord {
  let (year, month, day) = ymd;
  SourceRecord {
    station_code: code.into(),
    name:         Some(name.into()),
    latitude:     Some(10.0),
    longitude:    Some(20.0),
    elevation:    Some(5.0),
    country:      Some("US".into()),
    date:         NaiveDate::from_ymd_opt(year, month, day).unwrap(),
    year,
    month,
    day,
    measures:     Measurements { tmax: Some(15.0), ..Default::default() },
  }
}

// ─── Schema ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn reset_schema_is_idempotent() {
  let wh = warehouse().await;
  wh.reset_schema().await.unwrap();
  wh.reset_schema().await.unwrap();

  let counts = wh.table_counts().await.unwrap();
  assert_eq!((counts.stations, counts.dates, counts.observations), (0, 0, 0));
}

#[tokio::test]
async fn reset_schema_destroys_existing_data() {
  let wh = warehouse().await;
  wh.load(vec![record("S1", "Alpha", (2020, 1, 1))], KeyPolicy::Positional)
    .await
    .unwrap();

  wh.reset_schema().await.unwrap();
  assert!(wh.query_joined().await.unwrap().is_empty());
}

#[tokio::test]
async fn foreign_keys_are_enforced() {
  let wh = warehouse().await;
  let result = wh
    .raw_conn()
    .call(|conn| {
      conn.execute(
        "INSERT INTO weather_fact (StationID, DateID) VALUES (99, 99)",
        [],
      )?;
      Ok(())
    })
    .await;
  assert!(result.is_err(), "dangling fact keys must be rejected");
}

// ─── Positional load ─────────────────────────────────────────────────────────

#[tokio::test]
async fn positional_counts_equal_source_rows() {
  let wh = warehouse().await;
  let records = vec![
    record("S1", "Alpha", (2020, 1, 1)),
    record("S1", "Alpha", (2020, 1, 2)),
    record("S2", "Beta", (2020, 1, 1)),
  ];
  let summary = wh.load(records, KeyPolicy::Positional).await.unwrap();
  assert_eq!(summary.source_records, 3);
  assert_eq!(summary.stations, 3);
  assert_eq!(summary.dates, 3);
  assert_eq!(summary.observations, 3);

  let counts = wh.table_counts().await.unwrap();
  assert_eq!((counts.stations, counts.dates, counts.observations), (3, 3, 3));
}

#[tokio::test]
async fn single_record_gets_key_one_everywhere() {
  let wh = warehouse().await;
  wh.load(vec![record("S1", "Alpha", (2020, 1, 1))], KeyPolicy::Positional)
    .await
    .unwrap();

  let frame = wh.query_joined().await.unwrap();
  assert_eq!(frame.len(), 1);

  let row = &frame.rows[0];
  assert_eq!(row.station_id, 1);
  assert_eq!(row.date_id, 1);
  assert_eq!(row.station_code, "S1");
  assert_eq!(row.name, "Alpha");
  assert_eq!(row.latitude, Some(10.0));
  assert_eq!(row.longitude, Some(20.0));
  assert_eq!(row.elevation, Some(5.0));
  assert_eq!(row.country.as_deref(), Some("US"));
  assert_eq!(row.date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
  assert_eq!((row.year, row.month, row.day), (2020, 1, 1));
  assert_eq!(row.measures.tmax, Some(15.0));
  assert_eq!(row.measures.prcp, None);
}

#[tokio::test]
async fn positional_does_not_dedup_repeated_stations() {
  let wh = warehouse().await;
  let records = vec![
    record("S1", "Alpha", (2020, 1, 1)),
    record("S1", "Alpha", (2020, 1, 2)),
  ];
  wh.load(records, KeyPolicy::Positional).await.unwrap();

  // Same station code twice → two dimension rows.
  let counts = wh.table_counts().await.unwrap();
  assert_eq!(counts.stations, 2);

  let frame = wh.query_joined().await.unwrap();
  let keys: Vec<(i64, i64)> =
    frame.rows.iter().map(|r| (r.station_id, r.date_id)).collect();
  assert_eq!(keys, vec![(1, 1), (2, 2)]);
}

// ─── Natural-key load ────────────────────────────────────────────────────────

#[tokio::test]
async fn natural_key_dedups_stations_and_dates() {
  let wh = warehouse().await;
  let records = vec![
    record("S1", "Alpha", (2020, 1, 1)),
    record("S1", "Alpha", (2020, 1, 2)),
    record("S2", "Beta", (2020, 1, 1)),
  ];
  let summary = wh.load(records, KeyPolicy::NaturalKey).await.unwrap();
  assert_eq!(summary.stations, 2);
  assert_eq!(summary.dates, 2);
  assert_eq!(summary.observations, 3);

  let frame = wh.query_joined().await.unwrap();
  assert_eq!(frame.len(), 3);

  // Both S1 observations reference the same surrogate key.
  let s1_keys: Vec<i64> = frame
    .rows
    .iter()
    .filter(|r| r.station_code == "S1")
    .map(|r| r.station_id)
    .collect();
  assert_eq!(s1_keys.len(), 2);
  assert_eq!(s1_keys[0], s1_keys[1]);
}

#[tokio::test]
async fn natural_key_rejects_duplicate_observation() {
  let wh = warehouse().await;
  let records = vec![
    record("S1", "Alpha", (2020, 1, 1)),
    record("S1", "Alpha", (2020, 1, 1)),
  ];
  let err = wh.load(records, KeyPolicy::NaturalKey).await.unwrap_err();
  match err {
    Error::Load(LoadFailure::Insert { table, record, .. }) => {
      assert_eq!(table, "weather_fact");
      assert_eq!(record, 1);
    }
    other => panic!("unexpected error: {other}"),
  }
}

// ─── Load failures ───────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_required_field_is_a_load_error() {
  let wh = warehouse().await;
  let mut nameless = record("S2", "Beta", (2020, 1, 2));
  nameless.name = None;

  let records = vec![record("S1", "Alpha", (2020, 1, 1)), nameless];
  let err = wh.load(records, KeyPolicy::Positional).await.unwrap_err();
  match err {
    Error::Load(LoadFailure::Insert { table, record, .. }) => {
      assert_eq!(table, "station_dim");
      assert_eq!(record, 1);
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[tokio::test]
async fn failed_load_leaves_the_warehouse_untouched() {
  let wh = warehouse().await;
  let mut nameless = record("S2", "Beta", (2020, 1, 2));
  nameless.name = None;

  let records = vec![record("S1", "Alpha", (2020, 1, 1)), nameless];
  assert!(wh.load(records, KeyPolicy::Positional).await.is_err());

  let counts = wh.table_counts().await.unwrap();
  assert_eq!((counts.stations, counts.dates, counts.observations), (0, 0, 0));
}

// ─── Nulls & idempotency ─────────────────────────────────────────────────────

#[tokio::test]
async fn null_measures_survive_load_and_query() {
  let wh = warehouse().await;
  let mut r = record("S1", "Alpha", (2020, 1, 1));
  r.measures = Measurements { snow: Some(0.0), ..Default::default() };

  wh.load(vec![r], KeyPolicy::NaturalKey).await.unwrap();
  let frame = wh.query_joined().await.unwrap();

  let m = &frame.rows[0].measures;
  assert_eq!(m.snow, Some(0.0));
  assert_eq!(m.tmax, None);
  assert_eq!(m.pgtm, None);
}

#[tokio::test]
async fn reset_and_reload_produces_identical_counts() {
  let wh = warehouse().await;
  let records = vec![
    record("S1", "Alpha", (2020, 1, 1)),
    record("S2", "Beta", (2020, 1, 2)),
  ];

  wh.load(records.clone(), KeyPolicy::Positional).await.unwrap();
  let first = wh.table_counts().await.unwrap();

  wh.reset_schema().await.unwrap();
  wh.load(records, KeyPolicy::Positional).await.unwrap();
  let second = wh.table_counts().await.unwrap();

  assert_eq!(first, second);
}

// ─── Empty warehouse ─────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_warehouse_queries_to_zero_rows() {
  let wh = warehouse().await;
  let frame = wh.query_joined().await.unwrap();
  assert!(frame.is_empty());
}

#[tokio::test]
async fn query_without_schema_is_a_query_error() {
  let wh = SqliteWarehouse::open_in_memory().await.unwrap();
  // No reset_schema: the tables do not exist yet.
  let err = wh.query_joined().await.unwrap_err();
  assert!(matches!(err, Error::Query(_)));
}
