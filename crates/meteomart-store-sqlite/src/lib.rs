//! SQLite backend for the meteomart weather warehouse.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! pool without blocking the async runtime.

mod decode;
mod schema;
mod warehouse;

pub mod error;

pub use error::{Error, LoadFailure, Result};
pub use warehouse::{SqliteWarehouse, TableCounts};

#[cfg(test)]
mod tests;
