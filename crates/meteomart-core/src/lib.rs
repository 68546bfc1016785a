//! Core types and trait definitions for the meteomart weather warehouse.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod chart;
pub mod error;
pub mod filter;
pub mod frame;
pub mod measure;
pub mod period;
pub mod record;
pub mod warehouse;

pub use error::{Error, Result};
