//! JSON REST API for the meteomart dashboard.
//!
//! Exposes an axum [`Router`] backed by any
//! [`meteomart_core::warehouse::Warehouse`]. The dashboard front end is an
//! external consumer: this crate serves the query façade's output and the
//! stateless chart transforms, nothing more. Auth, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", meteomart_api::api_router(warehouse.clone()))
//! ```

pub mod charts;
pub mod error;
pub mod filters;
pub mod observations;

use std::sync::Arc;

use axum::{Router, routing::get};
use meteomart_core::warehouse::Warehouse;

pub use error::ApiError;

/// Build a fully-materialised API router for `warehouse`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<W>(warehouse: Arc<W>) -> Router<()>
where
  W: Warehouse + 'static,
{
  Router::new()
    .route("/filters", get(filters::handler::<W>))
    .route("/observations", get(observations::handler::<W>))
    .route("/charts", get(charts::handler::<W>))
    .with_state(warehouse)
}
