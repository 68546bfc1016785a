//! meteomart binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite warehouse, and runs one of three batch/server modes:
//!
//! - `reset` — drop and recreate the warehouse schema.
//! - `load <source.csv>` — rebuild the schema and load an observations file.
//! - `serve` — serve the dashboard JSON API over HTTP.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use meteomart_core::warehouse::{KeyPolicy, Warehouse as _};
use meteomart_store_sqlite::SqliteWarehouse;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Dimensional weather warehouse")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Drop and recreate the warehouse schema. Destroys all loaded data.
  Reset,

  /// Rebuild the schema and load a weather observations file.
  Load {
    /// Delimited source file, one wide row per observation.
    source: PathBuf,

    /// Reproduce the historical positional key assignment (one dimension
    /// row per source record, no dedup) instead of lookup-or-insert by
    /// natural key.
    #[arg(long)]
    positional: bool,
  },

  /// Serve the dashboard JSON API.
  Serve,
}

/// Runtime configuration, deserialised from `config.toml` with
/// `METEOMART_*` environment overrides.
#[derive(Deserialize, Clone)]
struct AppConfig {
  host:           String,
  port:           u16,
  warehouse_path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let config = load_config(&cli.config)?;

  let warehouse_path = expand_tilde(&config.warehouse_path);
  let warehouse = SqliteWarehouse::open(&warehouse_path)
    .await
    .with_context(|| {
      format!("failed to open warehouse at {warehouse_path:?}")
    })?;

  match cli.command {
    Command::Reset => {
      warehouse
        .reset_schema()
        .await
        .context("schema rebuild failed")?;
      tracing::info!(path = ?warehouse_path, "warehouse schema rebuilt");
    }

    Command::Load { source, positional } => {
      let records = meteomart_ingest::read_path(&source)
        .with_context(|| format!("failed to read {source:?}"))?;
      tracing::info!(records = records.len(), "source file read");

      // Every load is a destructive full rebuild, not an append.
      warehouse
        .reset_schema()
        .await
        .context("schema rebuild failed")?;

      let policy = if positional {
        KeyPolicy::Positional
      } else {
        KeyPolicy::NaturalKey
      };
      let summary = warehouse
        .load(records, policy)
        .await
        .context("load failed")?;
      tracing::info!(
        stations = summary.stations,
        dates = summary.dates,
        observations = summary.observations,
        "warehouse loaded"
      );
    }

    Command::Serve => {
      let app = axum::Router::new()
        .nest("/api", meteomart_api::api_router(Arc::new(warehouse)))
        .layer(TraceLayer::new_for_http());

      let address = format!("{}:{}", config.host, config.port);
      tracing::info!("Listening on http://{address}");
      let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
      axum::serve(listener, app).await.context("server error")?;
    }
  }

  Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
  let settings = config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8050)?
    .set_default("warehouse_path", "meteomart.db")?
    .add_source(config::File::from(path.to_path_buf()).required(false))
    .add_source(config::Environment::with_prefix("METEOMART"))
    .build()
    .context("failed to read config file")?;

  settings
    .try_deserialize()
    .context("failed to deserialise AppConfig")
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
