//! JSON REST API for clima.
//!
//! Exposes an axum [`Router`] backed by any
//! [`clima_core::store::ClimateStore`]. TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = clima_api::api_router(Arc::new(store));
//! ```

pub mod cities;
pub mod countries;
pub mod error;
pub mod temperatures;

mod extract;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, put},
};
use clima_core::store::ClimateStore;
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` with
/// `CLIMA_*` environment overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String {
  "0.0.0.0".to_owned()
}

fn default_port() -> u16 {
  5000
}

fn default_store_path() -> PathBuf {
  PathBuf::from("clima.db")
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ClimateStore + 'static,
{
  Router::new()
    // Countries
    .route(
      "/api/countries",
      get(countries::list::<S>).post(countries::create::<S>),
    )
    .route(
      "/api/countries/{id}",
      put(countries::update::<S>).delete(countries::remove::<S>),
    )
    // Cities
    .route("/api/cities", get(cities::list::<S>).post(cities::create::<S>))
    .route("/api/cities/country/{id}", get(cities::list_by_country::<S>))
    .route(
      "/api/cities/{id}",
      put(cities::update::<S>).delete(cities::remove::<S>),
    )
    // Temperatures
    .route(
      "/api/temperatures",
      get(temperatures::list::<S>).post(temperatures::create::<S>),
    )
    .route(
      "/api/temperatures/cities/{id}",
      get(temperatures::list_by_city::<S>),
    )
    .route(
      "/api/temperatures/countries/{id}",
      get(temperatures::list_by_country::<S>),
    )
    .route(
      "/api/temperatures/{id}",
      put(temperatures::update::<S>).delete(temperatures::remove::<S>),
    )
    .with_state(store)
}
