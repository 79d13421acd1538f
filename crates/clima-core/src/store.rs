//! The `ClimateStore` trait and its typed error.
//!
//! The trait is implemented by storage backends (e.g. `clima-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use thiserror::Error;

use crate::{
  city::{City, NewCity},
  country::{Country, NewCountry},
  query::{CoordFilter, TemperatureFilter},
  temperature::{NewTemperature, TemperaturePatch, TemperatureReading},
};

// ─── Error ───────────────────────────────────────────────────────────────────

/// Outcome classification for store operations.
///
/// Backends must map their driver failures into these variants so that the
/// layers above never inspect error message strings: a duplicate-key failure
/// surfaces as [`UniqueViolation`](StoreError::UniqueViolation), a write that
/// matched no record as [`NotFound`](StoreError::NotFound), and everything
/// else as an opaque [`Backend`](StoreError::Backend) error.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("unique constraint violated: {0}")]
  UniqueViolation(String),

  #[error("no matching record")]
  NotFound,

  #[error("store backend error: {0}")]
  Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a clima storage backend.
///
/// Ids are allocated by the store, atomically with the insert: the id
/// returned by a `create_*` call is `1 + max(existing ids)` (1 when the
/// collection is empty). Uniqueness (country name, city name per country,
/// reading timestamp per city) is enforced by the store's own indexes.
pub trait ClimateStore: Send + Sync {
  // ── Countries ─────────────────────────────────────────────────────────

  /// Persist a new country and return its assigned id.
  fn create_country(
    &self,
    input: NewCountry,
  ) -> impl Future<Output = StoreResult<i64>> + Send + '_;

  /// List all countries in id order.
  fn list_countries(
    &self,
  ) -> impl Future<Output = StoreResult<Vec<Country>>> + Send + '_;

  /// Retrieve a country by id. Returns `None` if not found.
  fn get_country(
    &self,
    id: i64,
  ) -> impl Future<Output = StoreResult<Option<Country>>> + Send + '_;

  /// Replace all mutable fields of the country with `country.id`.
  /// `NotFound` if no such country exists.
  fn update_country(
    &self,
    country: Country,
  ) -> impl Future<Output = StoreResult<()>> + Send + '_;

  /// Delete a country. `NotFound` if no such country exists. Cities under
  /// the country are left in place.
  fn delete_country(
    &self,
    id: i64,
  ) -> impl Future<Output = StoreResult<()>> + Send + '_;

  // ── Cities ────────────────────────────────────────────────────────────

  /// Persist a new city and return its assigned id. The caller is
  /// responsible for checking that the parent country exists.
  fn create_city(
    &self,
    input: NewCity,
  ) -> impl Future<Output = StoreResult<i64>> + Send + '_;

  /// List cities in id order, optionally restricted to one country.
  fn list_cities(
    &self,
    country_id: Option<i64>,
  ) -> impl Future<Output = StoreResult<Vec<City>>> + Send + '_;

  /// Retrieve a city by id. Returns `None` if not found.
  fn get_city(
    &self,
    id: i64,
  ) -> impl Future<Output = StoreResult<Option<City>>> + Send + '_;

  /// Replace all mutable fields of the city with `city.id`.
  fn update_city(
    &self,
    city: City,
  ) -> impl Future<Output = StoreResult<()>> + Send + '_;

  /// Delete a city. Readings for the city are left in place.
  fn delete_city(
    &self,
    id: i64,
  ) -> impl Future<Output = StoreResult<()>> + Send + '_;

  /// Resolve the candidate set for a coordinate filter: ids of cities whose
  /// coordinates exactly match the given latitude and/or longitude.
  fn resolve_city_ids<'a>(
    &'a self,
    coords: &'a CoordFilter,
  ) -> impl Future<Output = StoreResult<Vec<i64>>> + Send + 'a;

  // ── Temperature readings ──────────────────────────────────────────────

  /// Record a reading and return it with its assigned id. The timestamp is
  /// set by the store at the moment of insertion.
  fn record_temperature(
    &self,
    input: NewTemperature,
  ) -> impl Future<Output = StoreResult<TemperatureReading>> + Send + '_;

  /// Execute a composed temperature filter, returning matches in id order.
  fn find_temperatures<'a>(
    &'a self,
    filter: &'a TemperatureFilter,
  ) -> impl Future<Output = StoreResult<Vec<TemperatureReading>>> + Send + 'a;

  /// Update the city reference and value of an existing reading. The
  /// timestamp is immutable and is not touched.
  fn update_temperature(
    &self,
    patch: TemperaturePatch,
  ) -> impl Future<Output = StoreResult<()>> + Send + '_;

  /// Delete a reading. `NotFound` if no such reading exists.
  fn delete_temperature(
    &self,
    id: i64,
  ) -> impl Future<Output = StoreResult<()>> + Send + '_;
}
