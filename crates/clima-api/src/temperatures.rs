//! Handlers for `/api/temperatures` endpoints — the filtered query surface.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/api/temperatures` | Body: `{"idOras","valoare"}`; timestamp is server-assigned |
//! | `GET`    | `/api/temperatures` | Optional `lat`, `lon`, `from`, `until` filters |
//! | `GET`    | `/api/temperatures/cities/:id` | Optional `from`, `until` |
//! | `GET`    | `/api/temperatures/countries/:id` | Optional `from`, `until` |
//! | `PUT`    | `/api/temperatures/:id` | Patches city reference and value only |
//! | `DELETE` | `/api/temperatures/:id` | Bare 200; 404 if absent |
//!
//! The GET endpoints follow the two-stage query: resolve the eligible city
//! ids (from coordinates, the path city, or the path country's cities), then
//! apply the date range, and hand the composed filter to the store.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use clima_core::{
  query::{CityScope, CoordFilter, DateRange, TemperatureFilter},
  store::{ClimateStore, StoreError},
  temperature::{DailyReading, NewTemperature, TemperaturePatch, TemperatureReading},
  validate::{FieldSpec, FieldType},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{error::ApiError, extract::parse_body};

const CREATE_FIELDS: &[FieldSpec] =
  &[("idOras", FieldType::Integer), ("valoare", FieldType::Number)];

const UPDATE_FIELDS: &[FieldSpec] = &[
  ("id", FieldType::Integer),
  ("idOras", FieldType::Integer),
  ("valoare", FieldType::Number),
];

fn from_store(e: StoreError) -> ApiError {
  match e {
    StoreError::UniqueViolation(_) => ApiError::Conflict(
      "there's already a temperature entry for this city and time".to_owned(),
    ),
    StoreError::NotFound => {
      ApiError::NotFound("temperature entry was not found".to_owned())
    }
    StoreError::Backend(e) => ApiError::Internal(e.to_string()),
  }
}

/// Referential-integrity check run before any reading write.
async fn ensure_city_exists<S>(store: &S, id: i64) -> Result<(), ApiError>
where
  S: ClimateStore,
{
  match store.get_city(id).await.map_err(from_store)? {
    Some(_) => Ok(()),
    None => Err(ApiError::NotFound("city was not found".to_owned())),
  }
}

async fn run_filter<S>(
  store: &S,
  filter: TemperatureFilter,
) -> Result<Json<Vec<DailyReading>>, ApiError>
where
  S: ClimateStore,
{
  let readings = store.find_temperatures(&filter).await.map_err(from_store)?;
  Ok(Json(readings.iter().map(TemperatureReading::to_daily).collect()))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /api/temperatures`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ClimateStore,
{
  let input: NewTemperature = parse_body(body, CREATE_FIELDS)?;
  ensure_city_exists(store.as_ref(), input.city_id).await?;
  let recorded = store.record_temperature(input).await.map_err(from_store)?;
  Ok((StatusCode::CREATED, Json(json!({ "id": recorded.id }))))
}

// ─── Filtered reads ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GlobalParams {
  pub lat:   Option<String>,
  pub lon:   Option<String>,
  pub from:  Option<String>,
  pub until: Option<String>,
}

/// `GET /api/temperatures[?lat=..][&lon=..][&from=..][&until=..]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<GlobalParams>,
) -> Result<Json<Vec<DailyReading>>, ApiError>
where
  S: ClimateStore,
{
  // Coordinates that do not parse as numbers are treated as absent filters,
  // not as errors.
  let coords = CoordFilter {
    latitude:  params.lat.as_deref().and_then(|s| s.parse().ok()),
    longitude: params.lon.as_deref().and_then(|s| s.parse().ok()),
  };
  let range =
    DateRange::parse(params.from.as_deref(), params.until.as_deref())?;

  let scope = if coords.is_empty() {
    CityScope::Any
  } else {
    CityScope::Ids(store.resolve_city_ids(&coords).await.map_err(from_store)?)
  };

  run_filter(store.as_ref(), TemperatureFilter { scope, range }).await
}

#[derive(Debug, Deserialize)]
pub struct RangeParams {
  pub from:  Option<String>,
  pub until: Option<String>,
}

/// `GET /api/temperatures/cities/:id[?from=..][&until=..]`
pub async fn list_by_city<S>(
  State(store): State<Arc<S>>,
  Path(city_id): Path<i64>,
  Query(params): Query<RangeParams>,
) -> Result<Json<Vec<DailyReading>>, ApiError>
where
  S: ClimateStore,
{
  let range =
    DateRange::parse(params.from.as_deref(), params.until.as_deref())?;
  let filter = TemperatureFilter {
    scope: CityScope::Ids(vec![city_id]),
    range,
  };
  run_filter(store.as_ref(), filter).await
}

/// `GET /api/temperatures/countries/:id[?from=..][&until=..]`
///
/// A country with no cities yields an empty candidate set, which is an empty
/// result, not an error.
pub async fn list_by_country<S>(
  State(store): State<Arc<S>>,
  Path(country_id): Path<i64>,
  Query(params): Query<RangeParams>,
) -> Result<Json<Vec<DailyReading>>, ApiError>
where
  S: ClimateStore,
{
  let range =
    DateRange::parse(params.from.as_deref(), params.until.as_deref())?;
  let cities = store
    .list_cities(Some(country_id))
    .await
    .map_err(from_store)?;
  let filter = TemperatureFilter {
    scope: CityScope::Ids(cities.into_iter().map(|c| c.id).collect()),
    range,
  };
  run_filter(store.as_ref(), filter).await
}

// ─── Update / delete ─────────────────────────────────────────────────────────

/// `PUT /api/temperatures/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, ApiError>
where
  S: ClimateStore,
{
  let patch: TemperaturePatch = parse_body(body, UPDATE_FIELDS)?;
  if patch.id != id {
    return Err(ApiError::id_mismatch());
  }
  ensure_city_exists(store.as_ref(), patch.city_id).await?;
  store.update_temperature(patch).await.map_err(from_store)?;
  Ok(StatusCode::OK)
}

/// `DELETE /api/temperatures/:id`
pub async fn remove<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: ClimateStore,
{
  store.delete_temperature(id).await.map_err(from_store)?;
  Ok(StatusCode::OK)
}
