//! Handlers for `/api/countries` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/api/countries` | Body: `{"nume","lat","lon"}`; returns 201 + `{"id"}` |
//! | `GET`    | `/api/countries` | All countries in id order |
//! | `PUT`    | `/api/countries/:id` | Body id must equal path id; bare 200 |
//! | `DELETE` | `/api/countries/:id` | Bare 200; 404 if absent |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use clima_core::{
  country::{Country, NewCountry},
  store::{ClimateStore, StoreError},
  validate::{FieldSpec, FieldType},
};
use serde_json::{Value, json};

use crate::{error::ApiError, extract::parse_body};

const CREATE_FIELDS: &[FieldSpec] = &[
  ("nume", FieldType::Text),
  ("lat", FieldType::Number),
  ("lon", FieldType::Number),
];

const UPDATE_FIELDS: &[FieldSpec] = &[
  ("id", FieldType::Integer),
  ("nume", FieldType::Text),
  ("lat", FieldType::Number),
  ("lon", FieldType::Number),
];

fn from_store(e: StoreError) -> ApiError {
  match e {
    StoreError::UniqueViolation(_) => {
      ApiError::Conflict("a country with this name already exists".to_owned())
    }
    StoreError::NotFound => {
      ApiError::NotFound("country was not found".to_owned())
    }
    StoreError::Backend(e) => ApiError::Internal(e.to_string()),
  }
}

/// `POST /api/countries`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ClimateStore,
{
  let input: NewCountry = parse_body(body, CREATE_FIELDS)?;
  let id = store.create_country(input).await.map_err(from_store)?;
  Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// `GET /api/countries`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Country>>, ApiError>
where
  S: ClimateStore,
{
  let countries = store.list_countries().await.map_err(from_store)?;
  Ok(Json(countries))
}

/// `PUT /api/countries/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, ApiError>
where
  S: ClimateStore,
{
  let country: Country = parse_body(body, UPDATE_FIELDS)?;
  if country.id != id {
    return Err(ApiError::id_mismatch());
  }
  store.update_country(country).await.map_err(from_store)?;
  Ok(StatusCode::OK)
}

/// `DELETE /api/countries/:id`
pub async fn remove<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: ClimateStore,
{
  store.delete_country(id).await.map_err(from_store)?;
  Ok(StatusCode::OK)
}
