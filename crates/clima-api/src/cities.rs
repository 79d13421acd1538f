//! Handlers for `/api/cities` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/api/cities` | Body: `{"idTara","nume","lat","lon"}`; 404 if the country is absent |
//! | `GET`    | `/api/cities` | All cities in id order |
//! | `GET`    | `/api/cities/country/:id` | Cities of one country; empty list if none |
//! | `PUT`    | `/api/cities/:id` | Re-validates the country reference |
//! | `DELETE` | `/api/cities/:id` | Bare 200; 404 if absent |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use clima_core::{
  city::{City, NewCity},
  store::{ClimateStore, StoreError},
  validate::{FieldSpec, FieldType},
};
use serde_json::{Value, json};

use crate::{error::ApiError, extract::parse_body};

const CREATE_FIELDS: &[FieldSpec] = &[
  ("idTara", FieldType::Integer),
  ("nume", FieldType::Text),
  ("lat", FieldType::Number),
  ("lon", FieldType::Number),
];

const UPDATE_FIELDS: &[FieldSpec] = &[
  ("id", FieldType::Integer),
  ("idTara", FieldType::Integer),
  ("nume", FieldType::Text),
  ("lat", FieldType::Number),
  ("lon", FieldType::Number),
];

fn from_store(e: StoreError) -> ApiError {
  match e {
    StoreError::UniqueViolation(_) => {
      ApiError::Conflict("a city with this name already exists".to_owned())
    }
    StoreError::NotFound => ApiError::NotFound("city was not found".to_owned()),
    StoreError::Backend(e) => ApiError::Internal(e.to_string()),
  }
}

/// Referential-integrity check run before any city write.
async fn ensure_country_exists<S>(store: &S, id: i64) -> Result<(), ApiError>
where
  S: ClimateStore,
{
  match store.get_country(id).await.map_err(from_store)? {
    Some(_) => Ok(()),
    None => {
      Err(ApiError::NotFound("city's country was not found".to_owned()))
    }
  }
}

/// `POST /api/cities`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ClimateStore,
{
  let input: NewCity = parse_body(body, CREATE_FIELDS)?;
  ensure_country_exists(store.as_ref(), input.country_id).await?;
  let id = store.create_city(input).await.map_err(from_store)?;
  Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// `GET /api/cities`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<City>>, ApiError>
where
  S: ClimateStore,
{
  let cities = store.list_cities(None).await.map_err(from_store)?;
  Ok(Json(cities))
}

/// `GET /api/cities/country/:id`
pub async fn list_by_country<S>(
  State(store): State<Arc<S>>,
  Path(country_id): Path<i64>,
) -> Result<Json<Vec<City>>, ApiError>
where
  S: ClimateStore,
{
  let cities = store
    .list_cities(Some(country_id))
    .await
    .map_err(from_store)?;
  Ok(Json(cities))
}

/// `PUT /api/cities/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, ApiError>
where
  S: ClimateStore,
{
  let city: City = parse_body(body, UPDATE_FIELDS)?;
  if city.id != id {
    return Err(ApiError::id_mismatch());
  }
  ensure_country_exists(store.as_ref(), city.country_id).await?;
  store.update_city(city).await.map_err(from_store)?;
  Ok(StatusCode::OK)
}

/// `DELETE /api/cities/:id`
pub async fn remove<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: ClimateStore,
{
  store.delete_city(id).await.map_err(from_store)?;
  Ok(StatusCode::OK)
}
