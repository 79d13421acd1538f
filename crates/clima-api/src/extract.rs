//! Shared request-body handling for the JSON endpoints.

use axum::{Json, extract::rejection::JsonRejection};
use clima_core::validate::{FieldSpec, check_fields};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Parse and validate a JSON request body.
///
/// An absent, unparseable, or non-object body reports the missing-fields
/// message, the same as an empty payload. Field presence and types are
/// checked against `spec` before deserialising into the target type, so the
/// caller gets the precise 400 message for whichever stage failed.
pub fn parse_body<T: DeserializeOwned>(
  body: Result<Json<Value>, JsonRejection>,
  spec: &[FieldSpec],
) -> Result<T, ApiError> {
  let Json(value) = body.map_err(|_| ApiError::missing_fields())?;
  let payload = value.as_object().ok_or_else(ApiError::missing_fields)?;
  check_fields(payload, spec)?;
  serde_json::from_value(value).map_err(|_| ApiError::wrong_types())
}
