//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure maps to a status code plus a `{"error": message}` JSON
//! body. The message strings are part of the wire contract and are reused
//! across handlers via the constructors below.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use clima_core::validate::Violation;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("internal error: {0}")]
  Internal(String),
}

impl ApiError {
  /// 400 — body absent, unparseable, or missing a required field.
  pub fn missing_fields() -> Self {
    Self::BadRequest(
      "invalid data, please include all required fields".to_owned(),
    )
  }

  /// 400 — a required field is present with the wrong type.
  pub fn wrong_types() -> Self {
    Self::BadRequest(
      "invalid data, please use correct data type for required fields"
        .to_owned(),
    )
  }

  /// 400 — the id in a PUT body disagrees with the path id.
  pub fn id_mismatch() -> Self {
    Self::BadRequest(
      "invalid data, please use the same id as in route".to_owned(),
    )
  }
}

impl From<Violation> for ApiError {
  fn from(v: Violation) -> Self {
    match v {
      Violation::Missing(_) => Self::missing_fields(),
      Violation::WrongType(_) => Self::wrong_types(),
    }
  }
}

/// Unparseable `from`/`until` dates surface on the 500 path, keeping the
/// documented failure codes of the filtered GET endpoints.
impl From<clima_core::Error> for ApiError {
  fn from(e: clima_core::Error) -> Self {
    Self::Internal(e.to_string())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m),
      ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
