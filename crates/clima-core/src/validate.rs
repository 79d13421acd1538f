//! Payload validation — presence and type checks for request bodies.
//!
//! Each endpoint declares its required fields as a static spec; the checker
//! reports the first violation it finds. Presence of every field is verified
//! before any type is inspected, so a payload that is both incomplete and
//! mistyped reports the missing field.

use serde_json::{Map, Value};
use thiserror::Error;

/// Expected JSON type for a required field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
  /// A JSON string.
  Text,
  /// Any JSON number; integer and floating-point are interchangeable.
  Number,
  /// A JSON number with no fractional representation. Used for id fields,
  /// which are never floats.
  Integer,
}

/// A required-field spec: field name paired with its expected type.
pub type FieldSpec = (&'static str, FieldType);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
  #[error("missing required field {0:?}")]
  Missing(&'static str),

  #[error("wrong type for field {0:?}")]
  WrongType(&'static str),
}

/// Check `payload` against `spec`. Returns the first violation found, or
/// `Ok(())` when every required field is present with the right type. Fields
/// not named in the spec are ignored.
pub fn check_fields(
  payload: &Map<String, Value>,
  spec: &[FieldSpec],
) -> Result<(), Violation> {
  for (name, _) in spec {
    if !payload.contains_key(*name) {
      return Err(Violation::Missing(name));
    }
  }

  for (name, expected) in spec {
    let value = &payload[*name];
    let ok = match expected {
      FieldType::Text => value.is_string(),
      FieldType::Number => value.is_number(),
      FieldType::Integer => value.is_i64() || value.is_u64(),
    };
    if !ok {
      return Err(Violation::WrongType(name));
    }
  }

  Ok(())
}
