//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings with fixed microsecond
//! precision, so the lexicographic ordering SQL applies to the column matches
//! chronological order and range predicates can compare strings directly.

use chrono::{DateTime, SecondsFormat, Utc};
use clima_core::{
  store::{StoreError, StoreResult},
  temperature::TemperatureReading,
};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> StoreResult<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| StoreError::Backend(Box::new(e)))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `temperatures` row.
pub struct RawReading {
  pub id:          i64,
  pub city_id:     i64,
  pub value:       f64,
  pub recorded_at: String,
}

impl RawReading {
  pub fn into_reading(self) -> StoreResult<TemperatureReading> {
    Ok(TemperatureReading {
      id:          self.id,
      city_id:     self.city_id,
      value:       self.value,
      recorded_at: decode_dt(&self.recorded_at)?,
    })
  }
}
