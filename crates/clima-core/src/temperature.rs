//! Temperature readings — the time-series leaf of the hierarchy.
//!
//! A reading's timestamp is assigned by the store at creation and never
//! changes; updates may touch only the city reference and the value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A temperature reading as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureReading {
  pub id:          i64,
  pub city_id:     i64,
  pub value:       f64,
  /// Server-assigned at creation; immutable. Unique per (city, timestamp).
  pub recorded_at: DateTime<Utc>,
}

/// Input for recording a reading; id and timestamp are assigned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTemperature {
  #[serde(rename = "idOras")]
  pub city_id: i64,
  #[serde(rename = "valoare")]
  pub value:   f64,
}

/// Mutable fields of an existing reading. The timestamp is not patchable.
#[derive(Debug, Clone, Deserialize)]
pub struct TemperaturePatch {
  pub id:      i64,
  #[serde(rename = "idOras")]
  pub city_id: i64,
  #[serde(rename = "valoare")]
  pub value:   f64,
}

/// Wire projection of a reading: the timestamp is collapsed to its calendar
/// day, dropping the time-of-day component regardless of what was stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyReading {
  pub id:        i64,
  #[serde(rename = "valoare")]
  pub value:     f64,
  pub timestamp: String,
}

impl TemperatureReading {
  /// Project to the `{id, valoare, timestamp}` shape returned by the
  /// filtered temperature endpoints.
  pub fn to_daily(&self) -> DailyReading {
    DailyReading {
      id:        self.id,
      value:     self.value,
      timestamp: self.recorded_at.format("%Y-%m-%d").to_string(),
    }
  }
}
