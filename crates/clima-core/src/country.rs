//! Country — the top-level entity of the location hierarchy.
//!
//! Serde renames pin the wire contract: clients send and receive `nume`,
//! `lat` and `lon`, while the Rust side keeps full English names.

use serde::{Deserialize, Serialize};

/// A country as stored and as returned by `GET /api/countries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
  pub id:        i64,
  #[serde(rename = "nume")]
  pub name:      String,
  #[serde(rename = "lat")]
  pub latitude:  f64,
  #[serde(rename = "lon")]
  pub longitude: f64,
}

/// Input for country creation; the id is assigned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCountry {
  #[serde(rename = "nume")]
  pub name:      String,
  #[serde(rename = "lat")]
  pub latitude:  f64,
  #[serde(rename = "lon")]
  pub longitude: f64,
}
