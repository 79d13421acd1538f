//! City — belongs to a country; city names are unique per country.

use serde::{Deserialize, Serialize};

/// A city as stored and as returned by the `/api/cities` endpoints.
///
/// `country_id` must reference an existing country at the time of write.
/// The reference is not re-checked afterwards: deleting the country leaves
/// the city in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
  pub id:         i64,
  #[serde(rename = "idTara")]
  pub country_id: i64,
  #[serde(rename = "nume")]
  pub name:       String,
  #[serde(rename = "lat")]
  pub latitude:   f64,
  #[serde(rename = "lon")]
  pub longitude:  f64,
}

/// Input for city creation; the id is assigned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCity {
  #[serde(rename = "idTara")]
  pub country_id: i64,
  #[serde(rename = "nume")]
  pub name:       String,
  #[serde(rename = "lat")]
  pub latitude:   f64,
  #[serde(rename = "lon")]
  pub longitude:  f64,
}
