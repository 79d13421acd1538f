//! [`SqliteStore`] — the SQLite implementation of [`ClimateStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;

use clima_core::{
  city::{City, NewCity},
  country::{Country, NewCountry},
  query::{CityScope, CoordFilter, TemperatureFilter},
  store::{ClimateStore, StoreError, StoreResult},
  temperature::{NewTemperature, TemperaturePatch, TemperatureReading},
};

use crate::{
  encode::{RawReading, encode_dt},
  error::map_db_err,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A clima store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Ids come
/// from SQLite's rowid allocation (`INTEGER PRIMARY KEY` without
/// `AUTOINCREMENT`), which picks `1 + max(existing ids)` atomically with the
/// insert.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(map_db_err)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> StoreResult<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(map_db_err)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> StoreResult<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(map_db_err)
  }

  /// Insert a reading with an explicit timestamp and return it with its
  /// assigned id.
  pub(crate) async fn insert_reading(
    &self,
    input: NewTemperature,
    at: DateTime<Utc>,
  ) -> StoreResult<TemperatureReading> {
    let city_id = input.city_id;
    let value = input.value;
    let at_str = encode_dt(at);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO temperatures (city_id, value, recorded_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![city_id, value, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(map_db_err)?;

    Ok(TemperatureReading { id, city_id, value, recorded_at: at })
  }
}

// ─── ClimateStore impl ───────────────────────────────────────────────────────

impl ClimateStore for SqliteStore {
  // ── Countries ─────────────────────────────────────────────────────────────

  async fn create_country(&self, input: NewCountry) -> StoreResult<i64> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO countries (name, latitude, longitude) VALUES (?1, ?2, ?3)",
          rusqlite::params![input.name, input.latitude, input.longitude],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(map_db_err)
  }

  async fn list_countries(&self) -> StoreResult<Vec<Country>> {
    self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, latitude, longitude FROM countries ORDER BY id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Country {
              id:        row.get(0)?,
              name:      row.get(1)?,
              latitude:  row.get(2)?,
              longitude: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(map_db_err)
  }

  async fn get_country(&self, id: i64) -> StoreResult<Option<Country>> {
    self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, latitude, longitude FROM countries WHERE id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(Country {
                  id:        row.get(0)?,
                  name:      row.get(1)?,
                  latitude:  row.get(2)?,
                  longitude: row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await
      .map_err(map_db_err)
  }

  async fn update_country(&self, country: Country) -> StoreResult<()> {
    let matched = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE countries SET name = ?2, latitude = ?3, longitude = ?4
           WHERE id = ?1",
          rusqlite::params![
            country.id,
            country.name,
            country.latitude,
            country.longitude,
          ],
        )?)
      })
      .await
      .map_err(map_db_err)?;

    if matched == 0 {
      return Err(StoreError::NotFound);
    }
    Ok(())
  }

  async fn delete_country(&self, id: i64) -> StoreResult<()> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM countries WHERE id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await
      .map_err(map_db_err)?;

    if deleted == 0 {
      return Err(StoreError::NotFound);
    }
    Ok(())
  }

  // ── Cities ────────────────────────────────────────────────────────────────

  async fn create_city(&self, input: NewCity) -> StoreResult<i64> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO cities (country_id, name, latitude, longitude)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![
            input.country_id,
            input.name,
            input.latitude,
            input.longitude,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(map_db_err)
  }

  async fn list_cities(&self, country_id: Option<i64>) -> StoreResult<Vec<City>> {
    self
      .conn
      .call(move |conn| {
        let map_row = |row: &rusqlite::Row<'_>| {
          Ok(City {
            id:         row.get(0)?,
            country_id: row.get(1)?,
            name:       row.get(2)?,
            latitude:   row.get(3)?,
            longitude:  row.get(4)?,
          })
        };

        let rows = if let Some(cid) = country_id {
          let mut stmt = conn.prepare(
            "SELECT id, country_id, name, latitude, longitude FROM cities
             WHERE country_id = ?1 ORDER BY id",
          )?;
          stmt
            .query_map(rusqlite::params![cid], map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(
            "SELECT id, country_id, name, latitude, longitude FROM cities
             ORDER BY id",
          )?;
          stmt
            .query_map([], map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await
      .map_err(map_db_err)
  }

  async fn get_city(&self, id: i64) -> StoreResult<Option<City>> {
    self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, country_id, name, latitude, longitude FROM cities
               WHERE id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(City {
                  id:         row.get(0)?,
                  country_id: row.get(1)?,
                  name:       row.get(2)?,
                  latitude:   row.get(3)?,
                  longitude:  row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await
      .map_err(map_db_err)
  }

  async fn update_city(&self, city: City) -> StoreResult<()> {
    let matched = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE cities SET country_id = ?2, name = ?3, latitude = ?4,
           longitude = ?5 WHERE id = ?1",
          rusqlite::params![
            city.id,
            city.country_id,
            city.name,
            city.latitude,
            city.longitude,
          ],
        )?)
      })
      .await
      .map_err(map_db_err)?;

    if matched == 0 {
      return Err(StoreError::NotFound);
    }
    Ok(())
  }

  async fn delete_city(&self, id: i64) -> StoreResult<()> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .execute("DELETE FROM cities WHERE id = ?1", rusqlite::params![id])?,
        )
      })
      .await
      .map_err(map_db_err)?;

    if deleted == 0 {
      return Err(StoreError::NotFound);
    }
    Ok(())
  }

  async fn resolve_city_ids(&self, coords: &CoordFilter) -> StoreResult<Vec<i64>> {
    let coords = *coords;
    self
      .conn
      .call(move |conn| {
        // Build the WHERE clause from whichever coordinates are present.
        let mut conds: Vec<String> = vec![];
        let mut values: Vec<rusqlite::types::Value> = vec![];

        if let Some(lat) = coords.latitude {
          values.push(lat.into());
          conds.push(format!("latitude = ?{}", values.len()));
        }
        if let Some(lon) = coords.longitude {
          values.push(lon.into());
          conds.push(format!("longitude = ?{}", values.len()));
        }

        let where_clause = if conds.is_empty() {
          String::new()
        } else {
          format!("WHERE {}", conds.join(" AND "))
        };

        let sql = format!("SELECT id FROM cities {where_clause} ORDER BY id");
        let mut stmt = conn.prepare(&sql)?;
        let ids = stmt
          .query_map(rusqlite::params_from_iter(values), |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<i64>>>()?;
        Ok(ids)
      })
      .await
      .map_err(map_db_err)
  }

  // ── Temperature readings ──────────────────────────────────────────────────

  async fn record_temperature(
    &self,
    input: NewTemperature,
  ) -> StoreResult<TemperatureReading> {
    self.insert_reading(input, Utc::now()).await
  }

  async fn find_temperatures(
    &self,
    filter: &TemperatureFilter,
  ) -> StoreResult<Vec<TemperatureReading>> {
    // An explicitly empty candidate set matches nothing.
    if let CityScope::Ids(ids) = &filter.scope {
      if ids.is_empty() {
        return Ok(vec![]);
      }
    }

    let scope = filter.scope.clone();
    let lower = filter.range.lower_bound().map(encode_dt);
    let upper = filter.range.upper_bound().map(encode_dt);

    let raws: Vec<RawReading> = self
      .conn
      .call(move |conn| {
        let mut conds: Vec<String> = vec![];
        let mut values: Vec<rusqlite::types::Value> = vec![];

        if let CityScope::Ids(ids) = &scope {
          let placeholders: Vec<String> =
            (1..=ids.len()).map(|i| format!("?{i}")).collect();
          conds.push(format!("city_id IN ({})", placeholders.join(", ")));
          values.extend(ids.iter().map(|&id| rusqlite::types::Value::from(id)));
        }
        if let Some(lo) = lower {
          values.push(lo.into());
          conds.push(format!("recorded_at >= ?{}", values.len()));
        }
        if let Some(hi) = upper {
          values.push(hi.into());
          conds.push(format!("recorded_at <= ?{}", values.len()));
        }

        let where_clause = if conds.is_empty() {
          String::new()
        } else {
          format!("WHERE {}", conds.join(" AND "))
        };

        let sql = format!(
          "SELECT id, city_id, value, recorded_at FROM temperatures
           {where_clause} ORDER BY id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(values), |row| {
            Ok(RawReading {
              id:          row.get(0)?,
              city_id:     row.get(1)?,
              value:       row.get(2)?,
              recorded_at: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(map_db_err)?;

    raws.into_iter().map(RawReading::into_reading).collect()
  }

  async fn update_temperature(&self, patch: TemperaturePatch) -> StoreResult<()> {
    let matched = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE temperatures SET city_id = ?2, value = ?3 WHERE id = ?1",
          rusqlite::params![patch.id, patch.city_id, patch.value],
        )?)
      })
      .await
      .map_err(map_db_err)?;

    if matched == 0 {
      return Err(StoreError::NotFound);
    }
    Ok(())
  }

  async fn delete_temperature(&self, id: i64) -> StoreResult<()> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM temperatures WHERE id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await
      .map_err(map_db_err)?;

    if deleted == 0 {
      return Err(StoreError::NotFound);
    }
    Ok(())
  }
}
