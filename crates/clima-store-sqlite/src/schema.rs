//! SQL schema for the clima SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Parent references (`cities.country_id`, `temperatures.city_id`) are
/// checked at the application layer at write time only. They are plain
/// columns here: deleting a country or city does not cascade, and orphaned
/// rows stay queryable.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS countries (
    id        INTEGER PRIMARY KEY,
    name      TEXT NOT NULL UNIQUE,
    latitude  REAL NOT NULL,
    longitude REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS cities (
    id         INTEGER PRIMARY KEY,
    country_id INTEGER NOT NULL,
    name       TEXT NOT NULL,
    latitude   REAL NOT NULL,
    longitude  REAL NOT NULL,
    UNIQUE (country_id, name)
);

CREATE TABLE IF NOT EXISTS temperatures (
    id          INTEGER PRIMARY KEY,
    city_id     INTEGER NOT NULL,
    value       REAL NOT NULL,
    recorded_at TEXT NOT NULL,   -- fixed-precision RFC 3339 UTC; server-assigned
    UNIQUE (city_id, recorded_at)
);

CREATE INDEX IF NOT EXISTS cities_country_idx       ON cities(country_id);
CREATE INDEX IF NOT EXISTS temperatures_city_idx    ON temperatures(city_id);
CREATE INDEX IF NOT EXISTS temperatures_recorded_idx ON temperatures(recorded_at);

PRAGMA user_version = 1;
";
