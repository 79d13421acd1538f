//! Query construction for the filtered temperature endpoints.
//!
//! A temperature query is assembled in two stages. First the *scope* is
//! resolved to a set of eligible city ids (from coordinates, a city path id,
//! or a country's cities). Then an optional date range bounds the reading
//! timestamps. The store executes the composed [`TemperatureFilter`] as a
//! single query.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::{Error, Result};

// ─── Scope ───────────────────────────────────────────────────────────────────

/// Exact-match coordinate filter over cities. Latitude and longitude are
/// independently optional; either alone restricts the candidate set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoordFilter {
  pub latitude:  Option<f64>,
  pub longitude: Option<f64>,
}

impl CoordFilter {
  /// True when neither coordinate is given, i.e. no city restriction applies.
  pub fn is_empty(&self) -> bool {
    self.latitude.is_none() && self.longitude.is_none()
  }
}

/// The set of city ids a temperature query is restricted to.
#[derive(Debug, Clone, PartialEq)]
pub enum CityScope {
  /// No restriction — readings from every city are eligible.
  Any,
  /// Only readings from these cities. An empty set yields zero results,
  /// not an error.
  Ids(Vec<i64>),
}

// ─── Date range ──────────────────────────────────────────────────────────────

/// Inclusive calendar-day bounds on reading timestamps, as parsed from the
/// `from`/`until` query parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DateRange {
  pub from:  Option<NaiveDate>,
  pub until: Option<NaiveDate>,
}

impl DateRange {
  /// Parse optional `YYYY-MM-DD` strings into a range.
  pub fn parse(from: Option<&str>, until: Option<&str>) -> Result<Self> {
    Ok(Self {
      from:  from.map(parse_day).transpose()?,
      until: until.map(parse_day).transpose()?,
    })
  }

  /// Lower bound: start of the `from` day (00:00:00 UTC), inclusive.
  pub fn lower_bound(&self) -> Option<DateTime<Utc>> {
    self.from.map(day_start)
  }

  /// Upper bound: start of the `until` day (00:00:00 UTC), inclusive.
  ///
  /// Note the bound sits at the *start* of the day, not its end. A reading
  /// stamped exactly at `until 00:00:00` matches; any later reading on that
  /// same day does not.
  pub fn upper_bound(&self) -> Option<DateTime<Utc>> {
    self.until.map(day_start)
  }
}

fn parse_day(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|_| Error::InvalidDate(s.to_owned()))
}

fn day_start(day: NaiveDate) -> DateTime<Utc> {
  day.and_time(NaiveTime::MIN).and_utc()
}

// ─── Composite filter ────────────────────────────────────────────────────────

/// The composed filter executed against the temperatures collection:
/// (city id in scope, if restricted) AND (timestamp within range, if bounded).
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureFilter {
  pub scope: CityScope,
  pub range: DateRange,
}

impl TemperatureFilter {
  /// A filter with no restrictions at all — every reading matches.
  pub fn unbounded() -> Self {
    Self { scope: CityScope::Any, range: DateRange::default() }
  }
}
