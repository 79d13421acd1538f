//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{TimeZone, Utc};
use clima_core::{
  city::NewCity,
  country::{Country, NewCountry},
  query::{CityScope, CoordFilter, DateRange, TemperatureFilter},
  store::{ClimateStore, StoreError},
  temperature::{NewTemperature, TemperaturePatch},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn country(name: &str) -> NewCountry {
  NewCountry { name: name.into(), latitude: 45.9, longitude: 24.9 }
}

fn city(country_id: i64, name: &str, lat: f64, lon: f64) -> NewCity {
  NewCity {
    country_id,
    name: name.into(),
    latitude: lat,
    longitude: lon,
  }
}

fn reading(city_id: i64, value: f64) -> NewTemperature {
  NewTemperature { city_id, value }
}

async fn reading_at(
  s: &SqliteStore,
  city_id: i64,
  value: f64,
  ymd_hms: (i32, u32, u32, u32, u32, u32),
) -> i64 {
  let (y, mo, d, h, mi, sec) = ymd_hms;
  let at = Utc.with_ymd_and_hms(y, mo, d, h, mi, sec).unwrap();
  s.insert_reading(reading(city_id, value), at)
    .await
    .unwrap()
    .id
}

// ─── Id allocation ───────────────────────────────────────────────────────────

#[tokio::test]
async fn ids_are_sequential_from_one() {
  let s = store().await;

  assert_eq!(s.create_country(country("Romania")).await.unwrap(), 1);
  assert_eq!(s.create_country(country("France")).await.unwrap(), 2);
  assert_eq!(s.create_country(country("Spain")).await.unwrap(), 3);
}

#[tokio::test]
async fn id_after_delete_is_max_plus_one() {
  let s = store().await;

  s.create_country(country("Romania")).await.unwrap();
  s.create_country(country("France")).await.unwrap();
  let last = s.create_country(country("Spain")).await.unwrap();
  s.delete_country(last).await.unwrap();

  // The freed id is reused: 1 + max(existing ids).
  assert_eq!(s.create_country(country("Italy")).await.unwrap(), 3);
}

#[tokio::test]
async fn each_collection_counts_independently() {
  let s = store().await;

  let ro = s.create_country(country("Romania")).await.unwrap();
  s.create_country(country("France")).await.unwrap();

  assert_eq!(s.create_city(city(ro, "Cluj", 46.7, 23.6)).await.unwrap(), 1);
  assert_eq!(s.record_temperature(reading(1, 20.0)).await.unwrap().id, 1);
}

// ─── Uniqueness ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_country_name_is_a_unique_violation() {
  let s = store().await;

  s.create_country(country("Romania")).await.unwrap();
  let err = s
    .create_country(NewCountry {
      name:      "Romania".into(),
      latitude:  1.0,
      longitude: 2.0,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, StoreError::UniqueViolation(_)));
}

#[tokio::test]
async fn city_names_are_unique_per_country_only() {
  let s = store().await;

  let ro = s.create_country(country("Romania")).await.unwrap();
  let fr = s.create_country(country("France")).await.unwrap();

  s.create_city(city(ro, "Cluj", 46.7, 23.6)).await.unwrap();
  let err = s
    .create_city(city(ro, "Cluj", 0.0, 0.0))
    .await
    .unwrap_err();
  assert!(matches!(err, StoreError::UniqueViolation(_)));

  // Same name under a different country is fine.
  s.create_city(city(fr, "Cluj", 0.0, 0.0)).await.unwrap();
}

#[tokio::test]
async fn duplicate_city_timestamp_is_a_unique_violation() {
  let s = store().await;

  let ro = s.create_country(country("Romania")).await.unwrap();
  let cluj = s.create_city(city(ro, "Cluj", 46.7, 23.6)).await.unwrap();

  let at = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
  s.insert_reading(reading(cluj, 20.0), at).await.unwrap();
  let err = s.insert_reading(reading(cluj, 21.0), at).await.unwrap_err();
  assert!(matches!(err, StoreError::UniqueViolation(_)));
}

#[tokio::test]
async fn rename_to_existing_country_name_is_a_unique_violation() {
  let s = store().await;

  s.create_country(country("Romania")).await.unwrap();
  let fr = s.create_country(country("France")).await.unwrap();

  let err = s
    .update_country(Country {
      id:        fr,
      name:      "Romania".into(),
      latitude:  1.0,
      longitude: 2.0,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, StoreError::UniqueViolation(_)));
}

// ─── Updates and deletes ─────────────────────────────────────────────────────

#[tokio::test]
async fn update_missing_country_is_not_found() {
  let s = store().await;
  let err = s
    .update_country(Country {
      id:        99,
      name:      "Atlantis".into(),
      latitude:  0.0,
      longitude: 0.0,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, StoreError::NotFound));
}

#[tokio::test]
async fn delete_missing_is_not_found_and_changes_nothing() {
  let s = store().await;
  s.create_country(country("Romania")).await.unwrap();

  let err = s.delete_country(99).await.unwrap_err();
  assert!(matches!(err, StoreError::NotFound));
  assert_eq!(s.list_countries().await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_country_replaces_fields() {
  let s = store().await;
  let id = s.create_country(country("Romania")).await.unwrap();

  s.update_country(Country {
    id,
    name:      "România".into(),
    latitude:  45.0,
    longitude: 25.0,
  })
  .await
  .unwrap();

  let got = s.get_country(id).await.unwrap().unwrap();
  assert_eq!(got.name, "România");
  assert_eq!(got.latitude, 45.0);
}

#[tokio::test]
async fn temperature_update_keeps_timestamp() {
  let s = store().await;
  let ro = s.create_country(country("Romania")).await.unwrap();
  let cluj = s.create_city(city(ro, "Cluj", 46.7, 23.6)).await.unwrap();

  let at = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
  let rec = s.insert_reading(reading(cluj, 20.0), at).await.unwrap();

  s.update_temperature(TemperaturePatch {
    id:      rec.id,
    city_id: cluj,
    value:   -3.5,
  })
  .await
  .unwrap();

  let all = s
    .find_temperatures(&TemperatureFilter::unbounded())
    .await
    .unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].value, -3.5);
  assert_eq!(all[0].recorded_at, at);
}

// ─── Orphan tolerance ────────────────────────────────────────────────────────

#[tokio::test]
async fn deleting_a_country_leaves_its_cities() {
  let s = store().await;
  let ro = s.create_country(country("Romania")).await.unwrap();
  s.create_city(city(ro, "Cluj", 46.7, 23.6)).await.unwrap();

  s.delete_country(ro).await.unwrap();

  // The city is orphaned but still listed and queryable.
  let cities = s.list_cities(None).await.unwrap();
  assert_eq!(cities.len(), 1);
  assert_eq!(cities[0].country_id, ro);
}

// ─── Scope resolution ────────────────────────────────────────────────────────

#[tokio::test]
async fn coordinates_match_exactly_and_independently() {
  let s = store().await;
  let ro = s.create_country(country("Romania")).await.unwrap();
  let cluj = s.create_city(city(ro, "Cluj", 46.7, 23.6)).await.unwrap();
  let iasi = s.create_city(city(ro, "Iasi", 47.1, 27.6)).await.unwrap();
  let twin = s.create_city(city(ro, "Twin", 46.7, 27.6)).await.unwrap();

  let lat_only = CoordFilter { latitude: Some(46.7), longitude: None };
  assert_eq!(s.resolve_city_ids(&lat_only).await.unwrap(), vec![cluj, twin]);

  let lon_only = CoordFilter { latitude: None, longitude: Some(27.6) };
  assert_eq!(s.resolve_city_ids(&lon_only).await.unwrap(), vec![iasi, twin]);

  let both = CoordFilter { latitude: Some(46.7), longitude: Some(23.6) };
  assert_eq!(s.resolve_city_ids(&both).await.unwrap(), vec![cluj]);

  let nowhere = CoordFilter { latitude: Some(0.0), longitude: None };
  assert!(s.resolve_city_ids(&nowhere).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_cities_filtered_by_country() {
  let s = store().await;
  let ro = s.create_country(country("Romania")).await.unwrap();
  let fr = s.create_country(country("France")).await.unwrap();
  s.create_city(city(ro, "Cluj", 46.7, 23.6)).await.unwrap();
  s.create_city(city(fr, "Lyon", 45.7, 4.8)).await.unwrap();
  s.create_city(city(ro, "Iasi", 47.1, 27.6)).await.unwrap();

  let romanian = s.list_cities(Some(ro)).await.unwrap();
  assert_eq!(romanian.len(), 2);
  assert!(romanian.iter().all(|c| c.country_id == ro));

  let all = s.list_cities(None).await.unwrap();
  assert_eq!(all.len(), 3);
}

// ─── Temperature filtering ───────────────────────────────────────────────────

#[tokio::test]
async fn empty_candidate_set_yields_no_results() {
  let s = store().await;
  let ro = s.create_country(country("Romania")).await.unwrap();
  let cluj = s.create_city(city(ro, "Cluj", 46.7, 23.6)).await.unwrap();
  s.record_temperature(reading(cluj, 20.0)).await.unwrap();

  let filter = TemperatureFilter {
    scope: CityScope::Ids(vec![]),
    range: DateRange::default(),
  };
  assert!(s.find_temperatures(&filter).await.unwrap().is_empty());
}

#[tokio::test]
async fn scope_restricts_to_listed_cities() {
  let s = store().await;
  let ro = s.create_country(country("Romania")).await.unwrap();
  let cluj = s.create_city(city(ro, "Cluj", 46.7, 23.6)).await.unwrap();
  let iasi = s.create_city(city(ro, "Iasi", 47.1, 27.6)).await.unwrap();

  let a = reading_at(&s, cluj, 20.0, (2024, 1, 5, 12, 0, 0)).await;
  reading_at(&s, iasi, 18.0, (2024, 1, 5, 12, 0, 0)).await;

  let filter = TemperatureFilter {
    scope: CityScope::Ids(vec![cluj]),
    range: DateRange::default(),
  };
  let got = s.find_temperatures(&filter).await.unwrap();
  assert_eq!(got.len(), 1);
  assert_eq!(got[0].id, a);
}

#[tokio::test]
async fn until_bound_is_inclusive_at_midnight_only() {
  let s = store().await;
  let ro = s.create_country(country("Romania")).await.unwrap();
  let cluj = s.create_city(city(ro, "Cluj", 46.7, 23.6)).await.unwrap();

  let day_before = reading_at(&s, cluj, 10.0, (2024, 1, 4, 23, 59, 59)).await;
  let at_midnight = reading_at(&s, cluj, 11.0, (2024, 1, 5, 0, 0, 0)).await;
  reading_at(&s, cluj, 12.0, (2024, 1, 5, 12, 0, 0)).await;

  let filter = TemperatureFilter {
    scope: CityScope::Any,
    range: DateRange::parse(None, Some("2024-01-05")).unwrap(),
  };
  let got = s.find_temperatures(&filter).await.unwrap();
  let ids: Vec<i64> = got.iter().map(|r| r.id).collect();

  // The reading at exactly 00:00:00 of the bound day is included; the one
  // at noon is not.
  assert_eq!(ids, vec![day_before, at_midnight]);
}

#[tokio::test]
async fn from_bound_includes_whole_start_day() {
  let s = store().await;
  let ro = s.create_country(country("Romania")).await.unwrap();
  let cluj = s.create_city(city(ro, "Cluj", 46.7, 23.6)).await.unwrap();

  reading_at(&s, cluj, 10.0, (2024, 1, 4, 23, 59, 59)).await;
  let on_day = reading_at(&s, cluj, 11.0, (2024, 1, 5, 8, 30, 0)).await;
  let later = reading_at(&s, cluj, 12.0, (2024, 1, 7, 0, 0, 0)).await;

  let filter = TemperatureFilter {
    scope: CityScope::Any,
    range: DateRange::parse(Some("2024-01-05"), None).unwrap(),
  };
  let got = s.find_temperatures(&filter).await.unwrap();
  let ids: Vec<i64> = got.iter().map(|r| r.id).collect();
  assert_eq!(ids, vec![on_day, later]);
}

#[tokio::test]
async fn scope_and_range_compose() {
  let s = store().await;
  let ro = s.create_country(country("Romania")).await.unwrap();
  let cluj = s.create_city(city(ro, "Cluj", 46.7, 23.6)).await.unwrap();
  let iasi = s.create_city(city(ro, "Iasi", 47.1, 27.6)).await.unwrap();

  reading_at(&s, cluj, 10.0, (2024, 1, 1, 9, 0, 0)).await;
  let hit = reading_at(&s, cluj, 11.0, (2024, 1, 3, 9, 0, 0)).await;
  reading_at(&s, iasi, 12.0, (2024, 1, 3, 9, 0, 0)).await;
  reading_at(&s, cluj, 13.0, (2024, 1, 9, 9, 0, 0)).await;

  let filter = TemperatureFilter {
    scope: CityScope::Ids(vec![cluj]),
    range: DateRange::parse(Some("2024-01-02"), Some("2024-01-04")).unwrap(),
  };
  let got = s.find_temperatures(&filter).await.unwrap();
  assert_eq!(got.len(), 1);
  assert_eq!(got[0].id, hit);
}

#[tokio::test]
async fn unbounded_filter_returns_everything_in_id_order() {
  let s = store().await;
  let ro = s.create_country(country("Romania")).await.unwrap();
  let cluj = s.create_city(city(ro, "Cluj", 46.7, 23.6)).await.unwrap();

  // Insert out of chronological order; output is id order regardless.
  reading_at(&s, cluj, 20.0, (2024, 2, 1, 0, 0, 0)).await;
  reading_at(&s, cluj, 21.0, (2024, 1, 1, 0, 0, 0)).await;

  let got = s
    .find_temperatures(&TemperatureFilter::unbounded())
    .await
    .unwrap();
  let ids: Vec<i64> = got.iter().map(|r| r.id).collect();
  assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn timestamps_round_trip_through_storage() {
  let s = store().await;
  let ro = s.create_country(country("Romania")).await.unwrap();
  let cluj = s.create_city(city(ro, "Cluj", 46.7, 23.6)).await.unwrap();

  let at = Utc.with_ymd_and_hms(2024, 1, 5, 13, 45, 9).unwrap();
  let rec = s.insert_reading(reading(cluj, 20.0), at).await.unwrap();

  let got = s
    .find_temperatures(&TemperatureFilter::unbounded())
    .await
    .unwrap();
  assert_eq!(got, vec![rec]);
}
