//! End-to-end pipeline tests for the EgoTrip library
//!
//! These run entirely offline: with no weather API key configured, the
//! fetcher degrades to the synthetic generator, which exercises the same
//! fan-out, join and filter paths as live data.

use std::time::Duration;

use egotrip::cache::TtlCache;
use egotrip::catalog;
use egotrip::config::WeatherConfig;
use egotrip::enrich::enrich_destinations;
use egotrip::filter;
use egotrip::geo;
use egotrip::models::{Coordinate, FilterCriteria, ResolvedLocation, SortKey};
use egotrip::weather::WeatherFetcher;

fn keyless_fetcher(label: &str) -> WeatherFetcher {
    let dir = std::env::temp_dir().join(format!(
        "egotrip-pipeline-test-{label}-{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    let cache = TtlCache::open(&dir).expect("cache opens in temp dir");
    let config = WeatherConfig {
        api_key: None,
        base_url: "https://api.openweathermap.org/data/2.5/forecast".to_string(),
        timeout_seconds: 5,
    };
    WeatherFetcher::new(&config, cache, Duration::from_secs(3600)).expect("fetcher builds")
}

fn lisbon() -> ResolvedLocation {
    ResolvedLocation {
        coordinate: Coordinate::new(38.7223, -9.1393),
        city: "Lisbon".to_string(),
        country: "Portugal".to_string(),
        is_default_fallback: true,
        error_message: None,
    }
}

#[tokio::test]
async fn enriched_list_always_carries_three_forecast_days() {
    let fetcher = keyless_fetcher("three-days");
    let enriched = enrich_destinations(&fetcher, &catalog::DESTINATIONS, &lisbon()).await;

    assert_eq!(enriched.len(), 20);
    for item in &enriched {
        assert_eq!(item.live_forecast.len(), 3);
        assert!(item.flight_time_hours >= 1.0);
    }
}

#[tokio::test]
async fn synthetic_weather_stays_in_range_and_flags_first_day() {
    let fetcher = keyless_fetcher("synthetic");
    let enriched = enrich_destinations(&fetcher, &catalog::DESTINATIONS, &lisbon()).await;

    for item in &enriched {
        assert!(item.using_fallback_weather);
        for day in &item.live_forecast {
            assert!((20..=30).contains(&day.temp_c));
        }
        assert!(item.live_forecast[0].error_message.is_some());
        assert!(item.live_forecast[1].error_message.is_none());
        assert!(item.live_forecast[2].error_message.is_none());
    }
}

#[tokio::test]
async fn bali_from_lisbon_is_a_long_haul() {
    let fetcher = keyless_fetcher("bali");
    let enriched = enrich_destinations(&fetcher, &catalog::DESTINATIONS, &lisbon()).await;

    let bali = enriched
        .iter()
        .find(|d| d.destination.name == "Bali")
        .expect("Bali is in the catalog");

    assert!(bali.distance_km > 12_000.0);
    assert!(
        (15.0..=19.0).contains(&bali.flight_time_hours),
        "got {} h",
        bali.flight_time_hours
    );
}

#[tokio::test]
async fn default_filters_keep_only_the_short_sunny_affordable() {
    let fetcher = keyless_fetcher("defaults");
    let enriched = enrich_destinations(&fetcher, &catalog::DESTINATIONS, &lisbon()).await;

    let criteria = FilterCriteria::default();
    let result = filter::apply(&enriched, &criteria, SortKey::FlightTime, "");

    assert!(!result.is_empty(), "Lisbon should reach some escapes in 8 h");
    for item in &result {
        assert!(item.flight_time_hours <= 8.0);
        assert!(item.destination.sunshine_hours >= 6);
        assert!(item.destination.price <= 1000);
    }

    // Sorted ascending by flight time
    for pair in result.windows(2) {
        assert!(pair[0].flight_time_hours <= pair[1].flight_time_hours);
    }
}

#[tokio::test]
async fn search_is_case_insensitive_end_to_end() {
    let fetcher = keyless_fetcher("search");
    let enriched = enrich_destinations(&fetcher, &catalog::DESTINATIONS, &lisbon()).await;

    let wide = FilterCriteria {
        max_flight_time_hours: 100.0,
        min_sunshine_hours: 0,
        max_price: 10_000,
        ..FilterCriteria::default()
    };

    let lower = filter::apply(&enriched, &wide, SortKey::FlightTime, "lisbon");
    let upper = filter::apply(&enriched, &wide, SortKey::FlightTime, "LISBON");
    assert_eq!(lower.len(), 1);
    assert_eq!(
        lower
            .iter()
            .map(|d| d.destination.id)
            .collect::<Vec<_>>(),
        upper.iter().map(|d| d.destination.id).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn nonsense_search_yields_empty_result_without_error() {
    let fetcher = keyless_fetcher("nonsense");
    let enriched = enrich_destinations(&fetcher, &catalog::DESTINATIONS, &lisbon()).await;

    let result = filter::apply(
        &enriched,
        &FilterCriteria::default(),
        SortKey::Sunshine,
        "xyzzy",
    );
    assert!(result.is_empty());
}

#[test]
fn catalog_distances_agree_with_geo_math() {
    let origin = Coordinate::new(38.7223, -9.1393);
    for entry in catalog::COORDINATES.iter() {
        let dist = geo::distance_km(&origin, &entry.coordinate);
        assert!(dist.is_finite());
        assert!(dist >= 0.0);
        assert!(
            geo::flight_time_hours(dist) >= 1.0,
            "{} under the floor",
            entry.name
        );
    }
}
