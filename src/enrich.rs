//! Destination list builder
//!
//! Joins the static catalog with computed flight times and per-destination
//! weather. Weather fetches fan out concurrently and are joined once all
//! settle; a single destination degrading to synthetic data never affects
//! its siblings. The list is rebuilt wholesale whenever the reference
//! location changes.

use crate::catalog;
use crate::geo;
use crate::models::{Destination, EnrichedDestination, ResolvedLocation};
use crate::weather::{ForecastQuery, WeatherFetcher};
use futures::future::join_all;
use tracing::{debug, warn};

/// Build the enriched destination list for a reference location.
#[tracing::instrument(skip_all, fields(origin = %origin.origin_description()))]
pub async fn enrich_destinations(
    fetcher: &WeatherFetcher,
    destinations: &[Destination],
    origin: &ResolvedLocation,
) -> Vec<EnrichedDestination> {
    let builds = destinations
        .iter()
        .map(|dest| enrich_one(fetcher, dest, origin));

    let enriched = join_all(builds).await;
    debug!("Built {} enriched destinations", enriched.len());
    enriched
}

async fn enrich_one(
    fetcher: &WeatherFetcher,
    dest: &Destination,
    origin: &ResolvedLocation,
) -> EnrichedDestination {
    let Some(coordinate) = catalog::coordinate_for(&dest.name, &dest.country) else {
        // No coordinate entry: pass the destination through on its
        // baseline data and surface it as estimated weather.
        warn!("No coordinates found for {}, {}", dest.name, dest.country);
        return EnrichedDestination {
            flight_time_hours: dest.flight_time.max(1.0),
            distance_km: 0.0,
            live_forecast: dest.forecast.clone(),
            using_fallback_weather: true,
            destination: dest.clone(),
        };
    };

    let distance_km = geo::distance_km(&origin.coordinate, &coordinate);
    let flight_time_hours = geo::flight_time_hours(distance_km);

    let fetched = fetcher
        .forecast(&ForecastQuery {
            city: dest.name.clone(),
            country: dest.country.clone(),
            coordinate: Some(coordinate),
        })
        .await;

    EnrichedDestination {
        flight_time_hours,
        distance_km,
        live_forecast: fetched.days,
        using_fallback_weather: fetched.from_fallback,
        destination: dest.clone(),
    }
}
