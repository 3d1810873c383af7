//! HTTP API for the EgoTrip pipeline
//!
//! Thin handlers over the library: resolve an origin, build the enriched
//! list, apply the filter layer, and hand out booking URLs. Everything the
//! handlers need lives in [`AppState`]; there is no ambient global.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::booking;
use crate::catalog::{self, SelectableOrigin};
use crate::enrich::enrich_destinations;
use crate::filter;
use crate::models::{
    Coordinate, EnrichedDestination, Exclusivity, FilterCriteria, ResolvedLocation, SortKey,
};
use crate::resolver::{LocationResolver, ManualLocation};
use crate::weather::WeatherFetcher;

/// Shared application state injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<LocationResolver>,
    pub weather: Arc<WeatherFetcher>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/destinations", get(get_destinations))
        .route("/destinations/{id}/booking", get(get_booking))
        .route("/origins", get(get_origins))
        .with_state(state)
}

/// Query parameters for the destination list: optional manual origin,
/// filter overrides, search text and sort key.
#[derive(Debug, Default, Deserialize)]
pub struct DestinationsParams {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub q: Option<String>,
    pub max_flight_time: Option<f64>,
    pub min_sunshine_hours: Option<u32>,
    pub max_price: Option<u32>,
    /// Comma-separated tier names
    pub exclusivity: Option<String>,
    /// Comma-separated region names
    pub regions: Option<String>,
    pub sort: Option<String>,
}

impl DestinationsParams {
    /// Manual origin override, present only when both coordinates are given
    fn manual_location(&self) -> Option<ManualLocation> {
        let (lat, lon) = (self.lat?, self.lon?);
        Some(ManualLocation {
            coordinate: Coordinate::new(lat, lon),
            city: self
                .city
                .clone()
                .unwrap_or_else(|| "Selected location".to_string()),
            country: self.country.clone().unwrap_or_default(),
        })
    }

    fn criteria(&self) -> Result<FilterCriteria, String> {
        let mut criteria = FilterCriteria::default();
        if let Some(hours) = self.max_flight_time {
            criteria.max_flight_time_hours = hours;
        }
        if let Some(hours) = self.min_sunshine_hours {
            criteria.min_sunshine_hours = hours;
        }
        if let Some(price) = self.max_price {
            criteria.max_price = price;
        }
        if let Some(tiers) = &self.exclusivity {
            criteria.exclusivity = tiers
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.parse::<Exclusivity>())
                .collect::<Result<Vec<_>, _>>()?;
        }
        if let Some(regions) = &self.regions {
            criteria.regions = regions
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        Ok(criteria)
    }

    fn sort_key(&self) -> Result<SortKey, String> {
        match &self.sort {
            Some(sort) => sort.parse(),
            None => Ok(SortKey::default()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DestinationsResponse {
    pub origin: ResolvedLocation,
    /// True when at least one destination is showing estimated weather
    pub using_estimated_weather: bool,
    pub destinations: Vec<EnrichedDestination>,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub destination: String,
    pub url: String,
}

async fn get_destinations(
    State(state): State<AppState>,
    Query(params): Query<DestinationsParams>,
) -> Result<Json<DestinationsResponse>, StatusCode> {
    let criteria = params.criteria().map_err(|e| {
        tracing::debug!("Rejected filter params: {e}");
        StatusCode::BAD_REQUEST
    })?;
    let sort = params.sort_key().map_err(|e| {
        tracing::debug!("Rejected sort param: {e}");
        StatusCode::BAD_REQUEST
    })?;

    let origin = state.resolver.resolve(params.manual_location()).await;
    let enriched = enrich_destinations(&state.weather, &catalog::DESTINATIONS, &origin).await;

    let using_estimated_weather = enriched.iter().any(|d| d.using_fallback_weather);
    let destinations = filter::apply(&enriched, &criteria, sort, params.q.as_deref().unwrap_or(""));

    Ok(Json(DestinationsResponse {
        origin,
        using_estimated_weather,
        destinations,
    }))
}

async fn get_origins(Query(params): Query<OriginsParams>) -> Json<Vec<SelectableOrigin>> {
    let matches = catalog::search_origins(params.q.as_deref().unwrap_or(""));
    Json(matches.into_iter().cloned().collect())
}

#[derive(Debug, Default, Deserialize)]
pub struct OriginsParams {
    pub q: Option<String>,
}

async fn get_booking(Path(id): Path<u32>) -> Result<Json<BookingResponse>, StatusCode> {
    let destination = catalog::destination_by_id(id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(BookingResponse {
        destination: destination.name.clone(),
        url: booking::booking_url(destination),
    }))
}
