//! Reference-location resolution
//!
//! Produces the `ResolvedLocation` the destination list is computed from,
//! through an ordered preference chain: manual override, IP geolocation,
//! hardcoded default city. The resolver never fails outward; every
//! degradation is reported through the result itself.

use crate::models::{Coordinate, ResolvedLocation};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Default reference location when everything else fails: Lisbon, Portugal
pub const DEFAULT_COORDINATE: Coordinate = Coordinate {
    latitude: 38.7223,
    longitude: -9.1393,
};
const DEFAULT_CITY: &str = "Lisbon";
const DEFAULT_COUNTRY: &str = "Portugal";

const IP_LOOKUP_URL: &str = "https://ipapi.co/json/";

/// A location the user picked explicitly through the origin-selection UI
#[derive(Debug, Clone)]
pub struct ManualLocation {
    pub coordinate: Coordinate,
    pub city: String,
    pub country: String,
}

/// Successful IP-geolocation lookup
#[derive(Debug, Clone)]
struct IpLocation {
    coordinate: Coordinate,
    city: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    city: Option<String>,
    country_name: Option<String>,
}

/// Service resolving the user's reference location
pub struct LocationResolver {
    http: reqwest::Client,
}

impl LocationResolver {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("EgoTrip/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client for location lookup")?;
        Ok(Self { http })
    }

    /// Resolve a reference location.
    ///
    /// A manual override is used verbatim. Otherwise IP geolocation is
    /// attempted, and any failure degrades to the default city with a
    /// descriptive `error_message`.
    #[tracing::instrument(skip(self, manual))]
    pub async fn resolve(&self, manual: Option<ManualLocation>) -> ResolvedLocation {
        if let Some(chosen) = manual {
            debug!("Using manually chosen location: {}", chosen.city);
            return ResolvedLocation {
                coordinate: chosen.coordinate,
                city: chosen.city,
                country: chosen.country,
                is_default_fallback: false,
                error_message: None,
            };
        }

        Self::from_ip_lookup(self.lookup_ip().await)
    }

    async fn lookup_ip(&self) -> Result<IpLocation> {
        debug!("Resolving location via IP lookup");
        let response: IpApiResponse = self
            .http
            .get(IP_LOOKUP_URL)
            .send()
            .await
            .with_context(|| "IP geolocation request failed")?
            .json()
            .await
            .with_context(|| "Failed to parse IP geolocation response")?;

        let (Some(latitude), Some(longitude)) = (response.latitude, response.longitude) else {
            anyhow::bail!("IP geolocation response is missing coordinates");
        };

        Ok(IpLocation {
            coordinate: Coordinate::new(latitude, longitude),
            city: response.city.unwrap_or_else(|| "Unknown".to_string()),
            country: response.country_name.unwrap_or_else(|| "Unknown".to_string()),
        })
    }

    /// Turn an IP-lookup outcome into a resolved location. Failures
    /// degrade to the default city.
    fn from_ip_lookup(lookup: Result<IpLocation>) -> ResolvedLocation {
        match lookup {
            Ok(found) => {
                debug!(
                    "IP geolocation succeeded: {} at ({}, {})",
                    found.city, found.coordinate.latitude, found.coordinate.longitude
                );
                ResolvedLocation {
                    coordinate: found.coordinate,
                    city: found.city,
                    country: found.country,
                    is_default_fallback: false,
                    error_message: None,
                }
            }
            Err(e) => {
                warn!("IP geolocation failed: {e:#}");
                ResolvedLocation {
                    coordinate: DEFAULT_COORDINATE,
                    city: DEFAULT_CITY.to_string(),
                    country: DEFAULT_COUNTRY.to_string(),
                    is_default_fallback: true,
                    error_message: Some(
                        "Failed to get your location. Using default location instead.".to_string(),
                    ),
                }
            }
        }
    }
}
