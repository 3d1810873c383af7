//! Geographic coordinate and resolved-location types

use serde::{Deserialize, Serialize};

/// Coordinate pair in decimal degrees (WGS84)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Round coordinates for cache key generation
    #[must_use]
    pub fn rounded(&self, precision: u32) -> (f64, f64) {
        let multiplier = 10_f64.powi(i32::try_from(precision).unwrap_or(4));
        let lat = (self.latitude * multiplier).round() / multiplier;
        let lon = (self.longitude * multiplier).round() / multiplier;
        (lat, lon)
    }
}

/// Reference location the destination list is computed from.
///
/// Produced by the resolver chain and replaced wholesale on every
/// re-resolution; never patched in place.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub coordinate: Coordinate,
    pub city: String,
    pub country: String,
    /// True when the hardcoded default city was used
    pub is_default_fallback: bool,
    /// Human-readable note about a degraded resolution, if any
    pub error_message: Option<String>,
}

impl ResolvedLocation {
    /// Origin label shown to the user, e.g. "Lisbon, Portugal"
    #[must_use]
    pub fn origin_description(&self) -> String {
        if self.country.is_empty() {
            self.city.clone()
        } else {
            format!("{}, {}", self.city, self.country)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_coordinates() {
        let coord = Coordinate::new(38.722_345, -9.139_876);
        let (lat, lon) = coord.rounded(2);
        assert_eq!(lat, 38.72);
        assert_eq!(lon, -9.14);
    }

    #[test]
    fn test_origin_description() {
        let loc = ResolvedLocation {
            coordinate: Coordinate::new(38.7223, -9.1393),
            city: "Lisbon".to_string(),
            country: "Portugal".to_string(),
            is_default_fallback: true,
            error_message: None,
        };
        assert_eq!(loc.origin_description(), "Lisbon, Portugal");

        let bare = ResolvedLocation {
            country: String::new(),
            city: "Current position".to_string(),
            ..loc
        };
        assert_eq!(bare.origin_description(), "Current position");
    }
}
