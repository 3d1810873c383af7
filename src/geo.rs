//! Great-circle distance and flight-time estimation

use crate::models::Coordinate;
use haversine::{Location as HaversineLocation, Units, distance};

/// Average commercial cruise speed in km/h
const CRUISE_SPEED_KMH: f64 = 800.0;

/// Fixed overhead for takeoff, landing and airport procedures, in hours
const GROUND_OVERHEAD_HOURS: f64 = 1.0;

/// Great-circle distance between two coordinates in kilometers
/// (Haversine, Earth radius 6371 km).
#[must_use]
pub fn distance_km(from: &Coordinate, to: &Coordinate) -> f64 {
    let from_haversine = HaversineLocation {
        latitude: from.latitude,
        longitude: from.longitude,
    };
    let to_haversine = HaversineLocation {
        latitude: to.latitude,
        longitude: to.longitude,
    };
    distance(from_haversine, to_haversine, Units::Kilometers)
}

/// Coarse flight-time estimate in hours for a given distance.
///
/// Cruise at 800 km/h plus one hour of ground overhead, rounded to the
/// nearest half hour. Not a routing calculation; the result is never
/// below 1.0.
#[must_use]
pub fn flight_time_hours(distance_km: f64) -> f64 {
    let total = distance_km / CRUISE_SPEED_KMH + GROUND_OVERHEAD_HOURS;
    let rounded = (total * 2.0).round() / 2.0;
    rounded.max(1.0)
}
