//! Static destination catalog and the selectable-origin list
//!
//! The catalog ships with the binary as embedded JSON. Destinations and
//! their coordinates live in separate tables joined by exact
//! (name, country); a destination without a coordinate entry is still
//! served, using its baseline data.

use crate::models::{Coordinate, Destination};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static DESTINATIONS_JSON: &str = include_str!("destinations.json");
static COORDINATES_JSON: &str = include_str!("coordinates.json");
static ORIGINS_JSON: &str = include_str!("origins.json");

/// Coordinate table entry, joined to destinations by (name, country)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DestinationCoordinate {
    pub name: String,
    pub country: String,
    pub coordinate: Coordinate,
}

/// A city the user can pick as their manual origin
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SelectableOrigin {
    pub name: String,
    pub country: String,
    pub coordinate: Coordinate,
    pub climate: String,
}

pub static DESTINATIONS: LazyLock<Vec<Destination>> = LazyLock::new(|| {
    serde_json::from_str(DESTINATIONS_JSON).expect("embedded destination data is valid JSON")
});

pub static COORDINATES: LazyLock<Vec<DestinationCoordinate>> = LazyLock::new(|| {
    serde_json::from_str(COORDINATES_JSON).expect("embedded coordinate data is valid JSON")
});

pub static ORIGINS: LazyLock<Vec<SelectableOrigin>> = LazyLock::new(|| {
    serde_json::from_str(ORIGINS_JSON).expect("embedded origin data is valid JSON")
});

/// Look up a destination's coordinate by exact (name, country) match.
#[must_use]
pub fn coordinate_for(name: &str, country: &str) -> Option<Coordinate> {
    COORDINATES
        .iter()
        .find(|entry| entry.name == name && entry.country == country)
        .map(|entry| entry.coordinate)
}

#[must_use]
pub fn destination_by_id(id: u32) -> Option<&'static Destination> {
    DESTINATIONS.iter().find(|dest| dest.id == id)
}

/// Case-insensitive search over the selectable-origin list by city or
/// country name. An empty query returns the full list.
#[must_use]
pub fn search_origins(query: &str) -> Vec<&'static SelectableOrigin> {
    let query = query.trim().to_lowercase();
    ORIGINS
        .iter()
        .filter(|origin| {
            query.is_empty()
                || origin.name.to_lowercase().contains(&query)
                || origin.country.to_lowercase().contains(&query)
        })
        .collect()
}
