//! Destination catalog records and the filter/sort criteria applied to them

use crate::models::forecast::{DailyForecast, ForecastDay};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Editorial popularity classification of a destination.
///
/// Used only for filtering and display; never computed from live signals.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Exclusivity {
    Undiscovered,
    Emerging,
    Popular,
    Mainstream,
}

impl fmt::Display for Exclusivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Exclusivity::Undiscovered => "undiscovered",
            Exclusivity::Emerging => "emerging",
            Exclusivity::Popular => "popular",
            Exclusivity::Mainstream => "mainstream",
        };
        write!(f, "{label}")
    }
}

impl FromStr for Exclusivity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "undiscovered" => Ok(Exclusivity::Undiscovered),
            "emerging" => Ok(Exclusivity::Emerging),
            "popular" => Ok(Exclusivity::Popular),
            "mainstream" => Ok(Exclusivity::Mainstream),
            other => Err(format!("unknown exclusivity tier: {other}")),
        }
    }
}

/// A workspace a guest can be photographed in while "working"
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Workspace {
    pub name: String,
    /// e.g. "Beach club", "Rooftop café"
    pub kind: String,
    /// 1-5, editorial
    pub wifi_rating: u8,
}

/// Static catalog record. Read-only reference data; never created or
/// destroyed at runtime.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Destination {
    pub id: u32,
    pub name: String,
    pub country: String,
    pub region: String,
    pub image_url: String,
    /// Base price of a week-long "strategy offsite", EUR
    pub price: u32,
    /// Baseline flight time in hours, replaced during enrichment
    pub flight_time: f64,
    /// Baseline daily sunshine hours
    pub sunshine_hours: u32,
    pub exclusivity: Exclusivity,
    pub description: String,
    pub best_time_to_visit: String,
    pub currency: String,
    /// Baseline forecast used when no coordinate entry exists
    pub forecast: DailyForecast,
    pub workspaces: Vec<Workspace>,
    /// Pre-drafted out-of-office cover stories
    pub alibis: Vec<String>,
}

/// A destination joined with computed travel info and (live or synthetic)
/// weather. Rebuilt from scratch whenever the reference location changes.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EnrichedDestination {
    #[serde(flatten)]
    pub destination: Destination,
    /// Derived flight time in hours; always >= 1.0
    pub flight_time_hours: f64,
    /// Great-circle distance from the reference location
    pub distance_km: f64,
    /// Live weather when available, synthetic or baseline otherwise
    pub live_forecast: DailyForecast,
    pub using_fallback_weather: bool,
}

impl EnrichedDestination {
    /// First forecast day with an error annotation, if any
    #[must_use]
    pub fn weather_error(&self) -> Option<&ForecastDay> {
        self.live_forecast
            .iter()
            .find(|day| day.error_message.is_some())
    }
}

/// User-adjustable filter criteria.
///
/// Defaults mirror the filter panel's initial state: 8 h flight radius,
/// 6 h minimum sunshine, 1000 EUR ceiling, no tier or region restriction.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FilterCriteria {
    pub max_flight_time_hours: f64,
    pub min_sunshine_hours: u32,
    pub max_price: u32,
    /// Empty means every tier is acceptable
    pub exclusivity: Vec<Exclusivity>,
    /// Empty means every region is acceptable
    pub regions: Vec<String>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            max_flight_time_hours: 8.0,
            min_sunshine_hours: 6,
            max_price: 1000,
            exclusivity: Vec::new(),
            regions: Vec::new(),
        }
    }
}

/// Sort order for the destination list
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Flight time, ascending
    #[default]
    FlightTime,
    /// Sunshine hours, descending
    Sunshine,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flight_time" | "flighttime" => Ok(SortKey::FlightTime),
            "sunshine" => Ok(SortKey::Sunshine),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}
