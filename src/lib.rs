//! `EgoTrip` - Sunny-escape recommendations for the chronically "in a meeting"
//!
//! This library provides the core pipeline behind the EgoTrip service:
//! location resolution, flight-time estimation, live weather enrichment
//! with graceful fallbacks, and the filter/sort/search layer over the
//! destination catalog.

pub mod api;
pub mod booking;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod enrich;
pub mod error;
pub mod filter;
pub mod geo;
pub mod models;
pub mod resolver;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use cache::TtlCache;
pub use config::EgoTripConfig;
pub use error::EgoTripError;
pub use models::{
    Coordinate, Destination, EnrichedDestination, Exclusivity, FilterCriteria, ForecastDay,
    ResolvedLocation, SortKey,
};
pub use resolver::LocationResolver;
pub use weather::WeatherFetcher;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, EgoTripError>;
