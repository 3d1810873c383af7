//! Core data model for the `EgoTrip` pipeline

pub mod destination;
pub mod forecast;
pub mod location;

pub use destination::{
    Destination, EnrichedDestination, Exclusivity, FilterCriteria, SortKey, Workspace,
};
pub use forecast::{DailyForecast, ForecastDay};
pub use location::{Coordinate, ResolvedLocation};
