//! External flight-search handoff
//!
//! Booking is a one-way redirect: the API hands the client a Google
//! Flights search URL and never hears back.

use crate::models::Destination;

const FLIGHT_SEARCH_BASE: &str = "https://www.google.com/travel/flights";

/// Build the external flight-search URL for a destination.
#[must_use]
pub fn booking_url(destination: &Destination) -> String {
    let query = format!("{} {} flights", destination.name, destination.country);
    format!("{FLIGHT_SEARCH_BASE}?q={}", urlencoding::encode(&query))
}
