//! Filter, sort and search over the enriched destination list
//!
//! Pure synchronous transforms: text search, predicate filtering, and
//! sorting. Recomputed on every criteria change; never mutates its input.

use crate::models::{EnrichedDestination, FilterCriteria, SortKey};

/// Apply search, filter and sort in one pass over the enriched list.
#[must_use]
pub fn apply(
    destinations: &[EnrichedDestination],
    criteria: &FilterCriteria,
    sort: SortKey,
    query: &str,
) -> Vec<EnrichedDestination> {
    let mut result: Vec<EnrichedDestination> = destinations
        .iter()
        .filter(|dest| matches_query(dest, query))
        .filter(|dest| matches_criteria(dest, criteria))
        .cloned()
        .collect();

    sort_destinations(&mut result, sort);
    result
}

/// Case-insensitive substring match against name, country and region.
/// An empty query matches everything.
#[must_use]
pub fn matches_query(dest: &EnrichedDestination, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    let d = &dest.destination;
    d.name.to_lowercase().contains(&query)
        || d.country.to_lowercase().contains(&query)
        || d.region.to_lowercase().contains(&query)
}

/// All four predicate clauses: flight time, sunshine, price, and
/// tier/region membership (empty set means no restriction).
#[must_use]
pub fn matches_criteria(dest: &EnrichedDestination, criteria: &FilterCriteria) -> bool {
    let d = &dest.destination;

    dest.flight_time_hours <= criteria.max_flight_time_hours
        && d.sunshine_hours >= criteria.min_sunshine_hours
        && d.price <= criteria.max_price
        && (criteria.exclusivity.is_empty() || criteria.exclusivity.contains(&d.exclusivity))
        && (criteria.regions.is_empty() || criteria.regions.contains(&d.region))
}

/// Sort in place. `sort_by` is stable, so ties keep dataset order.
pub fn sort_destinations(destinations: &mut [EnrichedDestination], sort: SortKey) {
    match sort {
        SortKey::FlightTime => {
            destinations.sort_by(|a, b| a.flight_time_hours.total_cmp(&b.flight_time_hours));
        }
        SortKey::Sunshine => {
            destinations.sort_by(|a, b| {
                b.destination
                    .sunshine_hours
                    .cmp(&a.destination.sunshine_hours)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Destination, Exclusivity, ForecastDay};
    use rstest::rstest;

    fn day(label: &str) -> ForecastDay {
        ForecastDay {
            day: label.to_string(),
            temp_c: 25,
            sunny: true,
            condition: "Sunny".to_string(),
            icon: "01d".to_string(),
            error_message: None,
        }
    }

    fn sample(
        id: u32,
        name: &str,
        region: &str,
        flight_time: f64,
        sunshine: u32,
        price: u32,
        tier: Exclusivity,
    ) -> EnrichedDestination {
        EnrichedDestination {
            destination: Destination {
                id,
                name: name.to_string(),
                country: "Testland".to_string(),
                region: region.to_string(),
                image_url: String::new(),
                price,
                flight_time,
                sunshine_hours: sunshine,
                exclusivity: tier,
                description: String::new(),
                best_time_to_visit: String::new(),
                currency: "EUR".to_string(),
                forecast: [day("Mon"), day("Tue"), day("Wed")],
                workspaces: Vec::new(),
                alibis: Vec::new(),
            },
            flight_time_hours: flight_time,
            distance_km: flight_time * 800.0,
            live_forecast: [day("Mon"), day("Tue"), day("Wed")],
            using_fallback_weather: false,
        }
    }

    fn fixture() -> Vec<EnrichedDestination> {
        vec![
            sample(1, "Nearville", "Europe", 2.0, 9, 400, Exclusivity::Popular),
            sample(2, "Sunspot", "Europe", 5.0, 11, 900, Exclusivity::Emerging),
            sample(3, "Farawaya", "Oceania", 16.0, 8, 1200, Exclusivity::Undiscovered),
            sample(4, "Dimsby", "Europe", 3.0, 4, 300, Exclusivity::Mainstream),
        ]
    }

    #[test]
    fn test_every_result_satisfies_all_clauses() {
        let criteria = FilterCriteria {
            max_flight_time_hours: 6.0,
            min_sunshine_hours: 8,
            max_price: 1000,
            exclusivity: vec![Exclusivity::Popular, Exclusivity::Emerging],
            regions: vec!["Europe".to_string()],
        };

        let result = apply(&fixture(), &criteria, SortKey::FlightTime, "");
        assert!(!result.is_empty());
        for item in &result {
            assert!(item.flight_time_hours <= criteria.max_flight_time_hours);
            assert!(item.destination.sunshine_hours >= criteria.min_sunshine_hours);
            assert!(item.destination.price <= criteria.max_price);
            assert!(criteria.exclusivity.contains(&item.destination.exclusivity));
            assert!(criteria.regions.contains(&item.destination.region));
        }
    }

    #[test]
    fn test_empty_sets_mean_no_restriction() {
        let criteria = FilterCriteria {
            max_flight_time_hours: 100.0,
            min_sunshine_hours: 0,
            max_price: 10_000,
            ..FilterCriteria::default()
        };

        let result = apply(&fixture(), &criteria, SortKey::FlightTime, "");
        assert_eq!(result.len(), 4);
    }

    #[rstest]
    #[case("sunspot")]
    #[case("SUNSPOT")]
    #[case("SunSpot")]
    fn test_search_is_case_insensitive(#[case] query: &str) {
        let lenient = FilterCriteria {
            max_flight_time_hours: 100.0,
            min_sunshine_hours: 0,
            max_price: 10_000,
            ..FilterCriteria::default()
        };
        let result = apply(&fixture(), &lenient, SortKey::FlightTime, query);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].destination.name, "Sunspot");
    }

    #[test]
    fn test_search_matches_region_and_country() {
        let lenient = FilterCriteria {
            max_flight_time_hours: 100.0,
            min_sunshine_hours: 0,
            max_price: 10_000,
            ..FilterCriteria::default()
        };
        let by_region = apply(&fixture(), &lenient, SortKey::FlightTime, "oceania");
        assert_eq!(by_region.len(), 1);
        assert_eq!(by_region[0].destination.name, "Farawaya");

        let by_country = apply(&fixture(), &lenient, SortKey::FlightTime, "testland");
        assert_eq!(by_country.len(), 4);
    }

    #[test]
    fn test_nonsense_search_yields_empty_list() {
        let result = apply(
            &fixture(),
            &FilterCriteria::default(),
            SortKey::FlightTime,
            "zanzibar-on-mars",
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_sort_by_flight_time_ascending() {
        let lenient = FilterCriteria {
            max_flight_time_hours: 100.0,
            min_sunshine_hours: 0,
            max_price: 10_000,
            ..FilterCriteria::default()
        };
        let result = apply(&fixture(), &lenient, SortKey::FlightTime, "");
        let times: Vec<f64> = result.iter().map(|d| d.flight_time_hours).collect();
        assert_eq!(times, vec![2.0, 3.0, 5.0, 16.0]);
    }

    #[test]
    fn test_sort_by_sunshine_descending() {
        let lenient = FilterCriteria {
            max_flight_time_hours: 100.0,
            min_sunshine_hours: 0,
            max_price: 10_000,
            ..FilterCriteria::default()
        };
        let result = apply(&fixture(), &lenient, SortKey::Sunshine, "");
        let sunshine: Vec<u32> = result
            .iter()
            .map(|d| d.destination.sunshine_hours)
            .collect();
        assert_eq!(sunshine, vec![11, 9, 8, 4]);
    }

    #[test]
    fn test_ties_keep_dataset_order() {
        let mut items = vec![
            sample(1, "First", "Europe", 4.0, 9, 500, Exclusivity::Popular),
            sample(2, "Second", "Europe", 4.0, 9, 600, Exclusivity::Popular),
            sample(3, "Third", "Europe", 4.0, 9, 700, Exclusivity::Popular),
        ];
        sort_destinations(&mut items, SortKey::FlightTime);
        let ids: Vec<u32> = items.iter().map(|d| d.destination.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        sort_destinations(&mut items, SortKey::Sunshine);
        let ids: Vec<u32> = items.iter().map(|d| d.destination.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_default_criteria_trim_long_hauls() {
        let result = apply(&fixture(), &FilterCriteria::default(), SortKey::FlightTime, "");
        // Farawaya is beyond the 8 h radius and over budget; Dimsby lacks sun
        let names: Vec<&str> = result
            .iter()
            .map(|d| d.destination.name.as_str())
            .collect();
        assert_eq!(names, vec!["Nearville", "Sunspot"]);
    }
}
