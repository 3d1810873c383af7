//! Weather fetching with a cascading fallback chain
//!
//! Given a destination (city, country, optional coordinate), this module
//! always produces exactly three forecast days. Live data comes from an
//! OpenWeatherMap-compatible forecast endpoint through an ordered list of
//! lookup strategies; when every live path fails, a synthetic generator
//! takes over. The caller learns about degradation only through the
//! `from_fallback` flag and the message on the first synthetic day.

use crate::cache::TtlCache;
use crate::config::WeatherConfig;
use crate::models::{Coordinate, DailyForecast, ForecastDay};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Datelike, Days, Utc};
use rand::RngExt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Condition codes at or above this are the clear/few-clouds bucket
const CLEAR_SKY_CODE: u16 = 800;

/// 3-hour source intervals; every 8th entry is 24 hours apart
const ENTRIES_PER_DAY: usize = 8;

/// Why a live forecast could not be produced.
///
/// This is data, not control flow: the triggering failure is rendered
/// into the first synthetic day so the UI can show a passive badge.
#[derive(Debug, Clone, Error)]
pub enum FetchFailure {
    #[error("weather API credential is not configured")]
    MissingCredential,
    #[error("connection to weather service failed: {0}")]
    ConnectionFailed(String),
    #[error("weather service returned an unusable response: {0}")]
    ServiceUnavailable(String),
    #[error("weather service returned no usable forecast data")]
    NoData,
}

impl FetchFailure {
    /// The caption shown alongside estimated data
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchFailure::MissingCredential => {
                "Weather service unavailable. Using estimated data."
            }
            FetchFailure::ConnectionFailed(_) => {
                "Connection to weather service failed. Showing estimated data."
            }
            FetchFailure::ServiceUnavailable(_) => {
                "Weather service is temporarily unavailable. Showing estimated conditions."
            }
            FetchFailure::NoData => {
                "Unable to retrieve current weather. Showing historical averages."
            }
        }
    }

    /// Whether the next strategy in the chain is worth trying. Transport
    /// failures and empty data abandon the chain; a bad status from one
    /// query shape may still succeed with another.
    fn next_strategy_may_help(&self) -> bool {
        matches!(self, FetchFailure::ServiceUnavailable(_))
    }
}

/// Lookup request for one destination's forecast
#[derive(Debug, Clone)]
pub struct ForecastQuery {
    pub city: String,
    pub country: String,
    pub coordinate: Option<Coordinate>,
}

impl ForecastQuery {
    fn cache_key(&self) -> String {
        match self.coordinate {
            Some(coord) => {
                let (lat, lon) = coord.rounded(4);
                format!("forecast:{}:{}:{lat:.4}:{lon:.4}", self.city, self.country)
            }
            None => format!("forecast:{}:{}", self.city, self.country),
        }
    }
}

/// Three forecast days plus the caller-facing degradation flag
#[derive(Debug, Clone)]
pub struct FetchedForecast {
    pub days: DailyForecast,
    pub from_fallback: bool,
}

/// One way of asking the provider for a forecast
#[async_trait]
trait ForecastStrategy: Send + Sync {
    fn describe(&self) -> &'static str;

    /// Whether this strategy applies to the query
    fn applies(&self, query: &ForecastQuery) -> bool;

    async fn attempt(
        &self,
        api: &LiveApi,
        query: &ForecastQuery,
    ) -> std::result::Result<DailyForecast, FetchFailure>;
}

struct ByCoordinate;
struct ByCity;
struct ByCityCountry;

#[async_trait]
impl ForecastStrategy for ByCoordinate {
    fn describe(&self) -> &'static str {
        "coordinate lookup"
    }

    fn applies(&self, query: &ForecastQuery) -> bool {
        query.coordinate.is_some()
    }

    async fn attempt(
        &self,
        api: &LiveApi,
        query: &ForecastQuery,
    ) -> std::result::Result<DailyForecast, FetchFailure> {
        let Some(coord) = query.coordinate else {
            return Err(FetchFailure::NoData);
        };
        let url = format!(
            "{}?lat={}&lon={}&appid={}&units=metric",
            api.base_url, coord.latitude, coord.longitude, api.api_key
        );
        api.fetch(&url).await
    }
}

#[async_trait]
impl ForecastStrategy for ByCity {
    fn describe(&self) -> &'static str {
        "city-name lookup"
    }

    fn applies(&self, query: &ForecastQuery) -> bool {
        query.coordinate.is_none()
    }

    async fn attempt(
        &self,
        api: &LiveApi,
        query: &ForecastQuery,
    ) -> std::result::Result<DailyForecast, FetchFailure> {
        let url = format!(
            "{}?q={}&appid={}&units=metric",
            api.base_url,
            urlencoding::encode(&query.city),
            api.api_key
        );
        api.fetch(&url).await
    }
}

#[async_trait]
impl ForecastStrategy for ByCityCountry {
    fn describe(&self) -> &'static str {
        "city-and-country lookup"
    }

    fn applies(&self, query: &ForecastQuery) -> bool {
        query.coordinate.is_none()
    }

    async fn attempt(
        &self,
        api: &LiveApi,
        query: &ForecastQuery,
    ) -> std::result::Result<DailyForecast, FetchFailure> {
        let url = format!(
            "{}?q={},{}&appid={}&units=metric",
            api.base_url,
            urlencoding::encode(&query.city),
            urlencoding::encode(&query.country),
            api.api_key
        );
        api.fetch(&url).await
    }
}

/// Authenticated HTTP access to the forecast endpoint
struct LiveApi {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl LiveApi {
    async fn fetch(&self, url: &str) -> std::result::Result<DailyForecast, FetchFailure> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchFailure::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::ServiceUnavailable(format!("HTTP {status}")));
        }

        let payload: owm::ForecastResponse = response
            .json()
            .await
            .map_err(|e| FetchFailure::ServiceUnavailable(e.to_string()))?;

        parse_forecast(&payload)
    }
}

/// Weather fetcher: cache, strategy chain, synthetic fallback
pub struct WeatherFetcher {
    api_key: Option<String>,
    api: LiveApi,
    cache: TtlCache,
    ttl: Duration,
}

impl WeatherFetcher {
    pub fn new(config: &WeatherConfig, cache: TtlCache, ttl: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("EgoTrip/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client for weather")?;

        Ok(Self {
            api_key: config.api_key.clone(),
            api: LiveApi {
                http,
                base_url: config.base_url.clone(),
                api_key: config.api_key.clone().unwrap_or_default(),
            },
            cache,
            ttl,
        })
    }

    /// Produce a three-day forecast for the query. Never fails: every
    /// degradation ends in the synthetic generator.
    #[tracing::instrument(skip(self), fields(city = %query.city))]
    pub async fn forecast(&self, query: &ForecastQuery) -> FetchedForecast {
        let key = query.cache_key();

        match self.cache.get::<DailyForecast>(&key).await {
            Ok(Some(days)) => {
                debug!("Forecast served from cache");
                return FetchedForecast {
                    days,
                    from_fallback: false,
                };
            }
            Ok(None) => {}
            Err(e) => warn!("Cache lookup failed for {}: {e:#}", query.city),
        }

        if self.api_key.is_none() {
            debug!("No weather API key configured, generating synthetic forecast");
            return self.synthetic(&FetchFailure::MissingCredential);
        }

        let strategies: [&dyn ForecastStrategy; 3] = [&ByCoordinate, &ByCity, &ByCityCountry];
        let mut last_failure = FetchFailure::NoData;

        for strategy in strategies {
            if !strategy.applies(query) {
                continue;
            }
            match strategy.attempt(&self.api, query).await {
                Ok(days) => {
                    self.store(&key, &days).await;
                    return FetchedForecast {
                        days,
                        from_fallback: false,
                    };
                }
                Err(failure) => {
                    warn!(
                        "Weather {} failed for {}: {failure}",
                        strategy.describe(),
                        query.city
                    );
                    let try_next = failure.next_strategy_may_help();
                    last_failure = failure;
                    if !try_next {
                        break;
                    }
                }
            }
        }

        self.synthetic(&last_failure)
    }

    async fn store(&self, key: &str, days: &DailyForecast) {
        // Jitter the TTL so one bad hour doesn't expire every entry at once
        let jitter: f32 = rand::rng().random_range(0.9..1.1);
        let ttl = Duration::from_secs((self.ttl.as_secs() as f32 * jitter) as u64);
        if let Err(e) = self.cache.put(key, days.clone(), ttl).await {
            warn!("Failed to cache forecast: {e:#}");
        }
    }

    fn synthetic(&self, failure: &FetchFailure) -> FetchedForecast {
        FetchedForecast {
            days: synthetic_forecast(failure),
            from_fallback: true,
        }
    }
}

/// Generate three plausible sunny-destination days: 70% chance of clear
/// sky, temperature uniform in 20-30 °C. Only the first day carries the
/// degradation message.
#[must_use]
pub fn synthetic_forecast(failure: &FetchFailure) -> DailyForecast {
    let today = Utc::now().date_naive();
    let mut rng = rand::rng();

    std::array::from_fn(|i| {
        let date = today
            .checked_add_days(Days::new(i as u64))
            .unwrap_or(today);
        let sunny = rng.random_range(0.0..1.0) > 0.3;
        ForecastDay {
            day: weekday_label(date.weekday()),
            temp_c: rng.random_range(20..=30),
            sunny,
            condition: if sunny { "Sunny" } else { "Partly Cloudy" }.to_string(),
            icon: if sunny { "01d" } else { "02d" }.to_string(),
            error_message: (i == 0).then(|| failure.user_message().to_string()),
        }
    })
}

fn weekday_label(weekday: chrono::Weekday) -> String {
    match weekday {
        chrono::Weekday::Mon => "Mon",
        chrono::Weekday::Tue => "Tue",
        chrono::Weekday::Wed => "Wed",
        chrono::Weekday::Thu => "Thu",
        chrono::Weekday::Fri => "Fri",
        chrono::Weekday::Sat => "Sat",
        chrono::Weekday::Sun => "Sun",
    }
    .to_string()
}

/// Select three days at 24-hour spacing from a 3-hour-interval forecast
/// list and map them into `ForecastDay`s.
fn parse_forecast(
    response: &owm::ForecastResponse,
) -> std::result::Result<DailyForecast, FetchFailure> {
    let selected: Vec<ForecastDay> = response
        .list
        .iter()
        .step_by(ENTRIES_PER_DAY)
        .take(3)
        .map(map_entry)
        .collect();

    <[ForecastDay; 3]>::try_from(selected).map_err(|_| FetchFailure::NoData)
}

fn map_entry(entry: &owm::ForecastEntry) -> ForecastDay {
    let day = DateTime::from_timestamp(entry.dt, 0)
        .map(|dt| weekday_label(dt.weekday()))
        .unwrap_or_else(|| "N/A".to_string());

    let (condition, icon, code) = entry
        .weather
        .first()
        .map(|w| (w.main.clone(), w.icon.clone(), w.id))
        .unwrap_or_else(|| ("Unknown".to_string(), "03d".to_string(), 0));

    ForecastDay {
        day,
        temp_c: entry.main.temp.round() as i32,
        sunny: code >= CLEAR_SKY_CODE,
        condition,
        icon,
        error_message: None,
    }
}

/// Forecast-endpoint response structures (OpenWeatherMap shape)
mod owm {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub list: Vec<ForecastEntry>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastEntry {
        /// Unix timestamp of the 3-hour slot
        pub dt: i64,
        pub main: MainData,
        pub weather: Vec<ConditionData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct MainData {
        /// Temperature in Celsius (metric units requested)
        pub temp: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct ConditionData {
        /// Provider condition code; >= 800 is the clear bucket
        pub id: u16,
        pub main: String,
        pub icon: String,
    }
}
