use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use egotrip::api::AppState;
use egotrip::cache::TtlCache;
use egotrip::config::EgoTripConfig;
use egotrip::resolver::LocationResolver;
use egotrip::weather::WeatherFetcher;
use egotrip::web;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = EgoTripConfig::from_env().with_context(|| "Failed to load configuration")?;

    if config.weather.api_key.is_none() {
        tracing::warn!(
            "OPEN_WEATHER_MAP_KEY is not set; all forecasts will be synthetic estimates"
        );
    }

    let cache = TtlCache::open(&config.cache.location)
        .with_context(|| format!("Failed to open cache at {}", config.cache.location))?;

    let weather = WeatherFetcher::new(
        &config.weather,
        cache,
        Duration::from_secs(config.cache.forecast_ttl_seconds),
    )?;
    let resolver = LocationResolver::new(Duration::from_secs(config.weather.timeout_seconds))?;

    let state = AppState {
        resolver: Arc::new(resolver),
        weather: Arc::new(weather),
    };

    web::run(state, config.server.port).await
}
