//! Configuration for the `EgoTrip` service
//!
//! Everything comes from the process environment. The weather API key is
//! the only external credential and it is optional: without it the service
//! still starts and serves synthetic forecasts.

use crate::EgoTripError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Root configuration for the `EgoTrip` service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EgoTripConfig {
    /// Weather API configuration
    pub weather: WeatherConfig,
    /// Cache configuration
    pub cache: CacheConfig,
    /// HTTP server configuration
    pub server: ServerConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key; absence degrades to synthetic forecasts
    pub api_key: Option<String>,
    /// Base URL of the forecast endpoint
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache directory location
    pub location: String,
    /// Forecast TTL in seconds
    pub forecast_ttl_seconds: u64,
}

/// HTTP server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to bind on
    pub port: u16,
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5/forecast".to_string()
}

fn default_cache_location() -> String {
    ".egotrip-cache".to_string()
}

impl Default for EgoTripConfig {
    fn default() -> Self {
        Self {
            weather: WeatherConfig {
                api_key: None,
                base_url: default_weather_base_url(),
                timeout_seconds: 10,
            },
            cache: CacheConfig {
                location: default_cache_location(),
                forecast_ttl_seconds: 60 * 60,
            },
            server: ServerConfig { port: 3000 },
        }
    }
}

impl EgoTripConfig {
    /// Load configuration from the process environment.
    ///
    /// Recognized variables: `OPEN_WEATHER_MAP_KEY`, `EGOTRIP_WEATHER_URL`,
    /// `EGOTRIP_WEATHER_TIMEOUT_SECS`, `EGOTRIP_CACHE_DIR`,
    /// `EGOTRIP_FORECAST_TTL_SECS`, `EGOTRIP_PORT`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(key) = env::var("OPEN_WEATHER_MAP_KEY") {
            if !key.trim().is_empty() {
                config.weather.api_key = Some(key);
            }
        }
        if let Ok(url) = env::var("EGOTRIP_WEATHER_URL") {
            config.weather.base_url = url;
        }
        if let Ok(secs) = env::var("EGOTRIP_WEATHER_TIMEOUT_SECS") {
            config.weather.timeout_seconds = secs
                .parse()
                .map_err(|_| EgoTripError::config("EGOTRIP_WEATHER_TIMEOUT_SECS must be an integer"))?;
        }
        if let Ok(dir) = env::var("EGOTRIP_CACHE_DIR") {
            config.cache.location = dir;
        }
        if let Ok(secs) = env::var("EGOTRIP_FORECAST_TTL_SECS") {
            config.cache.forecast_ttl_seconds = secs
                .parse()
                .map_err(|_| EgoTripError::config("EGOTRIP_FORECAST_TTL_SECS must be an integer"))?;
        }
        if let Ok(port) = env::var("EGOTRIP_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| EgoTripError::config("EGOTRIP_PORT must be a port number"))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if let Some(api_key) = &self.weather.api_key {
            if api_key.len() < 8 {
                return Err(EgoTripError::config(
                    "Weather API key appears to be invalid (too short). Please check your API key.",
                )
                .into());
            }
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(EgoTripError::config(
                "Weather base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            return Err(EgoTripError::config(
                "Weather request timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.cache.location.is_empty() {
            return Err(EgoTripError::config("Cache directory cannot be empty").into());
        }

        Ok(())
    }
}
