// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use crate::errors::PlacesError;
use crate::models::GeoPosition;
use dotenv::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 8003)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Base URL of the remote places backend (serves /places and /user-places)
    pub backend_url: String,

    /// Timeout for every backend request, in seconds
    pub request_timeout_secs: u64,

    /// IP geolocation endpoint used when no fixed position is configured
    pub geolocation_url: String,

    /// How long the catalog loader waits for a position, 0 waits forever
    pub geolocation_timeout_secs: u64,

    /// Fixed device latitude (optional, must be paired with longitude)
    pub device_latitude: Option<f64>,

    /// Fixed device longitude
    pub device_longitude: Option<f64>,
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

fn parse_opt<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|raw| raw.parse().ok())
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        dotenv().ok();

        Config {
            server_address: env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),

            server_port: parse_or("SERVER_PORT", 8003),

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            backend_url: env::var("PLACES_BACKEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),

            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", 15),

            geolocation_url: env::var("GEOLOCATION_URL")
                .unwrap_or_else(|_| "http://ip-api.com/json".to_string()),

            geolocation_timeout_secs: parse_or("GEOLOCATION_TIMEOUT_SECS", 10),

            device_latitude: parse_opt("DEVICE_LATITUDE"),

            device_longitude: parse_opt("DEVICE_LONGITUDE"),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    pub fn validate(&self) -> Result<(), PlacesError> {
        reqwest::Url::parse(&self.backend_url).map_err(|e| {
            PlacesError::ConfigError(format!("PLACES_BACKEND_URL is not a valid URL: {}", e))
        })?;

        match (self.device_latitude, self.device_longitude) {
            (Some(lat), Some(lng)) => {
                if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
                    return Err(PlacesError::ConfigError(format!(
                        "Device position out of range: lat={}, lng={}",
                        lat, lng
                    )));
                }
            }
            (None, None) => {
                reqwest::Url::parse(&self.geolocation_url).map_err(|e| {
                    PlacesError::ConfigError(format!("GEOLOCATION_URL is not a valid URL: {}", e))
                })?;
            }
            _ => {
                return Err(PlacesError::ConfigError(
                    "DEVICE_LATITUDE and DEVICE_LONGITUDE must be set together".to_string(),
                ))
            }
        }

        if self.geolocation_timeout_secs == 0 {
            log::warn!("GEOLOCATION_TIMEOUT_SECS is 0 - catalog ordering may wait forever");
        }

        Ok(())
    }

    /// Fixed device position, when both coordinates are configured
    pub fn device_position(&self) -> Option<GeoPosition> {
        match (self.device_latitude, self.device_longitude) {
            (Some(lat), Some(lng)) => Some(GeoPosition { lat, lng }),
            _ => None,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// `None` means the position request is never cut short
    pub fn geolocation_timeout(&self) -> Option<Duration> {
        match self.geolocation_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
