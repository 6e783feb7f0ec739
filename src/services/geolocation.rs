// src/services/geolocation.rs
// DOCUMENTATION: Device position providers
// PURPOSE: Resolve the current position used to order the catalog

use crate::errors::PlacesError;
use crate::models::GeoPosition;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Source of the current device position
/// DOCUMENTATION: May fail, or never resolve; callers bound it with a timeout
#[async_trait]
pub trait PositionProvider: Send + Sync {
    async fn current_position(&self) -> Result<GeoPosition, PlacesError>;
}

/// Position fixed in configuration (DEVICE_LATITUDE / DEVICE_LONGITUDE)
pub struct FixedPositionProvider {
    position: GeoPosition,
}

impl FixedPositionProvider {
    pub fn new(position: GeoPosition) -> Self {
        Self { position }
    }
}

#[async_trait]
impl PositionProvider for FixedPositionProvider {
    async fn current_position(&self) -> Result<GeoPosition, PlacesError> {
        Ok(self.position)
    }
}

/// IP geolocation lookup
/// DOCUMENTATION: Expects an ip-api style JSON document:
/// `{ "status": "success", "lat": 40.41, "lon": -3.70 }` or
/// `{ "status": "fail", "message": "private range" }`
pub struct HttpPositionProvider {
    client: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

impl HttpPositionProvider {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlacesError::ConfigError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl PositionProvider for HttpPositionProvider {
    async fn current_position(&self) -> Result<GeoPosition, PlacesError> {
        log::debug!("Geolocation lookup: GET {}", self.url);

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            log::error!("Geolocation request to {} failed: {}", self.url, e);
            PlacesError::LocationUnavailable("lookup request failed".to_string())
        })?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                log::warn!("Geolocation lookup refused ({})", response.status());
                return Err(PlacesError::LocationDenied);
            }
            status if !status.is_success() => {
                log::error!("Geolocation lookup error {}", status);
                return Err(PlacesError::LocationUnavailable(format!("HTTP {}", status)));
            }
            _ => {}
        }

        let lookup: LookupResponse = response
            .json()
            .await
            .map_err(|e| PlacesError::ParseError(e.to_string()))?;

        match (lookup.status.as_str(), lookup.lat, lookup.lon) {
            ("success", Some(lat), Some(lng)) => {
                log::info!("Resolved device position: lat={}, lng={}", lat, lng);
                Ok(GeoPosition { lat, lng })
            }
            _ => Err(PlacesError::LocationUnavailable(
                lookup
                    .message
                    .unwrap_or_else(|| format!("lookup status {}", lookup.status)),
            )),
        }
    }
}
