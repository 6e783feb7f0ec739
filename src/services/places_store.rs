// src/services/places_store.rs
// DOCUMENTATION: Remote places store client
// PURPOSE: Fetch the catalog and the personal list, and replace the personal list

use crate::errors::PlacesError;
use crate::models::{Place, PlacesEnvelope};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

/// Remote store the sync engine and catalog loader talk to
/// DOCUMENTATION: Each call either succeeds with its payload or fails with a
/// `PlacesError` whose message can be shown to the user.
#[async_trait]
pub trait PlacesStore: Send + Sync {
    /// Personal list as last persisted
    async fn fetch_user_places(&self) -> Result<Vec<Place>, PlacesError>;

    /// Replace the whole personal list
    async fn replace_user_places(&self, places: &[Place]) -> Result<(), PlacesError>;

    /// Full, unordered catalog
    async fn fetch_available_places(&self) -> Result<Vec<Place>, PlacesError>;
}

/// HTTP client for the places backend
/// DOCUMENTATION: Talks JSON to GET /places, GET /user-places and PUT /user-places
pub struct HttpPlacesStore {
    /// HTTP client for making requests
    client: Client,
    /// Backend base URL without trailing slash
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct UpdateResponse {
    message: Option<String>,
}

impl HttpPlacesStore {
    /// Create new backend client
    /// DOCUMENTATION: Every request is bounded by `timeout`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlacesError::ConfigError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a `{ "places": [...] }` document
    async fn get_places(&self, path: &str, failure: &str) -> Result<Vec<Place>, PlacesError> {
        let url = self.url(path);
        log::debug!("Backend request: GET {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            log::error!("Backend request GET {} failed: {}", url, e);
            PlacesError::ExternalApiError(failure.to_string())
        })?;

        let response = Self::ensure_success(response, failure).await?;

        let envelope: PlacesEnvelope = response.json().await.map_err(|e| {
            log::error!("Failed to parse backend response for {}: {}", url, e);
            PlacesError::ParseError(e.to_string())
        })?;

        log::debug!("GET {} returned {} places", url, envelope.places.len());
        Ok(envelope.places)
    }

    /// Map a non-success status to the user-facing `failure` message
    async fn ensure_success(response: Response, failure: &str) -> Result<Response, PlacesError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        log::error!("Backend error {}: {}", status, body);
        Err(PlacesError::ExternalApiError(failure.to_string()))
    }
}

#[async_trait]
impl PlacesStore for HttpPlacesStore {
    async fn fetch_user_places(&self) -> Result<Vec<Place>, PlacesError> {
        self.get_places("/user-places", "Failed to fetch user places")
            .await
    }

    async fn replace_user_places(&self, places: &[Place]) -> Result<(), PlacesError> {
        const FAILURE: &str = "Failed to update user data.";
        let url = self.url("/user-places");
        log::debug!("Backend request: PUT {} ({} places)", url, places.len());

        let body = PlacesEnvelope {
            places: places.to_vec(),
        };

        let response = self.client.put(&url).json(&body).send().await.map_err(|e| {
            log::error!("Backend request PUT {} failed: {}", url, e);
            PlacesError::ExternalApiError(FAILURE.to_string())
        })?;

        let response = Self::ensure_success(response, FAILURE).await?;

        // The message is informational only; an empty or odd body still counts as success
        if let Ok(UpdateResponse {
            message: Some(message),
        }) = response.json::<UpdateResponse>().await
        {
            log::debug!("Backend update response: {}", message);
        }

        Ok(())
    }

    async fn fetch_available_places(&self) -> Result<Vec<Place>, PlacesError> {
        self.get_places("/places", "Failed to fetch places").await
    }
}
