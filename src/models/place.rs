// src/models/place.rs
// DOCUMENTATION: Core data structures for places
// PURPOSE: Defines the place payload shared by the backend, the engine and the API

use geo_types::Point;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// A place as served by the remote backend
/// DOCUMENTATION: Only `id` and the coordinates are required. Display fields
/// are optional and any field this service does not know is kept in `extra`,
/// so lists written back with PUT /user-places carry the backend's payload intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Unique identifier (e.g. "p1")
    pub id: String,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<PlaceImage>,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Geographic coordinates - latitude
    pub lat: f64,

    /// Geographic coordinates - longitude
    #[serde(alias = "lng")]
    pub lon: f64,

    /// Backend fields passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceImage {
    pub src: String,
    pub alt: String,
}

impl Place {
    /// Location as a geo point (x = longitude, y = latitude)
    pub fn point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

/// Device position obtained once per catalog load
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub lat: f64,
    pub lng: f64,
}

impl From<GeoPosition> for Point<f64> {
    fn from(position: GeoPosition) -> Self {
        Point::new(position.lng, position.lat)
    }
}

/// Body for POST /user-places
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SelectPlaceRequest {
    /// Id of a place in the catalog
    #[validate(length(min = 1, max = 255))]
    pub place_id: String,
}

/// Wire envelope used by the backend for place lists
/// DOCUMENTATION: GET /places, GET /user-places and PUT /user-places all use `{ "places": [...] }`
#[derive(Debug, Serialize, Deserialize)]
pub struct PlacesEnvelope {
    pub places: Vec<Place>,
}
