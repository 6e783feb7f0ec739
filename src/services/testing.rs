// src/services/testing.rs
// DOCUMENTATION: Scripted collaborators for unit tests
// PURPOSE: In-memory PlacesStore and PositionProvider with call recording

use crate::errors::PlacesError;
use crate::models::{GeoPosition, Place, PlaceImage};
use crate::services::{PlacesStore, PositionProvider};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn place(id: &str, lat: f64, lon: f64) -> Place {
    Place {
        id: id.to_string(),
        title: Some(format!("Place {}", id)),
        image: Some(PlaceImage {
            src: format!("{}.jpg", id),
            alt: format!("Picture of {}", id),
        }),
        description: None,
        lat,
        lon,
        extra: Default::default(),
    }
}

/// Pauses `replace_user_places` until the test releases it
#[derive(Default)]
pub struct WriteGate {
    pub entered: Notify,
    pub release: Notify,
}

/// Store whose answers are scripted per call; an `Err(String)` becomes
/// `PlacesError::ExternalApiError`
#[derive(Default)]
pub struct MockStore {
    user_places: Mutex<Option<Result<Vec<Place>, String>>>,
    catalog: Mutex<Option<Result<Vec<Place>, String>>>,
    replace_results: Mutex<VecDeque<Result<(), String>>>,
    replace_calls: Mutex<Vec<Vec<Place>>>,
    gate: Option<Arc<WriteGate>>,
    pub user_fetches: AtomicUsize,
    pub catalog_fetches: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_places(self, result: Result<Vec<Place>, &str>) -> Self {
        *self.user_places.lock().unwrap() = Some(result.map_err(str::to_string));
        self
    }

    pub fn with_catalog(self, result: Result<Vec<Place>, &str>) -> Self {
        *self.catalog.lock().unwrap() = Some(result.map_err(str::to_string));
        self
    }

    pub fn with_gate(mut self, gate: Arc<WriteGate>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Queue the outcome of the next replace call (default is success)
    pub fn push_replace_result(&self, result: Result<(), &str>) {
        self.replace_results
            .lock()
            .unwrap()
            .push_back(result.map_err(str::to_string));
    }

    pub fn replace_calls(&self) -> Vec<Vec<Place>> {
        self.replace_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlacesStore for MockStore {
    async fn fetch_user_places(&self) -> Result<Vec<Place>, PlacesError> {
        self.user_fetches.fetch_add(1, Ordering::SeqCst);
        self.user_places
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
            .map_err(PlacesError::ExternalApiError)
    }

    async fn replace_user_places(&self, places: &[Place]) -> Result<(), PlacesError> {
        self.replace_calls.lock().unwrap().push(places.to_vec());

        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        self.replace_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
            .map_err(PlacesError::ExternalApiError)
    }

    async fn fetch_available_places(&self) -> Result<Vec<Place>, PlacesError> {
        self.catalog_fetches.fetch_add(1, Ordering::SeqCst);
        self.catalog
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
            .map_err(PlacesError::ExternalApiError)
    }
}

pub enum LocatorBehavior {
    At(GeoPosition),
    Denied,
    Never,
}

pub struct MockLocator {
    behavior: LocatorBehavior,
    pub calls: AtomicUsize,
}

impl MockLocator {
    pub fn new(behavior: LocatorBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PositionProvider for MockLocator {
    async fn current_position(&self) -> Result<GeoPosition, PlacesError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            LocatorBehavior::At(position) => Ok(position),
            LocatorBehavior::Denied => Err(PlacesError::LocationDenied),
            LocatorBehavior::Never => std::future::pending().await,
        }
    }
}
