// src/services/catalog_loader.rs
// DOCUMENTATION: Distance-ordered catalog loading
// PURPOSE: Fetch the catalog once and expose it sorted by proximity to the device

use crate::errors::PlacesError;
use crate::models::{
    CatalogSnapshot, GeoPosition, OperationError, OperationErrorKind, Place,
    FETCH_FAILED_MESSAGE, LOCATION_FAILED_MESSAGE,
};
use crate::services::{sort_by_distance, PlacesStore, PositionProvider};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Result of a load call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Ordered,
    AlreadyLoaded,
    FetchFailed,
    PositionFailed,
}

#[derive(Debug, Default)]
struct CatalogState {
    catalog: Vec<Place>,
    is_loading: bool,
    error: Option<OperationError>,
}

/// Loads the catalog and orders it by distance from the current position
/// DOCUMENTATION: The position request is bounded by `position_timeout`;
/// with `None` a provider that never answers keeps the catalog loading.
pub struct CatalogLoader {
    store: Arc<dyn PlacesStore>,
    locator: Arc<dyn PositionProvider>,
    position_timeout: Option<Duration>,
    state: RwLock<CatalogState>,
    started: AtomicBool,
}

impl CatalogLoader {
    pub fn new(
        store: Arc<dyn PlacesStore>,
        locator: Arc<dyn PositionProvider>,
        position_timeout: Option<Duration>,
    ) -> Self {
        Self {
            store,
            locator,
            position_timeout,
            state: RwLock::new(CatalogState::default()),
            started: AtomicBool::new(false),
        }
    }

    /// Fetch, locate, sort
    ///
    /// Process:
    /// 1. Mark loading
    /// 2. Fetch the unordered catalog (on failure: record error, skip the position)
    /// 3. Ask for the position, bounded by the timeout
    /// 4. Publish the catalog sorted by ascending distance
    pub async fn load(&self) -> LoadOutcome {
        if self.started.swap(true, Ordering::SeqCst) {
            log::warn!("Catalog load already started, ignoring");
            return LoadOutcome::AlreadyLoaded;
        }

        self.state.write().await.is_loading = true;

        let places = match self.store.fetch_available_places().await {
            Ok(places) => places,
            Err(e) => {
                log::error!("Failed to fetch catalog: {}", e);
                self.fail(OperationError::new(
                    OperationErrorKind::CatalogFetch,
                    Some(e.to_string()),
                    FETCH_FAILED_MESSAGE,
                ))
                .await;
                return LoadOutcome::FetchFailed;
            }
        };

        log::info!("Fetched catalog with {} places, locating device", places.len());

        let position = match self.locate().await {
            Ok(position) => position,
            Err(e) => {
                log::error!("Could not order catalog by distance: {}", e);
                self.fail(OperationError::new(
                    OperationErrorKind::CatalogLoad,
                    Some(e.to_string()),
                    LOCATION_FAILED_MESSAGE,
                ))
                .await;
                return LoadOutcome::PositionFailed;
            }
        };

        let sorted = sort_by_distance(places, position);
        log::info!(
            "Catalog ordered from lat={}, lng={} ({} places)",
            position.lat,
            position.lng,
            sorted.len()
        );

        let mut state = self.state.write().await;
        state.catalog = sorted;
        state.is_loading = false;
        LoadOutcome::Ordered
    }

    async fn locate(&self) -> Result<GeoPosition, PlacesError> {
        match self.position_timeout {
            Some(limit) => tokio::time::timeout(limit, self.locator.current_position())
                .await
                .map_err(|_| PlacesError::LocationTimeout(limit.as_secs()))?,
            None => self.locator.current_position().await,
        }
    }

    async fn fail(&self, error: OperationError) {
        let mut state = self.state.write().await;
        state.error = Some(error);
        state.is_loading = false;
    }

    pub async fn snapshot(&self) -> CatalogSnapshot {
        let state = self.state.read().await;
        CatalogSnapshot {
            places: state.catalog.clone(),
            is_loading: state.is_loading,
            error: state.error.clone(),
        }
    }

    /// Look up a catalog place by id
    pub async fn find(&self, id: &str) -> Option<Place> {
        let state = self.state.read().await;
        state.catalog.iter().find(|p| p.id == id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{place, LocatorBehavior, MockLocator, MockStore};

    fn loader(
        store: Arc<MockStore>,
        locator: Arc<MockLocator>,
        timeout: Option<Duration>,
    ) -> CatalogLoader {
        CatalogLoader::new(store, locator, timeout)
    }

    fn origin() -> Arc<MockLocator> {
        Arc::new(MockLocator::new(LocatorBehavior::At(GeoPosition {
            lat: 0.0,
            lng: 0.0,
        })))
    }

    #[tokio::test]
    async fn test_load_orders_by_distance() {
        let store = Arc::new(MockStore::new().with_catalog(Ok(vec![
            place("a", 0.0, 0.0),
            place("b", 1.0, 1.0),
            place("c", 0.0, 0.0),
        ])));
        let loader = loader(store, origin(), Some(Duration::from_secs(1)));

        assert_eq!(loader.load().await, LoadOutcome::Ordered);
        let snapshot = loader.snapshot().await;

        let ids: Vec<&str> = snapshot.places.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
        assert!(!snapshot.is_loading);
        assert!(snapshot.error.is_none());
    }

    #[tokio::test]
    async fn test_fetch_failure_skips_position() {
        let store = Arc::new(MockStore::new().with_catalog(Err("")));
        let locator = origin();
        let loader = loader(store, locator.clone(), None);

        assert_eq!(loader.load().await, LoadOutcome::FetchFailed);
        let snapshot = loader.snapshot().await;

        assert!(!snapshot.is_loading);
        let err = snapshot.error.unwrap();
        assert_eq!(err.kind, OperationErrorKind::CatalogFetch);
        assert_eq!(err.message, FETCH_FAILED_MESSAGE);
        assert_eq!(locator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_position_timeout_is_terminal() {
        let store = Arc::new(MockStore::new().with_catalog(Ok(vec![place("a", 0.0, 0.0)])));
        let locator = Arc::new(MockLocator::new(LocatorBehavior::Never));
        let loader = loader(store, locator, Some(Duration::from_millis(50)));

        assert_eq!(loader.load().await, LoadOutcome::PositionFailed);
        let snapshot = loader.snapshot().await;

        assert!(!snapshot.is_loading);
        assert!(snapshot.places.is_empty());
        assert_eq!(snapshot.error.unwrap().kind, OperationErrorKind::CatalogLoad);
    }

    #[tokio::test]
    async fn test_unbounded_wait_stays_loading() {
        let store = Arc::new(MockStore::new().with_catalog(Ok(vec![place("a", 0.0, 0.0)])));
        let locator = Arc::new(MockLocator::new(LocatorBehavior::Never));
        let loader = Arc::new(loader(store, locator, None));

        let task = tokio::spawn({
            let loader = loader.clone();
            async move { loader.load().await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;

        let snapshot = loader.snapshot().await;
        assert!(snapshot.is_loading);
        assert!(snapshot.error.is_none());
        task.abort();
    }

    #[tokio::test]
    async fn test_denied_position() {
        let store = Arc::new(MockStore::new().with_catalog(Ok(vec![place("a", 0.0, 0.0)])));
        let locator = Arc::new(MockLocator::new(LocatorBehavior::Denied));
        let loader = loader(store, locator, Some(Duration::from_secs(1)));

        assert_eq!(loader.load().await, LoadOutcome::PositionFailed);
        let err = loader.snapshot().await.error.unwrap();
        assert_eq!(err.message, "Location permission denied");
    }

    #[tokio::test]
    async fn test_load_runs_once() {
        let store = Arc::new(MockStore::new().with_catalog(Ok(vec![place("a", 0.0, 0.0)])));
        let loader = loader(store.clone(), origin(), None);

        loader.load().await;
        assert_eq!(loader.load().await, LoadOutcome::AlreadyLoaded);
        assert_eq!(store.catalog_fetches.load(Ordering::SeqCst), 1);
        assert!(loader.find("a").await.is_some());
        assert!(loader.find("b").await.is_none());
    }
}
