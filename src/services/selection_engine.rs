// src/services/selection_engine.rs
// DOCUMENTATION: Optimistic synchronization of the personal place list
// PURPOSE: Apply add/remove locally, persist remotely, roll back on failure

use crate::models::{
    OperationError, OperationErrorKind, Place, SelectionSnapshot, DELETE_FAILED_MESSAGE,
    FETCH_FAILED_MESSAGE, UPDATE_FAILED_MESSAGE,
};
use crate::services::PlacesStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Result of a select call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Added,
    /// Id already in the list; nothing was sent
    AlreadySelected,
    /// Remote write failed and the list was restored
    RolledBack,
}

/// Result of a confirm_removal call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    Removed,
    NothingPending,
    /// Target had already left the list (e.g. its select rolled back); nothing was sent
    NotListed,
    RolledBack,
}

#[derive(Debug, Default)]
struct SelectionState {
    personal_list: Vec<Place>,
    is_loading_initial_list: bool,
    fetch_error: Option<OperationError>,
    mutate_error: Option<OperationError>,
    /// Some while the removal prompt is open
    pending_removal: Option<Place>,
}

/// Owner of the personal list
/// DOCUMENTATION: All list mutations go through `write_gate`, held from the
/// snapshot until the remote outcome is applied, so overlapping selects and
/// removals run one after another. `state` is never locked across a remote
/// call, which keeps the optimistic list readable while a write is in flight.
pub struct SelectionEngine {
    store: Arc<dyn PlacesStore>,
    state: RwLock<SelectionState>,
    write_gate: Mutex<()>,
    initialized: AtomicBool,
}

impl SelectionEngine {
    pub fn new(store: Arc<dyn PlacesStore>) -> Self {
        Self {
            store,
            state: RwLock::new(SelectionState::default()),
            write_gate: Mutex::new(()),
            initialized: AtomicBool::new(false),
        }
    }

    /// Load the persisted personal list
    /// DOCUMENTATION: Runs once per engine; later calls are ignored.
    /// Loading is cleared on both success and failure.
    pub async fn initialize(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            log::warn!("Personal list already initialized, ignoring");
            return;
        }

        let _gate = self.write_gate.lock().await;
        self.state.write().await.is_loading_initial_list = true;

        let result = self.store.fetch_user_places().await;

        let mut state = self.state.write().await;
        state.is_loading_initial_list = false;
        match result {
            Ok(places) => {
                log::info!("Loaded personal list with {} places", places.len());
                state.personal_list = places;
            }
            Err(e) => {
                log::error!("Failed to fetch personal list: {}", e);
                state.fetch_error = Some(OperationError::new(
                    OperationErrorKind::FetchInitialList,
                    Some(e.to_string()),
                    FETCH_FAILED_MESSAGE,
                ));
            }
        }
    }

    /// Add a place to the front of the list
    pub async fn select(&self, place: Place) -> SelectOutcome {
        let _gate = self.write_gate.lock().await;

        let previous = {
            let mut state = self.state.write().await;
            if state.personal_list.iter().any(|p| p.id == place.id) {
                log::debug!("Place {} already selected", place.id);
                return SelectOutcome::AlreadySelected;
            }
            let previous = state.personal_list.clone();
            state.personal_list.insert(0, place.clone());
            previous
        };

        let mut payload = Vec::with_capacity(previous.len() + 1);
        payload.push(place.clone());
        payload.extend(previous.iter().cloned());

        match self.store.replace_user_places(&payload).await {
            Ok(()) => {
                log::info!("Selected place {}", place.id);
                SelectOutcome::Added
            }
            Err(e) => {
                log::warn!("Rolling back selection of {}: {}", place.id, e);
                self.rollback(previous, e.to_string(), UPDATE_FAILED_MESSAGE)
                    .await;
                SelectOutcome::RolledBack
            }
        }
    }

    /// Open the removal prompt for `place`
    pub async fn request_removal(&self, place: Place) {
        log::debug!("Removal requested for {}", place.id);
        self.state.write().await.pending_removal = Some(place);
    }

    /// Close the removal prompt without touching the list
    pub async fn cancel_removal(&self) {
        if let Some(place) = self.state.write().await.pending_removal.take() {
            log::debug!("Removal of {} cancelled", place.id);
        }
    }

    /// Remove the pending target, closing the prompt
    pub async fn confirm_removal(&self) -> RemovalOutcome {
        let _gate = self.write_gate.lock().await;

        let (target, previous, remaining) = {
            let mut state = self.state.write().await;
            let Some(target) = state.pending_removal.take() else {
                log::debug!("Confirm removal with nothing pending");
                return RemovalOutcome::NothingPending;
            };
            let previous = state.personal_list.clone();
            let remaining: Vec<Place> = previous
                .iter()
                .filter(|p| p.id != target.id)
                .cloned()
                .collect();
            if remaining.len() == previous.len() {
                log::debug!("Place {} no longer listed, nothing to remove", target.id);
                return RemovalOutcome::NotListed;
            }
            state.personal_list = remaining.clone();
            (target, previous, remaining)
        };

        match self.store.replace_user_places(&remaining).await {
            Ok(()) => {
                log::info!("Removed place {}", target.id);
                RemovalOutcome::Removed
            }
            Err(e) => {
                log::warn!("Rolling back removal of {}: {}", target.id, e);
                self.rollback(previous, e.to_string(), DELETE_FAILED_MESSAGE)
                    .await;
                RemovalOutcome::RolledBack
            }
        }
    }

    /// Dismiss both error channels
    pub async fn acknowledge_error(&self) {
        let mut state = self.state.write().await;
        state.fetch_error = None;
        state.mutate_error = None;
    }

    pub async fn snapshot(&self) -> SelectionSnapshot {
        let state = self.state.read().await;
        SelectionSnapshot {
            places: state.personal_list.clone(),
            is_loading: state.is_loading_initial_list,
            fetch_error: state.fetch_error.clone(),
            mutate_error: state.mutate_error.clone(),
            pending_removal: state.pending_removal.clone(),
            removal_prompt_open: state.pending_removal.is_some(),
        }
    }

    /// Look up a place in the personal list
    pub async fn find(&self, id: &str) -> Option<Place> {
        let state = self.state.read().await;
        state.personal_list.iter().find(|p| p.id == id).cloned()
    }

    async fn rollback(&self, previous: Vec<Place>, detail: String, fallback: &str) {
        let mut state = self.state.write().await;
        state.personal_list = previous;
        state.mutate_error = Some(OperationError::new(
            OperationErrorKind::MutateList,
            Some(detail),
            fallback,
        ));
    }
}
