// src/models/status.rs
// DOCUMENTATION: User-facing operation errors and state snapshots
// PURPOSE: What the sync engine and catalog loader expose to UI collaborators

use super::Place;
use serde::{Deserialize, Serialize};

pub const FETCH_FAILED_MESSAGE: &str =
    "The fetch operation cannot be completed, please try again later.";
pub const UPDATE_FAILED_MESSAGE: &str =
    "There's an error when updating the places. Please try again later.";
pub const DELETE_FAILED_MESSAGE: &str =
    "There's an error when deleting this place. Please try again later.";
pub const LOCATION_FAILED_MESSAGE: &str =
    "Could not determine your location, please try again later.";

/// Which operation produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationErrorKind {
    /// Initial fetch of the personal list
    FetchInitialList,
    /// Replacing the personal list after select/remove
    MutateList,
    /// Fetching the catalog
    CatalogFetch,
    /// Obtaining the device position for ordering
    CatalogLoad,
}

/// An acknowledgeable error shown to the user
/// DOCUMENTATION: Stays set until the user acknowledges it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationError {
    pub kind: OperationErrorKind,
    pub message: String,
}

impl OperationError {
    /// Build an error, falling back to `fallback` when the failure gave no message
    pub fn new(kind: OperationErrorKind, detail: Option<String>, fallback: &str) -> Self {
        let message = detail
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        Self { kind, message }
    }
}

/// Read-only view of the personal list state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionSnapshot {
    pub places: Vec<Place>,
    pub is_loading: bool,
    pub fetch_error: Option<OperationError>,
    pub mutate_error: Option<OperationError>,
    pub pending_removal: Option<Place>,
    pub removal_prompt_open: bool,
}

/// Read-only view of the ordered catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSnapshot {
    pub places: Vec<Place>,
    pub is_loading: bool,
    pub error: Option<OperationError>,
}
