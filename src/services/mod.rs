// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod catalog_loader;
pub mod distance;
pub mod geolocation;
pub mod places_store;
pub mod selection_engine;

#[cfg(test)]
pub mod testing;

pub use catalog_loader::*;
pub use distance::*;
pub use geolocation::*;
pub use places_store::*;
pub use selection_engine::*;
