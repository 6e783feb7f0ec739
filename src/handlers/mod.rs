// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod catalog;
pub mod health;
pub mod user_places;

pub use catalog::config as catalog_config;
pub use health::config as health_config;
pub use user_places::config as user_places_config;
