// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, remote collaborators, the sync core, and start HTTP server

mod config;
mod errors;
mod handlers;
mod models;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use config::Config;
use dotenv::dotenv;
use services::{
    CatalogLoader, FixedPositionProvider, HttpPlacesStore, HttpPositionProvider, PlacesStore,
    PositionProvider, SelectionEngine,
};
use std::sync::Arc;

/// Kick off the one-time loads without blocking server startup
fn start_background_loads(engine: Arc<SelectionEngine>, loader: Arc<CatalogLoader>) {
    tokio::spawn(async move {
        engine.initialize().await;
    });
    tokio::spawn(async move {
        let outcome = loader.load().await;
        log::info!("Catalog load finished: {:?}", outcome);
    });
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    config.validate().context("invalid configuration")?;

    log::info!("Starting place-picker service...");
    log::info!("Environment: {}", config.environment);
    log::info!("Places backend: {}", config.backend_url);

    // 4. Remote collaborators
    let store: Arc<dyn PlacesStore> = Arc::new(
        HttpPlacesStore::new(&config.backend_url, config.request_timeout())
            .context("failed to build backend client")?,
    );

    let locator: Arc<dyn PositionProvider> = match config.device_position() {
        Some(position) => {
            log::info!(
                "Using fixed device position: lat={}, lng={}",
                position.lat,
                position.lng
            );
            Arc::new(FixedPositionProvider::new(position))
        }
        None => {
            log::info!("Using IP geolocation: {}", config.geolocation_url);
            Arc::new(
                HttpPositionProvider::new(&config.geolocation_url, config.request_timeout())
                    .context("failed to build geolocation client")?,
            )
        }
    };

    // 5. Sync core
    let engine = Arc::new(SelectionEngine::new(store.clone()));
    let loader = Arc::new(CatalogLoader::new(
        store,
        locator,
        config.geolocation_timeout(),
    ));
    start_background_loads(engine.clone(), loader.clone());

    // 6. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    log::info!("Server Address: {}", server_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(engine.clone()))
            .app_data(web::Data::new(loader.clone()))
            // Middleware
            .wrap(Logger::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::catalog_config)
            .configure(handlers::user_places_config)
    })
    .bind(&server_addr)?
    .run()
    .await?;

    Ok(())
}
