// src/handlers/catalog.rs
// DOCUMENTATION: HTTP handlers for the available places catalog
// PURPOSE: Expose the distance-ordered catalog to the UI

use crate::services::CatalogLoader;
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

/// GET /catalog
/// Catalog ordered by proximity, with loading flag and error
pub async fn get_catalog(loader: web::Data<Arc<CatalogLoader>>) -> impl Responder {
    HttpResponse::Ok().json(loader.snapshot().await)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/catalog", web::get().to(get_catalog));
}
