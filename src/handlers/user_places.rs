// src/handlers/user_places.rs
// DOCUMENTATION: HTTP handlers for the personal place list
// PURPOSE: Parse requests, drive the selection engine, return its state

use crate::errors::PlacesError;
use crate::models::SelectPlaceRequest;
use crate::services::{CatalogLoader, SelectionEngine};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// GET /user-places
/// Personal list, loading flag, both error channels and the removal prompt
pub async fn get_user_places(engine: web::Data<Arc<SelectionEngine>>) -> impl Responder {
    HttpResponse::Ok().json(engine.snapshot().await)
}

/// POST /user-places
/// Select a catalog place. A failed remote write still answers 200: the
/// rollback and its error are part of the returned state.
pub async fn select_place(
    engine: web::Data<Arc<SelectionEngine>>,
    loader: web::Data<Arc<CatalogLoader>>,
    req: web::Json<SelectPlaceRequest>,
) -> Result<impl Responder, PlacesError> {
    if let Err(e) = req.validate() {
        return Err(PlacesError::ValidationError(e.to_string()));
    }

    let place = loader
        .find(&req.place_id)
        .await
        .ok_or_else(|| PlacesError::NotFound(req.place_id.clone()))?;

    let outcome = engine.select(place).await;
    log::debug!("Select {} -> {:?}", req.place_id, outcome);

    Ok(HttpResponse::Ok().json(engine.snapshot().await))
}

/// POST /user-places/{id}/removal
/// Open the removal prompt for a place in the personal list
pub async fn request_removal(
    engine: web::Data<Arc<SelectionEngine>>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    let id = path.into_inner();
    let place = engine
        .find(&id)
        .await
        .ok_or_else(|| PlacesError::NotFound(id.clone()))?;

    engine.request_removal(place).await;
    Ok(HttpResponse::Ok().json(engine.snapshot().await))
}

/// POST /user-places/removal/confirm
pub async fn confirm_removal(engine: web::Data<Arc<SelectionEngine>>) -> impl Responder {
    let outcome = engine.confirm_removal().await;
    log::debug!("Confirm removal -> {:?}", outcome);
    HttpResponse::Ok().json(engine.snapshot().await)
}

/// POST /user-places/removal/cancel
pub async fn cancel_removal(engine: web::Data<Arc<SelectionEngine>>) -> impl Responder {
    engine.cancel_removal().await;
    HttpResponse::Ok().json(engine.snapshot().await)
}

/// POST /errors/acknowledge
/// Single dismiss for the fetch and mutate error channels
pub async fn acknowledge_error(engine: web::Data<Arc<SelectionEngine>>) -> impl Responder {
    engine.acknowledge_error().await;
    HttpResponse::Ok().json(engine.snapshot().await)
}

/// Configuration for personal list routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user-places")
            .route("", web::get().to(get_user_places))
            .route("", web::post().to(select_place))
            .route("/removal/confirm", web::post().to(confirm_removal))
            .route("/removal/cancel", web::post().to(cancel_removal))
            .route("/{id}/removal", web::post().to(request_removal)),
    )
    .route("/errors/acknowledge", web::post().to(acknowledge_error));
}
