use actix_web::{web, HttpResponse, Responder};
use crate::models::CatalogResponse;
use crate::routes::{catalog_failed, AppState};
use crate::services::CatalogError;

/// Configure catalog browsing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/locations", web::get().to(list_locations))
        .route("/locations/{id}", web::get().to(get_location));
}

/// GET /api/v1/locations
async fn list_locations(state: web::Data<AppState>) -> impl Responder {
    match state.cache.catalog(state.catalog.as_ref()).await {
        Ok(snapshot) => {
            let locations = snapshot.to_vec();
            HttpResponse::Ok().json(CatalogResponse {
                count: locations.len(),
                locations,
            })
        }
        Err(e) => catalog_failed(e),
    }
}

/// GET /api/v1/locations/{id}
async fn get_location(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    let snapshot = match state.cache.catalog(state.catalog.as_ref()).await {
        Ok(snapshot) => snapshot,
        Err(e) => return catalog_failed(e),
    };

    match snapshot.iter().find(|location| location.id == id) {
        Some(location) => HttpResponse::Ok().json(location),
        None => {
            tracing::debug!("Location {} not in catalog", id);
            catalog_failed(CatalogError::NotFound(id))
        }
    }
}
