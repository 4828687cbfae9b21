// Route exports
pub mod locations;
pub mod matches;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use std::sync::Arc;
use crate::core::{Matcher, ValidationError};
use crate::models::ErrorResponse;
use crate::services::{CacheManager, CatalogError, LocationCatalog};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn LocationCatalog>,
    pub cache: Arc<CacheManager>,
    pub matcher: Matcher,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(locations::configure),
    );
}

/// JSON error response for payload errors raised by extractors
#[derive(Debug)]
pub struct JsonError(ErrorResponse);

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError(ErrorResponse::new("invalid_json", format!("Invalid JSON: {}", err), 400)).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    JsonError(ErrorResponse::new("invalid_query", format!("Invalid query: {}", err), 400)).into()
}

/// Handle path segment errors
pub fn handle_path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    JsonError(ErrorResponse::new("invalid_path", format!("Invalid path: {}", err), 400)).into()
}

/// Register the JSON, query and path error handlers on an app
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
        .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
        .app_data(web::PathConfig::default().error_handler(handle_path_error));
}

pub(crate) fn validation_failed(error: ValidationError) -> HttpResponse {
    tracing::info!("Rejected preferences: {}", error);
    HttpResponse::BadRequest().json(
        ErrorResponse::new("validation_failed", error.to_string(), 400).with_violations(error.violations),
    )
}

pub(crate) fn catalog_failed(error: CatalogError) -> HttpResponse {
    match error {
        CatalogError::NotFound(id) => HttpResponse::NotFound().json(ErrorResponse::new(
            "not_found",
            format!("Location not found: {}", id),
            404,
        )),
        CatalogError::RequestError(_) | CatalogError::ApiError(_) | CatalogError::InvalidData(_) => {
            tracing::error!("Catalog source failed: {}", error);
            HttpResponse::BadGateway().json(ErrorResponse::new("catalog_unavailable", error.to_string(), 502))
        }
        CatalogError::Io(_) | CatalogError::Misconfigured(_) => {
            tracing::error!("Catalog failed: {}", error);
            HttpResponse::InternalServerError().json(ErrorResponse::new("catalog_error", error.to_string(), 500))
        }
    }
}

pub(crate) fn internal_error(context: &str, message: impl std::fmt::Display) -> HttpResponse {
    tracing::error!("{}: {}", context, message);
    HttpResponse::InternalServerError().json(ErrorResponse::new("internal_error", context, 500))
}
