use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use uuid::Uuid;
use crate::core::{rank, score, validate_find_request, validate_preferences};
use crate::models::{FindMatchesRequest, FindMatchesResponse, HealthResponse, PreferenceSet, ScoreLocationRequest, ScoreResponse};
use crate::routes::{catalog_failed, internal_error, validation_failed, AppState};
use crate::services::{CacheKey, CatalogError, CatalogSnapshot, RankedResults};

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/matches/score/{id}", web::post().to(score_location));
}

/// Health check endpoint
///
/// Reports `degraded` while the catalog source cannot be read.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let catalog_size = match state.cache.catalog(state.catalog.as_ref()).await {
        Ok(snapshot) => Some(snapshot.len()),
        Err(e) => {
            tracing::warn!("Health check could not read catalog: {}", e);
            None
        }
    };

    let status = if catalog_size.is_some() { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_size,
        cache: state.cache.stats().await,
        timestamp: chrono::Utc::now(),
    })
}

/// Rank the whole catalog for these preferences, reusing a cached ranking when present
///
/// Cached rankings are only valid for the snapshot they were computed from.
async fn ranked_catalog(
    state: &AppState,
    preferences: &PreferenceSet,
    snapshot: CatalogSnapshot,
) -> Result<RankedResults, HttpResponse> {
    let fingerprint = preferences
        .fingerprint()
        .map_err(|e| internal_error("Failed to fingerprint preferences", e))?;
    let key = CacheKey::ranked(snapshot.generation(), &fingerprint);

    if let Some(ranked) = state.cache.ranked(&key).await {
        return Ok(ranked);
    }

    let owned = preferences.clone();
    let ranked = web::block(move || rank(&owned, snapshot.iter().cloned()))
        .await
        .map_err(|e| internal_error("Scoring task failed", e))?;

    let ranked = Arc::new(ranked);
    state.cache.store_ranked(key, ranked.clone()).await;
    Ok(ranked)
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "preferences": { "userType": "remoteWorker", "preferences": { ... } },
///   "limit": 20,
///   "minMatch": 50,
///   "region": "Europe",
///   "country": "Portugal",
///   "friendlyOnly": true,
///   "excludeIds": ["string"]
/// }
/// ```
async fn find_matches(state: web::Data<AppState>, req: web::Json<FindMatchesRequest>) -> impl Responder {
    let (preferences, query) = match validate_find_request(&req) {
        Ok(validated) => validated,
        Err(e) => return validation_failed(e),
    };

    let request_id = Uuid::new_v4().to_string();
    tracing::info!(
        "Finding matches: request={}, vanlifer={}, limit={:?}",
        request_id,
        preferences.is_vanlifer(),
        query.limit
    );

    let snapshot = match state.cache.catalog(state.catalog.as_ref()).await {
        Ok(snapshot) => snapshot,
        Err(e) => return catalog_failed(e),
    };

    let ranked = match ranked_catalog(&state, &preferences, snapshot).await {
        Ok(ranked) => ranked,
        Err(response) => return response,
    };

    let outcome = state.matcher.select(&preferences, &ranked, &query);

    tracing::info!(
        "Returning {} matches for request {} (from {} candidates)",
        outcome.matches.len(),
        request_id,
        outcome.total_candidates
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        request_id,
        total_results: outcome.matches.len(),
        total_candidates: outcome.total_candidates,
        matches: outcome.matches,
        generated_at: chrono::Utc::now(),
    })
}

/// Score one location
///
/// POST /api/v1/matches/score/{id}
async fn score_location(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<ScoreLocationRequest>,
) -> impl Responder {
    let id = path.into_inner();

    let preferences = match validate_preferences(&req.preferences) {
        Ok(preferences) => preferences,
        Err(e) => return validation_failed(e.nested_under("preferences")),
    };

    let snapshot = match state.cache.catalog(state.catalog.as_ref()).await {
        Ok(snapshot) => snapshot,
        Err(e) => return catalog_failed(e),
    };

    let location = match snapshot.iter().find(|location| location.id == id) {
        Some(location) => location.clone(),
        None => return catalog_failed(CatalogError::NotFound(id)),
    };

    let result = score(&preferences, location);
    tracing::debug!("Scored location {}: {}", id, result.match_percentage);

    HttpResponse::Ok().json(ScoreResponse {
        request_id: Uuid::new_v4().to_string(),
        result,
    })
}
