use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use nomad_match::config::Settings;
use nomad_match::core::{Matcher, MatcherSettings};
use nomad_match::logging::init_logging;
use nomad_match::routes::{self, AppState};
use nomad_match::services::{build_catalog, CacheManager};
use std::sync::Arc;
use tracing::{error, info};

fn startup_error(context: &str, e: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, e);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging);

    info!("Starting Nomad Match service...");
    info!("Configuration loaded successfully");

    let catalog = build_catalog(&settings.catalog)
        .await
        .map_err(|e| startup_error("Failed to initialize catalog", e))?;

    info!("Catalog source initialized ({:?})", settings.catalog.source);

    let cache = Arc::new(CacheManager::new(settings.cache.max_results, settings.cache.ttl_secs));

    info!(
        "Cache manager initialized ({} rankings, TTL: {}s)",
        settings.cache.max_results, settings.cache.ttl_secs
    );

    // Warm the snapshot; a remote catalog that is down only degrades health
    match cache.catalog(catalog.as_ref()).await {
        Ok(snapshot) => info!("Catalog ready with {} locations", snapshot.len()),
        Err(e) => error!("Catalog not reachable at startup: {}", e),
    }

    let matcher_settings = MatcherSettings::from(&settings.matching);
    let matcher = Matcher::new(matcher_settings);

    info!("Matcher initialized with settings: {:?}", matcher_settings);

    let app_state = AppState {
        catalog,
        cache,
        matcher,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .configure(routes::configure_extractors)
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
