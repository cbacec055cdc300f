//! Bitacora Server
//!
//! Serves the operational event log: data movements between the billing
//! system and the CRM, and the telephony call log, read from JSON snapshots.

use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpResponse, HttpServer};
use bitacora_api::{
    configure_calls, configure_dashboard, configure_movements, configure_snapshot,
    configure_status,
};
use bitacora_core::{AppConfig, Snapshot};
use bitacora_services::{JsonFileSource, SnapshotStore};
use chrono::Utc;
use std::env;
use tracing::{error, info, warn};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "bitacora",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Configure API routes
fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            // Health check
            .route("/health", web::get().to(health_check))
            // Landing page metrics
            .configure(configure_dashboard)
            // Mikrowisp -> GHL synchronization log
            .configure(configure_movements)
            // RingByName call log
            .configure(configure_calls)
            // Status labels and tiers
            .configure(configure_status)
            // Snapshot reload
            .configure(configure_snapshot),
    );
}

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "bitacora={},bitacora_api={},bitacora_services={},bitacora_core={},actix_web=info",
            log_level, log_level, log_level, log_level
        ))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    init_tracing();

    info!("Starting Bitacora v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // Initial snapshot; the server still starts empty if the files are not there yet
    let source = JsonFileSource::from_config(&config.snapshot);
    let snapshot = match source.load_snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(
                "Could not load initial snapshot ({}), starting with an empty one",
                e
            );
            Snapshot::empty(Utc::now())
        }
    };

    let store = web::Data::new(SnapshotStore::new(snapshot));
    let source = web::Data::new(source);
    let search_config = web::Data::new(config.search.clone());

    let bind_addr = config.server_addr();
    let workers = config.server.workers;
    let cors_origins = config.server.cors_origins.clone();

    info!(
        "Starting HTTP server on {} with {} workers",
        bind_addr, workers
    );

    // Create and run server
    HttpServer::new(move || {
        // Configure CORS - clone cors_origins for each worker
        let cors_origins_inner = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                let origins: Vec<&str> = cors_origins_inner.split(',').collect();
                if let Ok(origin_str) = origin.to_str() {
                    origins.iter().any(|o| o.trim() == origin_str)
                } else {
                    false
                }
            })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            // Shared snapshot and its source
            .app_data(store.clone())
            .app_data(source.clone())
            .app_data(search_config.clone())
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                let error_message = err.to_string();
                actix_web::error::InternalError::from_response(
                    err,
                    HttpResponse::BadRequest().json(serde_json::json!({
                        "error": "invalid_query",
                        "message": error_message,
                        "status": 400
                    })),
                )
                .into()
            }))
            // Middleware
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(middleware::Logger::new("%a \"%r\" %s %b %Dms"))
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::trim())
            // Configure routes
            .configure(configure_routes)
            // Root redirect to health
            .route(
                "/",
                web::get().to(|| async {
                    HttpResponse::Found()
                        .append_header(("Location", "/api/v1/health"))
                        .finish()
                }),
            )
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run()
    .await
}
