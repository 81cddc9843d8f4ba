//! Trade Compass server - REST API for AI-assisted market research
//!
//! Provides endpoints for:
//! - Research flows (market analysis, logistics, trade scores, buyers, creators, shops)
//! - The report cart (pin, reorder, and persist research fragments)

use std::sync::Arc;

use axum::extract::Json;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trade_compass::adapters::http::{
    report_routes, research_routes, ReportAppState, ResearchAppState,
};
use trade_compass::adapters::{FileKeyValueStore, GeminiClient, GeminiConfig};
use trade_compass::config::AppConfig;
use trade_compass::domain::report::ReportStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env + environment configuration
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    // Build the generation client and the persistent report cart
    let api_key = config.ai.gemini_api_key.clone().unwrap_or_default();
    let gemini = GeminiConfig::new(api_key)
        .with_model(config.ai.model.clone())
        .with_timeout(config.ai.timeout())
        .with_max_retries(config.ai.max_retries);
    let client = Arc::new(GeminiClient::new(gemini));

    let storage = Arc::new(FileKeyValueStore::new(config.storage.data_path()));
    info!(data_dir = %config.storage.data_dir, "Loading report cart");
    let store = Arc::new(ReportStore::load(storage).await);

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(health))
        .merge(research_routes(ResearchAppState { client }))
        .merge(report_routes(ReportAppState { store }))
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config));

    let addr = config.server.socket_addr();
    info!("Starting Trade Compass on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}

/// GET /health - Liveness probe
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Initialize tracing from `RUST_LOG`, falling back to the configured
/// filter. Production logs as JSON lines.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// CORS configuration for web clients. Without configured origins every
/// origin is allowed, which suits local development.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
