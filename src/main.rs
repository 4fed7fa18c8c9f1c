// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Travel Atlas Server
//!
//! Serves the travel page: a world map colored by the places a user has
//! been, their travel statistics, and the place editor.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use travel_atlas::{
    config::Config,
    services::{GeoCache, GeoLoader, HttpBackend, InMemoryBackend, TravelBackend},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Travel Atlas");

    // Boundaries load lazily on the first map request
    let loader = GeoLoader::new(&config.geojson_path, config.geojson_fallback_url.clone())?;
    let geo = GeoCache::new(loader);
    tracing::info!(
        path = %config.geojson_path.display(),
        fallback = %config.geojson_fallback_url,
        "World boundaries configured"
    );

    if config.offline_demo {
        tracing::info!("Offline demo mode, using in-memory backend");
        serve(config, InMemoryBackend::demo(), geo).await
    } else {
        tracing::info!(url = %config.backend_url, "Using travel backend");
        let backend = HttpBackend::new(config.backend_url.clone(), config.session_cookie.clone())?;
        serve(config, backend, geo).await
    }
}

async fn serve<B: TravelBackend>(
    config: Config,
    backend: B,
    geo: GeoCache,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("0.0.0.0:{}", config.port);
    let state = Arc::new(AppState::new(config, backend, geo));

    // Build router
    let app = travel_atlas::routes::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("travel_atlas=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
