// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Travel Atlas: a world map of the places you have been
//!
//! This crate serves the travel page of a travel community site. It colors
//! a world map by each country's status for the signed-in user, shows
//! travel statistics, and lets the user record places through an editor
//! dialog. Place data lives in a separate backend reached over HTTP.

pub mod config;
pub mod context;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod ui;

use config::Config;
use services::{GeoCache, PathCache, TravelBackend};
use ui::{MapData, MapRenderer};

/// Shared application state.
pub struct AppState<B> {
    pub config: Config,
    pub backend: B,
    pub geo: GeoCache,
    pub paths: PathCache,
    pub renderer: MapRenderer,
}

impl<B: TravelBackend> AppState<B> {
    pub fn new(config: Config, backend: B, geo: GeoCache) -> Self {
        let renderer = MapRenderer::new(config.canvas);
        Self {
            config,
            backend,
            geo,
            paths: PathCache::new(),
            renderer,
        }
    }

    /// Boundaries and projected paths for the configured canvas.
    ///
    /// A load failure yields `MapData::Unavailable`; the next call retries.
    pub async fn map_data(&self) -> MapData {
        match self.geo.get().await {
            Ok(dataset) => {
                let paths = self.paths.paths(&dataset, self.renderer.canvas());
                MapData::Ready { dataset, paths }
            }
            Err(e) => {
                tracing::error!(error = %e, "World boundaries unavailable");
                MapData::Unavailable
            }
        }
    }
}
