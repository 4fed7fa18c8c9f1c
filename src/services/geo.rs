// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! World boundary loading with a remote mirror fallback.

use crate::models::geo::{GeoDataset, GeoFeature, NO_COUNTRY_CODE};
use geo::{Geometry, MultiPolygon};
use geojson::GeoJson;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

/// Upper bound on one mirror request, connect through body.
pub const MIRROR_TIMEOUT: Duration = Duration::from_secs(15);

/// Property names tried, in order, for the country code.
const CODE_PROPERTIES: [&str; 3] = ["ISO_A2", "ISO_A2_EH", "ISO3166-1-Alpha-2"];
/// Property names tried, in order, for the display name.
const NAME_PROPERTIES: [&str; 2] = ["ADMIN", "name"];

/// Loads the country boundary dataset from disk, or from a mirror.
#[derive(Clone)]
pub struct GeoLoader {
    http: reqwest::Client,
    local_path: PathBuf,
    fallback_url: String,
}

impl GeoLoader {
    pub fn new<P: AsRef<Path>>(
        local_path: P,
        fallback_url: impl Into<String>,
    ) -> Result<Self, GeoLoadError> {
        Self::with_timeout(local_path, fallback_url, MIRROR_TIMEOUT)
    }

    /// Loader whose mirror requests give up after `timeout`.
    pub fn with_timeout<P: AsRef<Path>>(
        local_path: P,
        fallback_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GeoLoadError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeoLoadError::Http(format!("failed building HTTP client: {}", e)))?;

        Ok(Self {
            http,
            local_path: local_path.as_ref().to_path_buf(),
            fallback_url: fallback_url.into(),
        })
    }

    /// Load the dataset, trying the local file first and the mirror second.
    ///
    /// Either source yields the whole dataset or nothing.
    pub async fn load(&self) -> Result<GeoDataset, GeoLoadError> {
        let local_err = match self.load_local().await {
            Ok(dataset) => return Ok(dataset),
            Err(e) => e,
        };

        tracing::warn!(
            path = %self.local_path.display(),
            error = %local_err,
            url = %self.fallback_url,
            "Local boundaries unavailable, falling back to mirror"
        );

        self.load_remote()
            .await
            .map_err(|remote_err| GeoLoadError::Unavailable {
                local: local_err.to_string(),
                remote: remote_err.to_string(),
            })
    }

    async fn load_local(&self) -> Result<GeoDataset, GeoLoadError> {
        let json_data = tokio::fs::read_to_string(&self.local_path)
            .await
            .map_err(|e| GeoLoadError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    async fn load_remote(&self) -> Result<GeoDataset, GeoLoadError> {
        if self.fallback_url.is_empty() {
            return Err(GeoLoadError::NoMirror);
        }

        let response = self
            .http
            .get(&self.fallback_url)
            .send()
            .await
            .map_err(|e| GeoLoadError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeoLoadError::Http(format!("HTTP {}", response.status())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeoLoadError::Http(e.to_string()))?;
        Self::load_from_json(&body)
    }

    /// Parse a GeoJSON FeatureCollection into country features.
    pub fn load_from_json(json_data: &str) -> Result<GeoDataset, GeoLoadError> {
        let geojson: GeoJson = json_data
            .parse()
            .map_err(|e: geojson::Error| GeoLoadError::ParseError(e.to_string()))?;

        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err(GeoLoadError::ParseError(
                "expected a FeatureCollection".to_string(),
            ));
        };

        let mut features = Vec::with_capacity(collection.features.len());
        for feature in collection.features {
            let code = Self::country_code(&feature);
            let name = NAME_PROPERTIES
                .iter()
                .find_map(|key| feature.property(key).and_then(|v| v.as_str()))
                .unwrap_or("Unknown")
                .to_string();

            let Some(geom) = feature.geometry else {
                continue;
            };
            let geometry = Self::convert_geometry(geom.value)?;
            features.push(GeoFeature {
                code,
                name,
                geometry,
            });
        }

        tracing::info!(count = features.len(), "Loaded country boundaries");
        Ok(GeoDataset::new(features))
    }

    /// First usable ISO code; Natural Earth marks some countries "-99" in
    /// ISO_A2 and carries the real code in ISO_A2_EH.
    fn country_code(feature: &geojson::Feature) -> String {
        CODE_PROPERTIES
            .iter()
            .filter_map(|key| feature.property(key).and_then(|v| v.as_str()))
            .map(|code| code.trim().to_uppercase())
            .find(|code| !code.is_empty() && code != NO_COUNTRY_CODE)
            .unwrap_or_else(|| NO_COUNTRY_CODE.to_string())
    }

    fn convert_geometry(value: geojson::Value) -> Result<MultiPolygon<f64>, GeoLoadError> {
        let geometry: Geometry<f64> = value
            .try_into()
            .map_err(|e: geojson::Error| GeoLoadError::ParseError(e.to_string()))?;

        match geometry {
            Geometry::Polygon(poly) => Ok(MultiPolygon(vec![poly])),
            Geometry::MultiPolygon(multi) => Ok(multi),
            _ => Err(GeoLoadError::UnsupportedGeometry),
        }
    }
}

/// Process-lifetime cache of the boundary dataset.
///
/// Only successful loads are cached, so a failed load is retried on the
/// next request.
pub struct GeoCache {
    loader: Option<GeoLoader>,
    dataset: OnceCell<Arc<GeoDataset>>,
}

impl GeoCache {
    pub fn new(loader: GeoLoader) -> Self {
        Self {
            loader: Some(loader),
            dataset: OnceCell::new(),
        }
    }

    /// A cache that is already populated (tests, preloaded data).
    pub fn preloaded(dataset: GeoDataset) -> Self {
        Self {
            loader: None,
            dataset: OnceCell::new_with(Some(Arc::new(dataset))),
        }
    }

    /// Get the dataset, loading it on first use.
    pub async fn get(&self) -> Result<Arc<GeoDataset>, GeoLoadError> {
        self.dataset
            .get_or_try_init(|| async {
                match &self.loader {
                    Some(loader) => loader.load().await.map(Arc::new),
                    None => Err(GeoLoadError::NoMirror),
                }
            })
            .await
            .cloned()
    }
}

/// Errors from boundary loading.
#[derive(Debug, thiserror::Error)]
pub enum GeoLoadError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to fetch boundaries: {0}")]
    Http(String),

    #[error("No boundary mirror configured")]
    NoMirror,

    #[error("Failed to parse GeoJSON: {0}")]
    ParseError(String),

    #[error("Unsupported geometry type (expected Polygon or MultiPolygon)")]
    UnsupportedGeometry,

    #[error("Boundaries unavailable (local: {local}; remote: {remote})")]
    Unavailable { local: String, remote: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"ADMIN": "Squareland", "ISO_A2": "SQ"},
                "geometry": {"type": "Polygon", "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]]]}
            },
            {
                "type": "Feature",
                "properties": {"ADMIN": "Norway", "ISO_A2": "-99", "ISO_A2_EH": "NO"},
                "geometry": {"type": "MultiPolygon", "coordinates": [[[[5,60],[6,60],[6,61],[5,60]]], [[[7,62],[8,62],[8,63],[7,62]]]]}
            },
            {
                "type": "Feature",
                "properties": {"ADMIN": "Disputed", "ISO_A2": "-99"},
                "geometry": {"type": "Polygon", "coordinates": [[[1,1],[2,1],[2,2],[1,1]]]}
            },
            {
                "type": "Feature",
                "properties": {"ADMIN": "Nowhere", "ISO_A2": "NW"},
                "geometry": null
            }
        ]
    }"#;

    #[test]
    fn test_load_from_json() {
        let dataset = GeoLoader::load_from_json(SAMPLE).unwrap();
        assert_eq!(dataset.features().len(), 3);

        let square = dataset.feature("SQ").unwrap();
        assert_eq!(square.name, "Squareland");
        assert_eq!(square.geometry.0.len(), 1);

        let norway = dataset.feature("NO").unwrap();
        assert_eq!(norway.geometry.0.len(), 2);

        let disputed = dataset.feature(NO_COUNTRY_CODE).unwrap();
        assert!(!disputed.is_selectable());
    }

    #[test]
    fn test_rejects_non_polygon_geometry() {
        let json = r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{"ISO_A2":"PT"},
            "geometry":{"type":"Point","coordinates":[0,0]}}]}"#;
        assert!(matches!(
            GeoLoader::load_from_json(json),
            Err(GeoLoadError::UnsupportedGeometry)
        ));
    }

    #[test]
    fn test_rejects_bare_geometry() {
        let json = r#"{"type":"Point","coordinates":[0,0]}"#;
        assert!(matches!(
            GeoLoader::load_from_json(json),
            Err(GeoLoadError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_preloaded_cache_skips_loader() {
        let dataset = GeoLoader::load_from_json(SAMPLE).unwrap();
        let cache = GeoCache::preloaded(dataset);
        let loaded = cache.get().await.unwrap();
        assert_eq!(loaded.features().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_mirror_url_skips_remote() {
        let loader = GeoLoader::new("/nonexistent/countries.geojson", "").unwrap();

        match loader.load().await {
            Err(GeoLoadError::Unavailable { remote, .. }) => {
                assert_eq!(remote, GeoLoadError::NoMirror.to_string());
            }
            other => panic!("expected unavailable, got {:?}", other.map(|_| ())),
        }
    }
}
