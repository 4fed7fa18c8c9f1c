// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Country boundary features from the world GeoJSON dataset.

use geo::MultiPolygon;

/// Code Natural Earth uses for features with no ISO assignment.
pub const NO_COUNTRY_CODE: &str = "-99";

/// One country's boundary, keyed by ISO_A2 code.
#[derive(Debug, Clone)]
pub struct GeoFeature {
    /// ISO 3166-1 alpha-2 code, or `NO_COUNTRY_CODE`
    pub code: String,
    /// Display name from the ADMIN property (e.g., "France")
    pub name: String,
    /// Boundary geometry; single polygons are stored as one-element multipolygons
    pub geometry: MultiPolygon<f64>,
}

impl GeoFeature {
    /// Whether this feature maps to a real country that can be selected.
    pub fn is_selectable(&self) -> bool {
        is_selectable_code(&self.code)
    }
}

/// Whether a code names a selectable country.
pub fn is_selectable_code(code: &str) -> bool {
    !code.is_empty() && code != NO_COUNTRY_CODE
}

/// The loaded dataset, immutable for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct GeoDataset {
    features: Vec<GeoFeature>,
}

impl GeoDataset {
    pub fn new(features: Vec<GeoFeature>) -> Self {
        Self { features }
    }

    pub fn features(&self) -> &[GeoFeature] {
        &self.features
    }

    /// Find the feature for a country code.
    pub fn feature(&self, code: &str) -> Option<&GeoFeature> {
        self.features.iter().find(|f| f.code == code)
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
